use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use watchsift_tests::*;

/// Exchange-prefixed or bare tickers, free of separators and comment markers.
fn symbol_text() -> impl Strategy<Value = String> {
    "([A-Z]{2,6}:)?[A-Z][A-Z0-9.]{0,5}"
}

fn sequence() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(symbol_text(), 0..24)
}

fn to_sequence(raw: &[String]) -> SymbolSequence {
    raw.iter()
        .map(|value| Symbol::parse(value).expect("generated symbols are valid"))
        .collect()
}

struct MemorySource(Vec<(PathBuf, String)>);

impl WatchlistSource for MemorySource {
    fn read_text(&self, path: &Path) -> std::io::Result<String> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == path)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn tokenizing_an_output_line_matches_a_comma_split(raw in prop::collection::vec(symbol_text(), 1..24)) {
        let line = raw.join(",");
        let tokens: Vec<String> = tokenize(&line).into_iter().map(String::from).collect();
        let split: Vec<String> = line.split(',').map(str::to_owned).collect();
        prop_assert_eq!(tokens, split);
    }

    #[test]
    fn tokenizer_never_yields_blank_or_comment_symbols(text in "[A-Z:#/*, \n\r\t]{0,64}") {
        for symbol in &tokenize(&text) {
            let value = symbol.as_str();
            prop_assert!(!value.trim().is_empty());
            prop_assert_eq!(value, value.trim());
            prop_assert!(!value.starts_with('#') && !value.starts_with("//"));
        }
    }

    #[test]
    fn filter_is_the_ordered_subsequence_outside_seen(newest in sequence(), older in sequence()) {
        let newest = to_sequence(&newest);
        let older = to_sequence(&older);
        let seen: SymbolSet = [&older].into_iter().collect();

        let filtered = filter_against_seen(&newest, &seen);
        let expected: Vec<&Symbol> = newest
            .iter()
            .filter(|symbol| !older.iter().any(|old| old == *symbol))
            .collect();
        let actual: Vec<&Symbol> = filtered.iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn aggregate_contains_exactly_the_symbols_of_its_files(lists in prop::collection::vec(sequence(), 0..6)) {
        let files: Vec<WatchlistFile> = (0..lists.len())
            .map(|index| {
                WatchlistFile::new(format!("list{index}.csv"), SystemTime::UNIX_EPOCH)
                    .expect("watchlist")
            })
            .collect();
        let source = MemorySource(
            files
                .iter()
                .zip(&lists)
                .map(|(file, raw)| (file.path().to_path_buf(), raw.join("\n")))
                .collect(),
        );

        let aggregation = aggregate(&files, &source);
        let expected: HashSet<&str> = lists.iter().flatten().map(String::as_str).collect();

        prop_assert_eq!(aggregation.seen.len(), expected.len());
        for value in &expected {
            let symbol = Symbol::parse(value).expect("valid");
            prop_assert!(aggregation.seen.contains(&symbol));
        }
    }

    #[test]
    fn combine_is_duplicate_free_and_ordered_by_first_occurrence(lists in prop::collection::vec(sequence(), 0..6)) {
        // lists are given newest first, like a file set
        let files = FileSet::from_unordered(
            (0..lists.len())
                .map(|index| {
                    let age = Duration::from_secs(1_000 - index as u64);
                    WatchlistFile::new(format!("list{index}.txt"), SystemTime::UNIX_EPOCH + age)
                        .expect("watchlist")
                })
                .collect(),
        );
        let sequences: Vec<SymbolSequence> = lists.iter().map(|raw| to_sequence(raw)).collect();
        let oldest_first: Vec<&SymbolSequence> = sequences.iter().rev().collect();

        let combined = combine_first_seen(oldest_first.iter().copied());

        let mut unique = HashSet::new();
        prop_assert!(combined.iter().all(|symbol| unique.insert(symbol.clone())));

        let flattened: Vec<&Symbol> = oldest_first.iter().flat_map(|seq| seq.iter()).collect();
        let first_positions: Vec<usize> = combined
            .iter()
            .map(|symbol| flattened.iter().position(|candidate| *candidate == symbol).expect("present"))
            .collect();
        prop_assert!(first_positions.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(combined.len(), flattened.iter().collect::<HashSet<_>>().len());

        let source = MemorySource(
            files
                .iter()
                .map(|file| {
                    let index: usize = file
                        .stem()
                        .trim_start_matches("list")
                        .parse()
                        .expect("index");
                    (file.path().to_path_buf(), lists[index].join(","))
                })
                .collect(),
        );
        let from_files = watchsift_core::combine_file_set(&files, &source);
        prop_assert_eq!(from_files.combined, combined);
    }
}
