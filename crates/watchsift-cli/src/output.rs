use std::io::{self, Write};
use std::path::Path;

use serde_json::json;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use uuid::Uuid;
use watchsift_core::{CombineReport, FilterReport, RunOutcome, SourceRemoval};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub const BANNER: &str = concat!("Watchlist Sift • v", env!("CARGO_PKG_VERSION"));

const FILTER_LINE_HEADING: &str = "=== ONE-LINE IMPORT STRING ===";
const COMBINE_LINE_HEADING: &str = "=== ONE-LINE IMPORT STRING (COMBINED) ===";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// How the final report is shown.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub print_line: bool,
}

/// Banner and folder, printed before the run starts in text mode.
pub fn render_header(folder: &Path) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{BANNER}")?;
    writeln!(stdout, "Folder: {}", folder.display())?;
    Ok(())
}

pub fn render(outcome: &RunOutcome, options: RenderOptions) -> Result<(), CliError> {
    match options.format {
        OutputFormat::Json => render_json(outcome, options.pretty),
        OutputFormat::Text => {
            let mut stdout = io::stdout().lock();
            match outcome {
                RunOutcome::NoFiles { .. } => {
                    eprintln!("No matching .csv/.txt files found.");
                    Ok(())
                }
                RunOutcome::Filtered(report) => {
                    write_filter_text(&mut stdout, report, options.print_line)
                }
                RunOutcome::Combined(report) => {
                    write_combine_text(&mut stdout, report, options.print_line)
                }
            }
        }
    }
}

fn render_json(outcome: &RunOutcome, pretty: bool) -> Result<(), CliError> {
    let payload = json!({
        "banner": BANNER,
        "run_id": Uuid::new_v4(),
        "result": serde_json::to_value(outcome)?,
    });
    let rendered = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    println!("{rendered}");
    Ok(())
}

pub fn write_filter_text<W: Write>(
    out: &mut W,
    report: &FilterReport,
    print_line: bool,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Newest file: {} (modified {})",
        report.newest.name,
        format_timestamp(report.newest.modified)?
    )?;

    if report.compared_files == 0 {
        writeln!(out, "No older files to compare; will normalize and output anyway.")?;
    } else {
        writeln!(
            out,
            "Original: {} • Removed (found in older files): {} • Remaining: {}",
            report.original_count,
            report.removed_count,
            report.remaining_count()
        )?;
    }

    writeln!(out, "Written: {}", report.output.display())?;
    match &report.source_removal {
        SourceRemoval::Kept => {}
        SourceRemoval::Removed => writeln!(out, "Removed source: {}", report.newest.name)?,
        SourceRemoval::Skipped { reason } => {
            writeln!(out, "Kept source {}: {reason}", report.newest.name)?
        }
        SourceRemoval::Failed { message } => writeln!(
            out,
            "Could not remove source {}: {message}",
            report.newest.name
        )?,
    }

    if print_line {
        writeln!(out)?;
        writeln!(out, "{FILTER_LINE_HEADING}")?;
        writeln!(out, "{}", report.line())?;
    }
    Ok(())
}

pub fn write_combine_text<W: Write>(
    out: &mut W,
    report: &CombineReport,
    print_line: bool,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Newest file: {} (modified {})",
        report.newest.name,
        format_timestamp(report.newest.modified)?
    )?;
    writeln!(
        out,
        "Files combined: {} • Unique symbols: {}",
        report.file_count,
        report.unique_count()
    )?;
    writeln!(out, "Written: {}", report.output.display())?;

    if print_line {
        writeln!(out)?;
        writeln!(out, "{COMBINE_LINE_HEADING}")?;
        writeln!(out, "{}", report.line())?;
    }
    Ok(())
}

fn format_timestamp(value: OffsetDateTime) -> Result<String, CliError> {
    Ok(value.format(TIMESTAMP_FORMAT)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use watchsift_core::{tokenize, FileSummary};

    use super::*;

    fn summary() -> FileSummary {
        FileSummary {
            name: String::from("newest.csv"),
            path: PathBuf::from("/lists/newest.csv"),
            // 2024-03-05 09:07:02 UTC
            modified: OffsetDateTime::from_unix_timestamp(1_709_629_622).expect("timestamp"),
        }
    }

    fn filter_report(compared_files: usize) -> FilterReport {
        FilterReport {
            newest: summary(),
            compared_files,
            original_count: 4,
            removed_count: 2,
            remaining: tokenize("NASDAQ:GOOGL,NASDAQ:META"),
            output: PathBuf::from("/lists/newest_filtered.txt"),
            warnings: Vec::new(),
            source_removal: SourceRemoval::Removed,
        }
    }

    fn text(report: &FilterReport, print_line: bool) -> String {
        let mut buffer = Vec::new();
        write_filter_text(&mut buffer, report, print_line).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn filter_text_lists_counts_output_and_line() {
        let rendered = text(&filter_report(2), true);
        assert!(rendered.contains("Newest file: newest.csv (modified 2024-03-05 09:07:02 UTC)"));
        assert!(rendered.contains("Original: 4 • Removed (found in older files): 2 • Remaining: 2"));
        assert!(rendered.contains("Written: /lists/newest_filtered.txt"));
        assert!(rendered.contains("Removed source: newest.csv"));
        assert!(rendered.ends_with("=== ONE-LINE IMPORT STRING ===\nNASDAQ:GOOGL,NASDAQ:META\n"));
    }

    #[test]
    fn single_file_filter_mentions_passthrough_and_no_print_hides_line() {
        let rendered = text(&filter_report(0), false);
        assert!(rendered.contains("No older files to compare"));
        assert!(!rendered.contains("ONE-LINE IMPORT STRING"));
    }

    #[test]
    fn timestamps_are_zero_padded_utc() {
        let early = OffsetDateTime::from_unix_timestamp(-62_135_596_800 + 65).expect("timestamp");
        assert_eq!(format_timestamp(early).expect("format"), "0001-01-01 00:01:05 UTC");
        assert_eq!(
            format_timestamp(summary().modified).expect("format"),
            "2024-03-05 09:07:02 UTC"
        );
    }

    #[test]
    fn combine_text_uses_combined_heading() {
        let report = CombineReport {
            newest: summary(),
            file_count: 3,
            combined: tokenize("AAPL,MSFT"),
            output: PathBuf::from("/lists/newest_combined.txt"),
            warnings: Vec::new(),
        };
        let mut buffer = Vec::new();
        write_combine_text(&mut buffer, &report, true).expect("render");
        let rendered = String::from_utf8(buffer).expect("utf8");

        assert!(rendered.contains("Files combined: 3 • Unique symbols: 2"));
        assert!(rendered.contains("=== ONE-LINE IMPORT STRING (COMBINED) ===\nAAPL,MSFT\n"));
    }
}
