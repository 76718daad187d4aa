use std::env;
use std::path::{Path, PathBuf};

/// Resolve the user-supplied folder: expand a leading `~`, make it absolute,
/// and canonicalize it when it exists. A missing folder is returned as-is so
/// the run can report it.
pub fn resolve_folder(raw: &Path) -> PathBuf {
    let expanded = expand_home(raw);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    };

    absolute.canonicalize().unwrap_or(absolute)
}

fn expand_home(raw: &Path) -> PathBuf {
    let Ok(rest) = raw.strip_prefix("~") else {
        return raw.to_path_buf();
    };

    match env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(rest),
        _ => raw.to_path_buf(),
    }
}
