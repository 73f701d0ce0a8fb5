use super::expansion::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};

/// Checks that an upload source exists and can be read, either as a file
/// or as a directory that can be listed. Used as a clap value parser.
///
/// # Errors
///
/// Returns an error message if the path is missing or unreadable.
pub fn check_readable_file_or_dir(path: &str) -> Result<PathBuf, String> {
    let expanded_path = expand_tilde(Path::new(path))?;

    let readable = if expanded_path.is_dir() {
        fs::read_dir(&expanded_path).is_ok()
    } else {
        expanded_path.is_file() && fs::File::open(&expanded_path).is_ok()
    };

    if readable {
        Ok(expanded_path)
    } else {
        Err(format!("The path '{path}' is not readable."))
    }
}
