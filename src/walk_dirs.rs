use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::Result;

/// Regular files under `root`, depth first, sorted by name within each
/// directory. Directories themselves are never yielded, and symbolic
/// links are not followed, so a link to a file is skipped too.
///
/// A directory that cannot be listed yields an error item.
pub fn regular_files(root: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
}

/// Call `visit` for every regular file under `root`.
///
/// Stops at the first listing error or the first error returned by
/// `visit`; files visited before that are not revisited or undone.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    for file in regular_files(root) {
        visit(&file?)?;
    }
    Ok(())
}
