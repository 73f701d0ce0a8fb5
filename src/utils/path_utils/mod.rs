mod expansion;
mod file_checks;

pub use expansion::expand_tilde;
pub use file_checks::check_readable_file_or_dir;
