use super::types::{Args, Command};
use crate::config::{URI_ENV_VAR, compile_keep_pattern};

/// Validate the parsed args beyond what clap checks
///
/// # Errors
///
/// Returns an error message if the connection URI is missing, the keep
/// pattern does not compile, or a rename has identical endpoints.
pub fn validate(args: &Args) -> Result<(), String> {
    match args.uri.as_deref() {
        Some(uri) if !uri.trim().is_empty() => {}
        _ => return Err(format!("--uri or {URI_ENV_VAR} is required")),
    }
    if let Some(pattern) = &args.keep_files {
        compile_keep_pattern(pattern).map_err(|e| e.to_string())?;
    }
    if let Command::Rename { from, to, .. } = &args.command {
        if from.trim_start_matches('/') == to.trim_start_matches('/') {
            return Err("rename: source and target public ids are the same".to_string());
        }
    }
    Ok(())
}
