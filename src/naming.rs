//! Public identifier derivation from local file paths.
//!
//! The combination
//!   path=/tmp/css/default.css
//!   base_path=/tmp/
//!   prepend_path=new/
//! yields `new/css/default` for an image and `new/css/default.css` for a raw file.

use crate::resource::ResourceType;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

fn is_sep(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Derive the identifier of `path` relative to `base_path`, under the
/// `prepend_path` namespace.
///
/// An empty `base_path` (or a `path` outside of it) falls back to the
/// last-two-segment rule of [`derive_flat`].
pub fn derive(path: &str, base_path: &str, prepend_path: &str, rtype: ResourceType) -> String {
    let full = normalize(path);
    let base = normalize(base_path);

    let body = if base.is_empty() {
        last_two_segments(&full).to_string()
    } else {
        relative_to_base(&full, &base).unwrap_or_else(|| last_two_segments(&full).to_string())
    };
    assemble(&body, prepend_path, rtype)
}

/// Derive an identifier from the file name and its immediate parent
/// directory only: `/a/b/c/d.png` becomes `c/d`. Deeper nesting is dropped.
pub fn derive_flat(path: &str, prepend_path: &str, rtype: ResourceType) -> String {
    let full = normalize(path);
    assemble(last_two_segments(&full), prepend_path, rtype)
}

/// Adds a missing trailing `/` at the end of a directory name.
pub fn ensure_trailing_slash(dirname: &str) -> String {
    if dirname.ends_with('/') {
        dirname.to_string()
    } else {
        format!("{dirname}/")
    }
}

/// Absolute, lexically cleaned form of `path`. Empty input stays empty.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let raw = Path::new(trimmed);
    let absolute = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(raw),
            Err(_) => raw.to_path_buf(),
        }
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(cleaned.components().next_back(), Some(Component::Normal(_))) {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned.to_string_lossy().into_owned()
}

fn assemble(body: &str, prepend_path: &str, rtype: ResourceType) -> String {
    let body = if rtype.keeps_extension() {
        body
    } else {
        strip_extension(body)
    };
    to_forward_slashes(&format!("{}{}", namespace(prepend_path), body))
}

fn namespace(prepend_path: &str) -> String {
    let prepend = prepend_path
        .trim()
        .trim_start_matches(is_sep)
        .trim_end_matches(is_sep);
    if prepend.is_empty() {
        String::new()
    } else {
        ensure_trailing_slash(prepend)
    }
}

fn relative_to_base(full: &str, base: &str) -> Option<String> {
    Path::new(full)
        .strip_prefix(base)
        .ok()
        .map(|rel| rel.to_string_lossy().into_owned())
        .filter(|rel| !rel.is_empty())
}

fn last_two_segments(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_sep);
    let start = match trimmed.rfind(is_sep) {
        Some(idx) => trimmed[..idx].rfind(is_sep).map_or(0, |i| i + 1),
        None => 0,
    };
    trimmed[start..].trim_start_matches(is_sep)
}

// A leading dot (".bashrc") is part of the name, not an extension.
fn strip_extension(name: &str) -> &str {
    let file_start = name.rfind(is_sep).map_or(0, |i| i + 1);
    match name[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &name[..file_start + dot],
        _ => name,
    }
}

fn to_forward_slashes(s: &str) -> String {
    s.chars()
        .map(|c| if c == MAIN_SEPARATOR { '/' } else { c })
        .collect()
}
