//! Path resolution against a working directory

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Split `filepath` into an absolute-or-anchored directory and a file name
///
/// A bare file name lives in `working_dir`, an absolute path is kept as is.
/// A relative path is joined onto `working_dir`, anchored at the current
/// directory if that is still relative, and normalized lexically so `.` and
/// `..` components disappear.
///
/// ```
/// use std::path::PathBuf;
/// use snnkit::helpers::get_abs_path;
///
/// let (dir, name) = get_abs_path("plugins/act.so", "/work").unwrap();
/// assert_eq!(dir, PathBuf::from("/work/plugins"));
/// assert_eq!(name, "act.so");
/// ```
pub fn get_abs_path(
    filepath: impl AsRef<Path>,
    working_dir: impl AsRef<Path>,
) -> Result<(PathBuf, String)> {
    let filepath = filepath.as_ref();
    let working_dir = working_dir.as_ref();

    let file_name = filepath
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "path '{}' does not name a file",
                filepath.display()
            ))
        })?
        .to_string();

    let dir = match filepath.parent() {
        Some(parent) if parent.is_absolute() => parent.to_path_buf(),
        Some(parent) if !parent.as_os_str().is_empty() => {
            absolutize(&working_dir.join(parent))?
        }
        _ => working_dir.to_path_buf(),
    };

    Ok((dir, file_name))
}

/// Anchor `path` at the current directory and fold `.` and `..` lexically
fn absolutize(path: &Path) -> Result<PathBuf> {
    let anchored = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in anchored.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
