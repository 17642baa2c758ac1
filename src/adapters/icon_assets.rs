//! Icon copy: every file sharing the icon's stem is copied.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Copy every file next to `source` whose name starts with its stem.
///
/// `rancher_base/catalogIcon.png` copies `catalogIcon.png`, `catalogIcon.ico`
/// and any other `catalogIcon*` file.
pub fn copy_variants(source: &Path, dest_dir: &Path) -> Result<Vec<String>, AppError> {
    let prefix = icon_prefix(source).ok_or_else(|| AppError::IconMissing(source.to_path_buf()))?;
    copy_matching(source, &prefix, dest_dir)
}

/// File stem used as the match prefix.
pub fn icon_prefix(source: &Path) -> Option<String> {
    source.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

fn copy_matching(source: &Path, prefix: &str, dest_dir: &Path) -> Result<Vec<String>, AppError> {
    let source_dir = match source.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !source_dir.is_dir() {
        return Err(AppError::IconMissing(source.to_path_buf()));
    }

    let mut copied = Vec::new();
    for entry in fs::read_dir(&source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(prefix) {
            continue;
        }
        fs::copy(entry.path(), dest_dir.join(&name))?;
        copied.push(name);
    }

    if copied.is_empty() {
        return Err(AppError::IconMissing(source.to_path_buf()));
    }

    copied.sort();
    tracing::debug!(count = copied.len(), dest = %dest_dir.display(), "copied icon assets");
    Ok(copied)
}
