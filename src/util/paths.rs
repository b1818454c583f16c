//! Path normalization for flag regeneration.

use std::path::{Path, PathBuf};

/// Re-express `path` relative to `base` if it is relative.
///
/// Absolute paths are returned unchanged. A relative path is interpreted
/// against the current directory and rewritten relative to `base`. An
/// empty result becomes the current-directory token `.`.
pub fn fix_if_relative(path: &Path, base: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    fix_if_relative_from(path, base, &cwd)
}

/// Pure form of [`fix_if_relative`] with an explicit current directory.
pub fn fix_if_relative_from(path: &Path, base: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let abs_path = cwd.join(path);
    let abs_base = if base.is_absolute() {
        base.to_path_buf()
    } else {
        cwd.join(base)
    };
    let relative = pathdiff::diff_paths(&abs_path, &abs_base).unwrap_or(abs_path);
    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
