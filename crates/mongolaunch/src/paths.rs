//! Launcher location and storage path resolution

use std::path::{Component, Path, PathBuf};

use mongolaunch_common::{Error, Result};

/// Directory containing the running launcher executable.
///
/// Symlinks are resolved so that a launcher linked into `~/bin` still keeps
/// its data next to the real binary.
pub fn entry_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| Error::EntryPoint(e.to_string()))?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::EntryPoint(format!("{} has no parent directory", exe.display())))
}

/// An explicitly configured base directory, made absolute against the
/// current working directory when given relative (`--base-dir .`).
pub fn resolve_base_dir(dir: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(dir)
        .map_err(|e| Error::EntryPoint(format!("cannot resolve base directory {}: {}", dir.display(), e)))?;
    Ok(normalize(&absolute))
}

/// `base_dir` joined with `relative`, with `.` and `..` folded lexically.
///
/// The result never depends on the caller's working directory.
pub fn storage_path(base_dir: &Path, relative: &Path) -> PathBuf {
    normalize(&base_dir.join(relative))
}

/// Lexical normalization; does not touch the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
