//! Crash-safe file replacement
//!
//! Every persisted mutation (objects, index, refs, HEAD, checked-out files)
//! writes a sibling temp file and renames it over the destination, so a
//! crash leaves either the old or the new content on disk.

use anyhow::Context;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `contents`, creating parent directories.
pub fn write_atomically(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    write_atomically_with_mode(path, contents, false)
}

/// Like [`write_atomically`], also setting the executable bits on unix.
pub fn write_atomically_with_mode(
    path: &Path,
    contents: &[u8],
    executable: bool,
) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .context(format!("Invalid file path {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .context(format!("Unable to create directory {}", parent.display()))?;

    let temp_path = temp_path_for(path)?;
    let result = write_temp_file(&temp_path, contents, executable).and_then(|_| {
        std::fs::rename(&temp_path, path)
            .context(format!("Unable to rename temp file to {}", path.display()))
    });

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }

    result
}

fn write_temp_file(temp_path: &Path, contents: &[u8], executable: bool) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)
        .context(format!("Unable to open temp file {}", temp_path.display()))?;

    file.write_all(contents)
        .context(format!("Unable to write temp file {}", temp_path.display()))?;
    file.sync_all()
        .context(format!("Unable to flush temp file {}", temp_path.display()))?;

    set_executable(&file, executable)
}

#[cfg(unix)]
fn set_executable(file: &std::fs::File, executable: bool) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if executable { 0o755 } else { 0o644 };
    file.set_permissions(std::fs::Permissions::from_mode(mode))
        .context("Unable to set file permissions")
}

#[cfg(not(unix))]
fn set_executable(_file: &std::fs::File, _executable: bool) -> anyhow::Result<()> {
    Ok(())
}

// Temp names start with '.' so they never parse as branch names or digests.
fn temp_path_for(path: &Path) -> anyhow::Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context(format!("Invalid file name in {}", path.display()))?;

    Ok(path.with_file_name(format!(
        ".{}.tmp-{}",
        file_name,
        rand::random::<u32>()
    )))
}
