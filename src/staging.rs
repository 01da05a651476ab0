//! Filesystem helpers for reading artifact trees and publishing outputs.
//!
//! Outputs are written to a sibling temp file and renamed into place so a
//! failed run never leaves a torn document behind.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Collect every regular file under `root`, sorted by path.
///
/// Symlinked directories are not descended into; symlinks to files are kept.
pub fn collect_files_recursive(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let entry = entry.with_context(|| format!("read {}", root.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspect {}", path.display()))?;
        if file_type.is_dir() {
            files.extend(collect_files_recursive(&path)?);
        } else if file_type.is_file() {
            files.push(path);
        } else if file_type.is_symlink() {
            if path.is_file() {
                files.push(path);
            } else {
                tracing::debug!(path = %path.display(), "skipping symlink that is not a file");
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Replace `dest` with pretty-printed JSON via temp file + rename.
pub fn write_json_atomic<T: serde::Serialize>(dest: &Path, value: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value).context("serialize JSON")?;
    bytes.push(b'\n');
    write_bytes_atomic(dest, &bytes)
}

pub fn write_bytes_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let parent = dest
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("write {}", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync {}", tmp.path().display()))?;
    // The temp file is created 0600; keep the mode of the file being replaced.
    if let Ok(existing) = fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .with_context(|| format!("set permissions on {}", tmp.path().display()))?;
    }
    tmp.persist(dest)
        .map_err(|err| anyhow!("publish {}: {}", dest.display(), err.error))?;
    Ok(())
}

/// Append one line to a text report, writing `header` first when the file is new or empty.
pub fn append_line_with_header(path: &Path, header: &str, line: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    let is_empty = file
        .metadata()
        .with_context(|| format!("inspect {}", path.display()))?
        .len()
        == 0;
    if is_empty {
        file.write_all(header.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .with_context(|| format!("write {}", path.display()))?;
    }
    file.write_all(line.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
