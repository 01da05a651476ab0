use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Component, Path};

/// Read size used when streaming artifacts through the digest.
pub const DIGEST_CHUNK_BYTES: usize = 1024 * 1024;

/// Digest a file without holding more than one chunk in memory.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    sha256_reader(file, DIGEST_CHUNK_BYTES).with_context(|| format!("read {}", path.display()))
}

pub fn sha256_reader<R: Read>(mut reader: R, chunk_bytes: usize) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_bytes.max(1)];
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Render `path` relative to `root` with `/` separators on every platform.
pub fn rel_path_string(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .with_context(|| format!("{} is not under {}", path.display(), root.display()))?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| anyhow!("artifact path {} is not valid UTF-8", path.display()))?,
            ),
            Component::CurDir => {}
            other => {
                return Err(anyhow!(
                    "unexpected component {other:?} in artifact path {}",
                    path.display()
                ))
            }
        }
    }
    Ok(parts.join("/"))
}

/// Current UTC time at second precision, e.g. `2024-05-01T12:00:00Z`.
pub fn utc_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
