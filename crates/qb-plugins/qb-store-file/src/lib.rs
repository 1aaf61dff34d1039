//! # qb-store-file
//!
//! Local filesystem implementation of `DurableStore`: one file per key
//! under a root directory. This is the durable analogue of the browser
//! storage the collections were originally kept in.
//!
//! The port contract has no failure channel, so write errors are logged
//! and swallowed. Last write wins at the granularity of a whole key, which
//! means two processes sharing a root can silently drop each other's
//! edits — a documented limitation of the single-writer design.

use qb_core::traits::DurableStore;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    /// Root directory for all keys (e.g., "./data/quill-board")
    root_path: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root_path = root.into();
        fs::create_dir_all(&root_path)?;
        Ok(Self { root_path })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root_path.join(sanitize_key(key))
    }
}

/// Maps a store key to a safe file name. Keys are short fixed identifiers
/// like "blog-app-posts", but anything outside [A-Za-z0-9._-] is replaced
/// so a hostile key cannot escape the root directory.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::error!("failed to read key {key}: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = write_atomic(&path, value) {
            log::error!("failed to write key {key}: {e}");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::error!("failed to remove key {key}: {e}"),
        }
    }
}

/// Writes via a sibling temp file + rename so a crash mid-write cannot
/// leave a half-written collection behind.
fn write_atomic(path: &Path, value: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, value)?;
    fs::rename(&tmp, path)
}
