//! Test helpers for writing CLI input files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub(super) fn file(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A topology with two centers one unit from the destination and each other.
pub(super) const SYMMETRIC_TOPOLOGY: &str = r#"{
    "destination": "D",
    "items": {
        "X": { "center": "P", "unitWeight": 1 },
        "Y": { "center": "Q", "unitWeight": 1 }
    },
    "distances": [
        { "from": "P", "to": "D", "distance": 1 },
        { "from": "Q", "to": "D", "distance": 1 },
        { "from": "P", "to": "Q", "distance": 1 }
    ]
}"#;
