//! Shared fixtures for CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const VALID_CATALOG: &str = r#"[
  {
    "id": "book_001",
    "title": "The Thursday Murder Club",
    "itemType": "book",
    "formats": ["print", "ebook"],
    "description": "Four friends in a retirement village solve murders."
  },
  {
    "id": "lot_001",
    "title": "Telescope Kit",
    "itemType": "thing",
    "formats": ["equipment"],
    "description": "Tabletop reflector with star charts.",
    "details": {"deposit": 25.0}
  }
]
"#;

pub const UNTYPED_CATALOG: &str = r#"[
  {
    "id": "book_002",
    "title": "Piranesi",
    "formats": ["print"],
    "description": "A house of endless halls.",
    "isbn": null
  },
  {
    "id": "lot_002",
    "title": "Ukulele",
    "formats": ["equipment"],
    "description": "Soprano ukulele with tuner."
  }
]
"#;

/// A temporary working directory with an isolated config location.
pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.tmp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.tmp.path().join(name)).expect("read output")
    }

    /// `sundry` running inside the temp dir, never touching the user's config.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sundry").expect("sundry binary");
        cmd.current_dir(self.tmp.path())
            .env("SUNDRY_CONFIG", self.tmp.path().join("sundry.toml"))
            .env("RUST_LOG", "warn");
        cmd
    }
}
