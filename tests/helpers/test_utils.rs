use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use ruby_indexer::Settings;

/// Builds a throwaway Ruby workspace on disk
pub struct WorkspaceBuilder {
    dir: TempDir,
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Add a file at `relative` with `content`, creating parent directories
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

/// Write `content` as the workspace's settings file
pub fn write_settings(root: &Path, content: &str) {
    fs::create_dir_all(Settings::config_dir(root)).expect("Failed to create settings dir");
    fs::write(Settings::path(root), content).expect("Failed to write settings");
}
