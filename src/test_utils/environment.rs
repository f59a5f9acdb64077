//! Test environment setup and management
//!
//! A scratch directory for documents, templates and variable files, removed
//! when the environment is dropped.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::SourceFixture;

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    /// Create a new, empty test environment
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file in the environment
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let full_path = self.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Write a fixture and return its path
    pub fn add_fixture(&self, fixture: &SourceFixture) -> Result<PathBuf> {
        fixture.write_to(self.path())
    }

    /// Read a file from the environment
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.path().join(path))?)
    }

    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.path().join(path).exists()
    }
}
