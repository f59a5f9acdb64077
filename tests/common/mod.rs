//! Common test utilities for platepipe integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use platepipe::test_utils::{SourceFixture, TestEnvironment};

/// Command for the platepipe binary, isolated from the caller's environment.
pub fn platepipe_cmd() -> Command {
    let mut cmd = Command::cargo_bin("platepipe").expect("platepipe binary should be built");
    cmd.env_remove("PLATEPIPE_MARKDOWN_EXTENSIONS").env_remove("RUST_LOG");
    cmd
}

/// Scratch project with helpers to run the binary inside it.
pub struct Project {
    pub env: TestEnvironment,
}

impl Project {
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: TestEnvironment::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.env.path()
    }

    pub fn file(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.env.create_file(name, content)
    }

    pub fn fixture(&self, fixture: &SourceFixture) -> Result<PathBuf> {
        self.env.add_fixture(fixture)
    }

    /// platepipe command running in the project directory
    pub fn cmd(&self) -> Command {
        let mut cmd = platepipe_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}
