//! Shared fixtures for integration tests

#![allow(dead_code)] // Not all test files use every helper

pub mod request_builder;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temp tree with `data/` (directory) and `data/file.txt` (file)
pub struct Fixture {
    pub temp_dir: TempDir,
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("data");
        fs::create_dir(&dir).expect("Failed to create data directory");
        let file = dir.join("file.txt");
        fs::write(&file, b"payload").expect("Failed to write test file");
        Self {
            temp_dir,
            dir,
            file,
        }
    }

    /// Destination whose parent exists
    pub fn backup(&self) -> PathBuf {
        self.temp_dir.path().join("backup")
    }

    /// Destination whose parent does not exist
    pub fn orphan(&self) -> PathBuf {
        self.temp_dir.path().join("missing_parent").join("sub")
    }

    pub fn missing(&self) -> PathBuf {
        self.temp_dir.path().join("does-not-exist")
    }
}
