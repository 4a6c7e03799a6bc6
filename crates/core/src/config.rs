//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! services that need it. Nothing in this crate reads environment variables
//! during an operation, which keeps behavior consistent across hosts and
//! test harnesses.

use memoreg_store::{FileMedium, Store};
use std::path::{Path, PathBuf};

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Creates a configuration rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory the file-backed store keeps its snapshots in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Opens the persistent store for this configuration.
    pub fn open_store(&self) -> Store<FileMedium> {
        Store::new(FileMedium::new(self.data_dir.clone()))
    }
}
