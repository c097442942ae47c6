//! Store discovery
//!
//! A store created in a project root is found from any subdirectory by
//! walking up from the working directory. When no store exists anywhere
//! above, the home directory store is used.

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::Result;

/// Conventional file name of the store
pub const STORE_FILE_NAME: &str = ".ftags.db";

/// How a store path was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocateMode {
    /// Found in the working directory or one of its ancestors
    Discovered,
    /// Nothing found; the home directory store (may not exist yet)
    Fallback,
    /// Forced into the working directory
    Local,
}

/// A store path together with the way it was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreLocation {
    pub path: PathBuf,
    pub mode: LocateMode,
}

impl StoreLocation {
    /// Search upwards from the working directory
    pub fn locate() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::locate_from(&cwd, &home_dir()))
    }

    /// Search upwards from `start`, falling back to `home`
    pub fn locate_from(start: &Path, home: &Path) -> Self {
        Self::search(start, home, |candidate| candidate.exists())
    }

    fn search(start: &Path, home: &Path, exists: impl Fn(&Path) -> bool) -> Self {
        for dir in start.ancestors() {
            let candidate = dir.join(STORE_FILE_NAME);
            if exists(&candidate) {
                return Self {
                    path: candidate,
                    mode: LocateMode::Discovered,
                };
            }
        }

        Self {
            path: home.join(STORE_FILE_NAME),
            mode: LocateMode::Fallback,
        }
    }

    /// Designate a store directly under the working directory, without searching
    pub fn init_here() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::init_in(&cwd))
    }

    pub fn init_in(dir: &Path) -> Self {
        Self {
            path: dir.join(STORE_FILE_NAME),
            mode: LocateMode::Local,
        }
    }
}

/// Path of the store that would be used from the working directory
pub fn locate() -> Result<PathBuf> {
    StoreLocation::locate().map(|loc| loc.path)
}

/// Path of a store directly under the working directory
pub fn init_here() -> Result<PathBuf> {
    StoreLocation::init_here().map(|loc| loc.path)
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
