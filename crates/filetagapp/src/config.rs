//! # Configuration
//!
//! Filetag configuration is declared with [`confique`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Resolution Order
//!
//! Values are resolved in priority order:
//! 1. **Environment variables**: `FILETAG_STORE`, `FILETAG_READ_ONLY`.
//! 2. **Explicit file**: passed with `--config FILE`. Must exist.
//! 3. **User config**: `filetag.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! Command-line flags such as `--store` are applied on top by the CLI.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store_path` | `<data_dir>/records.json` | Record file location |
//! | `read_only` | `false` | Reject every write |
//! | `follow_links` | `true` | Follow symlinks while walking directories |
//! | `include_hidden` | `false` | Walk into dot-files and dot-directories |

use crate::error::{FiletagError, Result};
use crate::walk::WalkOptions;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "filetag.toml";

/// Configuration for filetag, stored in `filetag.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FiletagConfig {
    /// Record file. When absent, `records.json` in the user data directory.
    #[config(env = "FILETAG_STORE")]
    pub store_path: Option<PathBuf>,

    /// Open the store without write access.
    #[config(env = "FILETAG_READ_ONLY", default = false)]
    pub read_only: bool,

    /// Follow symbolic links when walking directories.
    #[config(default = true)]
    pub follow_links: bool,

    /// Include hidden files and directories when walking.
    #[config(default = false)]
    pub include_hidden: bool,
}

impl Default for FiletagConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            read_only: false,
            follow_links: true,
            include_hidden: false,
        }
    }
}

impl FiletagConfig {
    /// Load with the full layering: environment, `explicit`, user config file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_layered(explicit, user_config_path().as_deref(), true)
    }

    pub(crate) fn load_layered(
        explicit: Option<&Path>,
        user: Option<&Path>,
        use_env: bool,
    ) -> Result<Self> {
        let mut builder = Self::builder();
        if use_env {
            builder = builder.env();
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(FiletagError::Config(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            builder = builder.file(path);
        }
        if let Some(path) = user {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| FiletagError::Config(e.to_string()))
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            follow_links: self.follow_links,
            include_hidden: self.include_hidden,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "filetag", "filetag")
}

/// `filetag.toml` in the OS config directory.
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Default record store directory, the OS data directory for filetag.
pub fn default_data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FiletagError::Config("could not determine a data directory".to_string()))
}
