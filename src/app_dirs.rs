//! Locations of the files the dashboard keeps on disk.
//!
//! Everything lives in one `.incomelens` folder under the OS config directory
//! (e.g., `%APPDATA%` on Windows): `config.toml`, the prediction history and a
//! `logs/` folder. `INCOMELENS_CONFIG_HOME` replaces the OS base directory for
//! tests or portable setups.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

use crate::history::HISTORY_KEY;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".incomelens";
/// Environment variable that overrides the base config directory.
pub const CONFIG_HOME_ENV: &str = "INCOMELENS_CONFIG_HOME";
/// Config file inside the app directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
const LOGS_DIR_NAME: &str = "logs";

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the override variable nor the OS provided a base directory.
    #[error("No config directory available; set {CONFIG_HOME_ENV}")]
    NoBaseDir,
    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// The app directory and the files the dashboard stores in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Resolve the per-user app directory and make sure it exists.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = base_dir(std::env::var_os(CONFIG_HOME_ENV), || {
            BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
        })
        .ok_or(AppDirError::NoBaseDir)?;
        Self::under(&base)
    }

    /// Use `<base>/.incomelens`, creating it if needed.
    pub fn under(base: &Path) -> Result<Self, AppDirError> {
        let root = ensure_dir(base.join(APP_DIR_NAME))?;
        Ok(Self { root })
    }

    /// The `.incomelens` directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// JSON file backing the prediction history.
    pub fn history_file(&self) -> PathBuf {
        self.root.join(format!("{HISTORY_KEY}.json"))
    }

    /// Log folder, created on first use.
    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(self.root.join(LOGS_DIR_NAME))
    }
}

/// A non-empty override wins over the OS default.
fn base_dir(
    override_dir: Option<OsString>,
    os_default: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(os_default)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
