//! Configuration for the library's data location.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line `--data-dir`
//! 2. Environment variables (SHELF_DATA_DIR, SHELF_NAME)
//! 3. Config file (.shelf/config.yaml)
//! 4. Defaults (name "Library", data in the current directory)
//!
//! Config file discovery:
//! - Searches the starting directory and its parents for .shelf/config.yaml
//! - `data_dir` in the config file is relative to the directory holding .shelf/
//!
//! The resolved [`LibraryConfig`] is passed to `Library::open`; nothing is
//! cached process-wide.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name of the books document
pub const BOOKS_FILE: &str = "library_books.json";

/// File name of the borrowers document
pub const BORROWERS_FILE: &str = "library_borrowers.json";

const DEFAULT_NAME: &str = "Library";

const ENV_DATA_DIR: &str = "SHELF_DATA_DIR";
const ENV_NAME: &str = "SHELF_NAME";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub library: LibrarySection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibrarySection {
    /// Display name of the library
    pub name: Option<String>,
    /// Directory holding both documents (relative to the project root)
    pub data_dir: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Display name of the library
    pub name: String,
    /// Directory holding both documents
    pub data_dir: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Values taken from outside the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub name: Option<String>,
}

impl Overrides {
    /// Read overrides from the environment
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var_os(ENV_DATA_DIR).map(PathBuf::from),
            name: std::env::var(ENV_NAME).ok(),
        }
    }
}

impl LibraryConfig {
    /// Configuration for a data directory, with the default name
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            data_dir: data_dir.into(),
            config_file: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Path of the books document
    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(BOOKS_FILE)
    }

    /// Path of the borrowers document
    pub fn borrowers_path(&self) -> PathBuf {
        self.data_dir.join(BORROWERS_FILE)
    }

    /// Load configuration from all sources, starting discovery at the
    /// current directory. `data_dir` (from the command line) wins over
    /// everything else.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let mut overrides = Overrides::from_env();
        if data_dir.is_some() {
            overrides.data_dir = data_dir;
        }
        Self::resolve(find_config_file(&cwd), overrides)
    }

    /// Combine an optional config file with overrides
    pub fn resolve(config_file: Option<PathBuf>, overrides: Overrides) -> Result<Self> {
        let section = match config_file {
            Some(ref path) => load_config_file(path)?.library,
            None => LibrarySection::default(),
        };

        let data_dir = match (overrides.data_dir, section.data_dir, &config_file) {
            (Some(dir), _, _) => dir,
            (None, Some(dir), Some(path)) => resolve_path(project_root(path), &dir),
            (None, Some(dir), None) => PathBuf::from(dir),
            (None, None, _) => PathBuf::from("."),
        };

        let name = overrides
            .name
            .or(section.name)
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        Ok(Self {
            name,
            data_dir,
            config_file,
        })
    }
}

/// Find config file by searching `start` and its parents
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".shelf").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Directory containing `.shelf/` (grandparent of config.yaml)
fn project_root(config_path: &Path) -> &Path {
    config_path
        .parent()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
