// crates/terralock-config/src/store.rs
// ============================================================================
// Module: Local Configuration Store
// Description: YAML persistence of the config document at a per-user path.
// Purpose: Hold exactly one document per user with restrictive permissions.
// Dependencies: dirs, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The store holds exactly one document at a fixed per-user location, with
//! no versioning or history: `save` replaces the file wholesale. Writes are
//! owner-only (0o600) on Unix because fields may carry credentials.
//! `exists` swallows lookup failures as `false`, mirroring the
//! conservative-absence pattern of the provisioning existence check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::ConfigDocument;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Per-user directory holding the configuration file.
const CONFIG_DIR_NAME: &str = ".terralock";
/// Name of the configuration file inside the per-user directory.
const CONFIG_FILE_NAME: &str = "config.yaml";
/// Owner-only file mode applied on Unix.
#[cfg(unix)]
const OWNER_ONLY_MODE: u32 = 0o600;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Local configuration store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The per-user home directory could not be determined.
    #[error("home directory could not be determined")]
    NoHomeDirectory,
    /// No configuration file exists at the store path.
    #[error("config file not found: {0}")]
    NotFound(String),
    /// The file exists but is not a parseable document.
    #[error("config parse error: {0}")]
    Parse(String),
    /// I/O failure while reading or writing the file.
    #[error("config io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Single-file store for the per-user configuration document.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Path of the configuration file.
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store over an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Creates the store at the fixed per-user location
    /// (`$HOME/.terralock/config.yaml`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoHomeDirectory`] when no home directory can be
    /// determined.
    pub fn default_location() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDirectory)?;
        Ok(Self::new(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    /// Returns the path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists the document, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the directory cannot be created, the
    /// document cannot be rendered, or the write fails.
    pub fn save(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io(err.to_string()))?;
        }
        let rendered =
            serde_yaml::to_string(document).map_err(|err| StoreError::Parse(err.to_string()))?;
        write_owner_only(&self.path, rendered.as_bytes())
            .map_err(|err| StoreError::Io(err.to_string()))
    }

    /// Loads the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no file exists,
    /// [`StoreError::Parse`] when the file is malformed, and
    /// [`StoreError::Io`] for other read failures (including unreadable
    /// permissions).
    pub fn load(&self) -> Result<ConfigDocument, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StoreError::NotFound(self.path.display().to_string())
            } else {
                StoreError::Io(err.to_string())
            }
        })?;
        serde_yaml::from_str(&content).map_err(|err| StoreError::Parse(err.to_string()))
    }

    /// Returns whether a configuration file exists.
    ///
    /// Lookup failures are reported as `false`; callers that need to
    /// distinguish them should call [`ConfigStore::load`] instead.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.try_exists().unwrap_or(false)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes the file with owner-only permissions.
#[cfg(unix)]
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OWNER_ONLY_MODE)
        .open(path)?;
    // The mode only applies on create; tighten pre-existing files too.
    let mut permissions = file.metadata()?.permissions();
    use std::os::unix::fs::PermissionsExt;
    permissions.set_mode(OWNER_ONLY_MODE);
    file.set_permissions(permissions)?;
    file.write_all(bytes)
}

/// Writes the file without a permission override on non-Unix targets.
#[cfg(not(unix))]
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file =
        fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
    file.write_all(bytes)
}
