//! File-backed inputs: descriptor JSON files and `.env` files.
//!
//! Invariants:
//! - `DOTENV_DISABLED` is checked before `dotenvy::dotenv()` is called.
//! - A missing `.env` file is not an error.

use std::path::Path;

use tracing::debug;

use super::env::env_var_or_none;
use super::error::ConfigError;
use crate::constants::DOTENV_DISABLED_ENV;
use crate::types::ConfigDescriptor;

impl ConfigDescriptor {
    /// Load a descriptor from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::DescriptorRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let descriptor =
            serde_json::from_str(&contents).map_err(|source| ConfigError::DescriptorParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "Loaded config descriptor");
        Ok(descriptor)
    }
}

/// Load a `.env` file from the current directory (or its parents) into the
/// process environment.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if env_var_or_none(DOTENV_DISABLED_ENV).is_some() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
            Ok(())
        }
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}
