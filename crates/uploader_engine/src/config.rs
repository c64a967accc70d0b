use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uploader_core::ConfigDefaults;
use uploader_logging::upload_info;

pub const DEFAULT_PROFILE: &str = "default";
const DEFAULTS_TABLE: &str = "defaults";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid profile name '{0}'")]
    InvalidProfile(String),
    #[error("could not read profile {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse profile {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("profile {path:?} has no [defaults] table")]
    MissingDefaults { path: PathBuf },
    #[error("default '{field}' in {path:?} must be a scalar value")]
    InvalidValue { path: PathBuf, field: String },
}

/// Load `{config_dir}/{profile}.toml` and return its `[defaults]` table.
pub fn load_defaults(config_dir: &Path, profile: &str) -> Result<ConfigDefaults, ConfigError> {
    if profile.is_empty() || profile.contains(['/', '\\']) || profile.starts_with('.') {
        return Err(ConfigError::InvalidProfile(profile.to_string()));
    }
    let path = config_dir.join(format!("{profile}.toml"));
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let mut document: toml::Table = text.parse().map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    let Some(toml::Value::Table(table)) = document.remove(DEFAULTS_TABLE) else {
        return Err(ConfigError::MissingDefaults { path });
    };

    let mut defaults = Vec::with_capacity(table.len());
    for (field, value) in table {
        let rendered = match value {
            toml::Value::String(text) => text,
            toml::Value::Integer(number) => number.to_string(),
            toml::Value::Float(number) => number.to_string(),
            toml::Value::Boolean(flag) => flag.to_string(),
            toml::Value::Datetime(stamp) => stamp.to_string(),
            toml::Value::Array(_) | toml::Value::Table(_) => {
                return Err(ConfigError::InvalidValue { path, field });
            }
        };
        defaults.push((field, rendered));
    }

    upload_info!("Using '{}' settings.", profile);
    Ok(defaults.into_iter().collect())
}
