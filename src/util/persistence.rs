use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::domain::{GeneratorSettings, InvalidSettings};

const APP_QUALIFIER: &str = "br";
const APP_ORG: &str = "JapBase";
const APP_NAME: &str = "MotorDePrecos";
const SETTINGS_FILE: &str = "settings.json";

pub fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Loads the saved settings, falling back to defaults when the file is
/// missing, unreadable, or invalid.
pub fn load_settings() -> GeneratorSettings {
    let Some(path) = settings_file() else {
        warn!("no config directory available; using default settings");
        return GeneratorSettings::default();
    };
    if !path.exists() {
        debug!(path = %path.display(), "no settings file; using defaults");
        return GeneratorSettings::default();
    }
    match load_settings_from(&path) {
        Ok(settings) => {
            debug!(path = %path.display(), "loaded settings");
            settings
        }
        Err(err) => {
            warn!(path = %path.display(), "ignoring settings file: {err}");
            GeneratorSettings::default()
        }
    }
}

pub fn load_settings_from(path: &Path) -> Result<GeneratorSettings, SettingsError> {
    let data = fs::read_to_string(path)?;
    let settings: GeneratorSettings = serde_json::from_str(&data)?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(settings: &GeneratorSettings) -> Result<PathBuf, SettingsError> {
    let path = settings_file().ok_or(SettingsError::StorageUnavailable)?;
    save_settings_to(&path, settings)?;
    Ok(path)
}

pub fn save_settings_to(path: &Path, settings: &GeneratorSettings) -> Result<(), SettingsError> {
    settings.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error("invalid settings: {0}")]
    Invalid(#[from] InvalidSettings),
}
