use directories::ProjectDirs;
use rand::distributions::{Alphanumeric, DistString};
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::util::{self, PathError};
use super::CLI_NAME;

static DEFAULT_DB_FILE: &str = "catalog.db";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not locate program directories")]
    ProjectDirs,
    #[error("Could not parse the config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not create the data directory: {0}")]
    DataDir(#[from] io::Error),
    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub db: String,
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default)]
    pub csrf_secret: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db: String::new(),
            listen_address: default_listen_address(),
            csrf_secret: String::new(),
        }
    }
}

fn default_listen_address() -> String {
    "127.0.0.1:4000".to_string()
}

fn project_dirs() -> Result<ProjectDirs, SettingsError> {
    ProjectDirs::from("com", "github", CLI_NAME).ok_or(SettingsError::ProjectDirs)
}

pub fn load(path: Option<PathBuf>) -> Result<Settings, SettingsError> {
    let path = match path {
        Some(path) => path,
        None => project_dirs()?.config_dir().join("config.toml"),
    };
    tracing::info! {?path, "Loading config file"};
    let content = fs::read_to_string(path).unwrap_or_default();
    let mut set: Settings = toml::from_str(content.as_str())?;
    set = generate_default(set)?;
    tracing::trace! {settings = ?set, "Loaded settings"};
    Ok(set)
}

pub fn generate_default(mut set: Settings) -> Result<Settings, SettingsError> {
    if set.db.is_empty() {
        let dirs = project_dirs()?;
        let data_dir = dirs.data_dir();
        util::mkdirp(data_dir)?;
        set.db = format!(
            "sqlite://{}?mode=rwc",
            util::path_to_str(&data_dir.join(DEFAULT_DB_FILE))?
        );
    }
    if set.csrf_secret.is_empty() {
        set.csrf_secret = Alphanumeric.sample_string(&mut rand::thread_rng(), 32);
        tracing::warn!("Using a random CSRF secret. Define one in the config to keep HTML forms valid across restarts");
    }
    Ok(set)
}
