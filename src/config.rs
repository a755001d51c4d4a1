use crate::{APP_NAME, Res, error::Error, git::FormatVersion};
use etcetera::{BaseStrategy, choose_base_strategy};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const ENV_PREFIX: &str = "GITSTATUS_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub tmux: TmuxConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub porcelain: FormatVersion,
    /// 0 disables the deadline.
    pub timeout_ms: u64,
    pub git: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmuxConfig {
    pub symbols: TmuxSymbols,
    pub styles: TmuxStyles,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmuxSymbols {
    pub branch: String,
    pub hash_prefix: String,
    pub ahead: String,
    pub behind: String,
    pub staged: String,
    pub conflict: String,
    pub modified: String,
    pub untracked: String,
    pub stashed: String,
    pub clean: String,
    pub gone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmuxStyles {
    /// Resets the style after each styled part.
    pub clear: String,
    pub state: String,
    pub branch: String,
    pub remote: String,
    pub divergence: String,
    pub hash_prefix: String,
    pub ahead: String,
    pub behind: String,
    pub staged: String,
    pub conflict: String,
    pub modified: String,
    pub untracked: String,
    pub stashed: String,
    pub clean: String,
    pub gone: String,
}

impl Config {
    /// The embedded defaults alone.
    pub fn embedded() -> Res<Self> {
        Figment::from(Toml::string(DEFAULT_CONFIG))
            .extract()
            .map_err(|e| Error::Config(Box::new(e)))
    }
}

/// Loads the embedded defaults, then the user's config file, then
/// `GITSTATUS_` environment variables (`__` separates nested keys).
///
/// The user's config file is optional unless given explicitly.
pub fn init_config(path: Option<PathBuf>) -> Res<Config> {
    let path = match path {
        Some(path) => {
            if !path.is_file() {
                return Err(config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => default_config_path()?,
    };

    log::debug!("Loading config from {:?}", path);
    figment(&path)
        .extract()
        .map_err(|e| Error::Config(Box::new(e)))
}

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::string(DEFAULT_CONFIG))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

fn default_config_path() -> Res<PathBuf> {
    let strategy = choose_base_strategy().map_err(Error::ConfigDir)?;
    Ok(strategy.config_dir().join(APP_NAME).join("config.toml"))
}

fn config_error(message: String) -> Error {
    Error::Config(Box::new(figment::Error::from(message)))
}
