use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::util::validate_api_url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const CONFIG_DIR: &str = ".naturedopes-cli";
const CONFIG_FILE: &str = "config.json";

/// Persisted CLI settings.
///
/// Fields missing from the file take their built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    /// Defaults from `API_URL` / `API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_api_url);
        let api_key = lookup("API_KEY").unwrap_or_default();
        Self { api_url, api_key }
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::ApiUrl => &self.api_url,
            ConfigKey::ApiKey => &self.api_key,
        }
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        match key {
            ConfigKey::ApiUrl => self.api_url = value,
            ConfigKey::ApiKey => self.api_key = value,
        }
    }

    /// Every setting in display order.
    pub fn fields(&self) -> Vec<(ConfigKey, &str)> {
        ConfigKey::ALL
            .iter()
            .map(|&key| (key, self.get(key)))
            .collect()
    }
}

/// The closed set of settings addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ApiUrl,
    ApiKey,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::ApiUrl, ConfigKey::ApiKey];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::ApiUrl => "api-url",
            ConfigKey::ApiKey => "api-key",
        }
    }

    /// Field name inside `config.json`.
    pub fn json_key(self) -> &'static str {
        match self {
            ConfigKey::ApiUrl => "api_url",
            ConfigKey::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::InvalidKey(s.to_string()))
    }
}

/// Reads and writes [`Config`] at a single JSON file.
///
/// There is no locking: two processes saving at once is last-writer-wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at `~/.naturedopes-cli/config.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(default_config_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored config, or environment defaults when no file exists.
    ///
    /// A missing file is not created here.
    pub fn load(&self) -> Result<Config> {
        match fs::metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using environment defaults");
                return Ok(Config::from_env());
            }
            Err(e) => {
                return Err(Error::io(
                    format!("could not access config file {}", self.path.display()),
                    e,
                ));
            }
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::io(
                format!("could not read config file {}", self.path.display()),
                e,
            )
        })?;
        let cfg = serde_json::from_str(&text).map_err(|e| {
            Error::decode(format!("config file {}", self.path.display()), e)
        })?;
        tracing::debug!(path = %self.path.display(), "loaded config");
        Ok(cfg)
    }

    /// Writes the whole config, replacing any existing file.
    pub fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_config_dir(parent).map_err(|e| {
                    Error::io(
                        format!("could not create directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let mut data = serde_json::to_string_pretty(cfg)
            .map_err(|e| Error::encode("config", e))?;
        data.push('\n');

        write_private(&self.path, data.as_bytes()).map_err(|e| {
            Error::io(
                format!("could not write config file {}", self.path.display()),
                e,
            )
        })?;
        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    /// Updates one setting and persists the result.
    ///
    /// `api-url` values must be absolute http(s) URLs.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let key: ConfigKey = key.parse()?;
        if key == ConfigKey::ApiUrl {
            validate_api_url(value)?;
        }

        let mut cfg = self.load()?;
        cfg.set(key, value.to_string());
        self.save(&cfg)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let key: ConfigKey = key.parse()?;
        let cfg = self.load()?;
        Ok(cfg.get(key).to_string())
    }
}

/// `~/.naturedopes-cli/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        Error::io(
            "could not determine home directory",
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found"),
        )
    })?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load() -> Result<Config> {
    ConfigStore::open_default()?.load()
}

pub fn save(cfg: &Config) -> Result<()> {
    ConfigStore::open_default()?.save(cfg)
}

pub fn set(key: &str, value: &str) -> Result<()> {
    ConfigStore::open_default()?.set(key, value)
}

pub fn get(key: &str) -> Result<String> {
    ConfigStore::open_default()?.get(key)
}

#[cfg(unix)]
fn create_config_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_config_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    // `mode` only applies on creation; tighten files written by older versions too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(data)?;
    file.flush()
}
