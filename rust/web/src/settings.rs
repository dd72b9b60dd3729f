use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";
pub const HOST_ENV: &str = "BLACKJACK_HOST";
pub const PORT_ENV: &str = "BLACKJACK_PORT";
pub const SESSION_TIMEOUT_ENV: &str = "BLACKJACK_SESSION_TIMEOUT";
pub const SEED_ENV: &str = "BLACKJACK_SEED";

/// Upper bound for `session_timeout_minutes`: one week.
pub const MAX_SESSION_TIMEOUT_MINUTES: u64 = 7 * 24 * 60;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Idle minutes before a session is dropped
    pub session_timeout_minutes: u64,
    pub sweep_interval_secs: u64,
    /// Seed for the shuffle generator; random when absent
    pub seed: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_timeout_minutes: 30,
            sweep_interval_secs: 60,
            seed: None,
        }
    }
}

impl ServerSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.host.trim().is_empty() {
            return Err(SettingsError::InvalidValue("host cannot be empty".to_string()));
        }
        if self.session_timeout_minutes == 0 {
            return Err(SettingsError::InvalidValue(
                "session_timeout_minutes must be greater than 0".to_string(),
            ));
        }
        if self.session_timeout_minutes > MAX_SESSION_TIMEOUT_MINUTES {
            return Err(SettingsError::InvalidValue(format!(
                "session_timeout_minutes must be at most {MAX_SESSION_TIMEOUT_MINUTES}"
            )));
        }
        if self.sweep_interval_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "sweep_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_timeout_minutes.saturating_mul(60))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsSources {
    pub host: ValueSource,
    pub port: ValueSource,
    pub session_timeout_minutes: ValueSource,
    pub sweep_interval_secs: ValueSource,
    pub seed: ValueSource,
}

impl Default for SettingsSources {
    fn default() -> Self {
        Self {
            host: ValueSource::Default,
            port: ValueSource::Default,
            session_timeout_minutes: ValueSource::Default,
            sweep_interval_secs: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSettings {
    pub settings: ServerSettings,
    pub sources: SettingsSources,
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub session_timeout_minutes: Option<u64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    session_timeout_minutes: Option<u64>,
    #[serde(default)]
    sweep_interval_secs: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolves settings from the process environment.
pub fn load(overrides: &SettingsOverrides) -> Result<ResolvedSettings, SettingsError> {
    resolve(overrides, |key| std::env::var(key).ok())
}

/// Applies defaults, then the TOML file, then `env`, then `overrides`.
pub fn resolve<E>(overrides: &SettingsOverrides, env: E) -> Result<ResolvedSettings, SettingsError>
where
    E: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());
    let mut settings = ServerSettings::default();
    let mut sources = SettingsSources::default();

    let file_path = overrides
        .config
        .clone()
        .or_else(|| env(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = file_path {
        let file = read_file(&path)?;
        if let Some(v) = file.host {
            settings.host = v;
            sources.host = ValueSource::File;
        }
        if let Some(v) = file.port {
            settings.port = v;
            sources.port = ValueSource::File;
        }
        if let Some(v) = file.session_timeout_minutes {
            settings.session_timeout_minutes = v;
            sources.session_timeout_minutes = ValueSource::File;
        }
        if let Some(v) = file.sweep_interval_secs {
            settings.sweep_interval_secs = v;
            sources.sweep_interval_secs = ValueSource::File;
        }
        if let Some(v) = file.seed {
            settings.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(host) = env(HOST_ENV) {
        settings.host = host;
        sources.host = ValueSource::Env;
    }
    if let Some(port) = env(PORT_ENV) {
        settings.port = parse_env(PORT_ENV, &port)?;
        sources.port = ValueSource::Env;
    }
    if let Some(timeout) = env(SESSION_TIMEOUT_ENV) {
        settings.session_timeout_minutes = parse_env(SESSION_TIMEOUT_ENV, &timeout)?;
        sources.session_timeout_minutes = ValueSource::Env;
    }
    if let Some(seed) = env(SEED_ENV) {
        settings.seed = Some(parse_env(SEED_ENV, &seed)?);
        sources.seed = ValueSource::Env;
    }

    if let Some(host) = &overrides.host {
        settings.host = host.clone();
        sources.host = ValueSource::Cli;
    }
    if let Some(port) = overrides.port {
        settings.port = port;
        sources.port = ValueSource::Cli;
    }
    if let Some(timeout) = overrides.session_timeout_minutes {
        settings.session_timeout_minutes = timeout;
        sources.session_timeout_minutes = ValueSource::Cli;
    }
    if let Some(seed) = overrides.seed {
        settings.seed = Some(seed);
        sources.seed = ValueSource::Cli;
    }

    settings.validate()?;
    Ok(ResolvedSettings { settings, sources })
}

fn read_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue(format!("{key}={value} is not a valid number")))
}
