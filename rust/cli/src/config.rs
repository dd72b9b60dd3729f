use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";
pub const SEED_ENV: &str = "BLACKJACK_SEED";
pub const ROUNDS_ENV: &str = "BLACKJACK_ROUNDS";
pub const REVEAL_DEALER_ENV: &str = "BLACKJACK_REVEAL_DEALER";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    /// Rounds per `play` session; unlimited when absent
    pub rounds: Option<u32>,
    /// Show the dealer's hole card while the round is still active
    pub reveal_dealer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub rounds: ValueSource,
    pub reveal_dealer: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            rounds: ValueSource::Default,
            reveal_dealer: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve_with(|key| std::env::var(key).ok())
}

/// Defaults, then the TOML file named by `BLACKJACK_CONFIG`, then the
/// individual variables. Empty values are treated as unset.
pub fn resolve_with<E>(env: E) -> Result<ConfigResolved, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.rounds {
            cfg.rounds = Some(v);
            sources.rounds = ValueSource::File;
        }
        if let Some(v) = f.reveal_dealer {
            cfg.reveal_dealer = v;
            sources.reveal_dealer = ValueSource::File;
        }
    }

    if let Some(seed) = env(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(rounds) = env(ROUNDS_ENV)
        && !rounds.is_empty()
    {
        cfg.rounds = Some(
            rounds
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid rounds".into()))?,
        );
        sources.rounds = ValueSource::Env;
    }
    if let Some(reveal) = env(REVEAL_DEALER_ENV)
        && !reveal.is_empty()
    {
        cfg.reveal_dealer = parse_bool(&reveal)
            .ok_or_else(|| ConfigError::Invalid("Invalid reveal_dealer".into()))?;
        sources.reveal_dealer = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    rounds: Option<u32>,
    #[serde(default)]
    reveal_dealer: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.rounds == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: rounds must be >=1".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
