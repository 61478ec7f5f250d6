//! Runtime configuration loaded from environment variables.
//!
//! - `AIR_ONBOARD_HOST` / `AIR_ONBOARD_PORT` - Listen address (default `127.0.0.1:3000`)
//! - `AIR_ONBOARD_DATA_DIR` - Directory of JSON data files (default: built-in copies)
//! - `AIR_ONBOARD_CHAT_MODE` - `auto`, `mock` or `claude` (default `auto`)
//! - `ANTHROPIC_API_KEY` - Messages API key; `auto` mode uses Claude when set
//! - `ANTHROPIC_BASE_URL` - Messages API base URL (default `https://api.anthropic.com`)
//! - `AIR_ONBOARD_MODEL` / `AIR_ONBOARD_MAX_TOKENS` - Upstream model and token cap
//! - `AIR_ONBOARD_MOCK_DELAY_MS` - Pause before a mock answer (default 1000)
//! - `AIR_ONBOARD_CHAT_RATE_LIMIT` - Chat requests per minute per IP (default: off)
//! - `AIR_ONBOARD_TRUST_PROXY` - Rate limit by `X-Forwarded-For` instead of the peer (default `false`)
//! - `AIR_ONBOARD_CORS_ORIGINS` - Allowed origins, comma-separated (default: any)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::assistant::{ChatBackend, ClaudeClient};
use crate::store::DataSource;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("chat mode 'claude' requires ANTHROPIC_API_KEY")]
    MissingApiKey,
}

/// Which answer source serves `/api/chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChatMode {
    /// Claude when an API key is configured, otherwise mock.
    #[default]
    Auto,
    Mock,
    Claude,
}

impl FromStr for ChatMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "mock" => Ok(Self::Mock),
            "claude" | "real" => Ok(Self::Claude),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub chat_mode: ChatMode,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub mock_delay: Duration,
    pub chat_rate_limit: Option<u32>,
    pub trust_proxy: bool,
    pub cors_origins: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: None,
            chat_mode: ChatMode::Auto,
            anthropic_api_key: None,
            anthropic_base_url: DEFAULT_ANTHROPIC_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            mock_delay: DEFAULT_MOCK_DELAY,
            chat_rate_limit: None,
            trust_proxy: false,
            cors_origins: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Empty values count as unset.
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("AIR_ONBOARD_HOST") {
            config.host = host;
        }
        if let Some(port) = get("AIR_ONBOARD_PORT") {
            config.port = parse("AIR_ONBOARD_PORT", &port)?;
        }
        config.data_dir = get("AIR_ONBOARD_DATA_DIR").map(PathBuf::from);
        if let Some(mode) = get("AIR_ONBOARD_CHAT_MODE") {
            config.chat_mode = parse("AIR_ONBOARD_CHAT_MODE", &mode)?;
        }
        config.anthropic_api_key = get("ANTHROPIC_API_KEY");
        if let Some(url) = get("ANTHROPIC_BASE_URL") {
            config.anthropic_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("AIR_ONBOARD_MODEL") {
            config.model = model;
        }
        if let Some(max) = get("AIR_ONBOARD_MAX_TOKENS") {
            config.max_tokens = parse("AIR_ONBOARD_MAX_TOKENS", &max)?;
        }
        if let Some(ms) = get("AIR_ONBOARD_MOCK_DELAY_MS") {
            config.mock_delay = Duration::from_millis(parse("AIR_ONBOARD_MOCK_DELAY_MS", &ms)?);
        }
        if let Some(limit) = get("AIR_ONBOARD_CHAT_RATE_LIMIT") {
            config.chat_rate_limit = Some(parse("AIR_ONBOARD_CHAT_RATE_LIMIT", &limit)?);
        }
        if let Some(trust) = get("AIR_ONBOARD_TRUST_PROXY") {
            config.trust_proxy = parse("AIR_ONBOARD_TRUST_PROXY", &trust)?;
        }
        config.cors_origins = get("AIR_ONBOARD_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        });

        Ok(config)
    }

    pub fn data_source(&self) -> DataSource {
        match &self.data_dir {
            Some(dir) => DataSource::Directory(dir.clone()),
            None => DataSource::Builtin,
        }
    }

    /// Resolve the chat mode into a concrete backend.
    pub fn chat_backend(&self) -> Result<ChatBackend, ConfigError> {
        let use_claude = match self.chat_mode {
            ChatMode::Mock => false,
            ChatMode::Claude => true,
            ChatMode::Auto => self.anthropic_api_key.is_some(),
        };

        if !use_claude {
            return Ok(ChatBackend::Mock {
                delay: self.mock_delay,
            });
        }

        let key = self
            .anthropic_api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(ChatBackend::Claude(
            ClaudeClient::new(self.anthropic_base_url.clone(), key)
                .with_model(self.model.clone())
                .with_max_tokens(self.max_tokens),
        ))
    }
}

fn parse<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_source(), DataSource::Builtin);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("AIR_ONBOARD_HOST", "0.0.0.0"),
            ("AIR_ONBOARD_PORT", "8080"),
            ("AIR_ONBOARD_DATA_DIR", "/srv/data"),
            ("AIR_ONBOARD_CHAT_MODE", "mock"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ANTHROPIC_BASE_URL", "http://localhost:9999/"),
            ("AIR_ONBOARD_MODEL", "claude-test"),
            ("AIR_ONBOARD_MAX_TOKENS", "256"),
            ("AIR_ONBOARD_MOCK_DELAY_MS", "0"),
            ("AIR_ONBOARD_CHAT_RATE_LIMIT", "10"),
            ("AIR_ONBOARD_TRUST_PROXY", "true"),
            ("AIR_ONBOARD_CORS_ORIGINS", "http://a.test, http://b.test"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.data_source(),
            DataSource::Directory(PathBuf::from("/srv/data"))
        );
        assert_eq!(config.chat_mode, ChatMode::Mock);
        assert_eq!(config.anthropic_base_url, "http://localhost:9999");
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.mock_delay, Duration::ZERO);
        assert_eq!(config.chat_rate_limit, Some(10));
        assert!(config.trust_proxy);
        assert_eq!(
            config.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let err = Config::from_lookup(lookup(&[("AIR_ONBOARD_PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "AIR_ONBOARD_PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_chat_mode() {
        let err = Config::from_lookup(lookup(&[("AIR_ONBOARD_CHAT_MODE", "gpt")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "AIR_ONBOARD_CHAT_MODE", .. }));
    }

    #[test]
    fn auto_mode_picks_backend_from_api_key() {
        let without_key = Config::default();
        assert!(matches!(
            without_key.chat_backend().unwrap(),
            ChatBackend::Mock { .. }
        ));

        let with_key = Config {
            anthropic_api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            with_key.chat_backend().unwrap(),
            ChatBackend::Claude(_)
        ));
    }

    #[test]
    fn claude_mode_without_key_is_an_error() {
        let config = Config {
            chat_mode: ChatMode::Claude,
            ..Config::default()
        };
        assert_eq!(config.chat_backend().unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn mock_mode_ignores_api_key() {
        let config = Config {
            chat_mode: ChatMode::Mock,
            anthropic_api_key: Some("sk-test".to_string()),
            mock_delay: Duration::from_millis(5),
            ..Config::default()
        };
        match config.chat_backend().unwrap() {
            ChatBackend::Mock { delay } => assert_eq!(delay, Duration::from_millis(5)),
            other => panic!("expected mock backend, got {other:?}"),
        }
    }
}
