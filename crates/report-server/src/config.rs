//! Configuration for the report server
//!
//! All settings come from the process environment:
//!
//! | variable           | meaning                                     | default                 |
//! |--------------------|---------------------------------------------|-------------------------|
//! | `POLYGON_API_KEY`  | market-data credential                      | empty (provider rejects) |
//! | `OPENAI_API_KEY`   | summarization credential                    | unset: preview mode     |
//! | `PORT`             | listening port                              | `3000`                  |
//! | `MOCK`             | `true` returns synthetic reports            | off                     |
//! | `POLYGON_API_BASE` | market-data endpoint override               | `https://api.polygon.io` |
//! | `OPENAI_API_BASE`  | completion endpoint override                | `https://api.openai.com/v1` |

use crate::error::{ReportError, Result};
use report_utils::{env_flag, env_var};

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Polygon API key
    pub polygon_api_key: Option<String>,

    /// OpenAI API key; `None` disables summarization
    pub openai_api_key: Option<String>,

    /// Port to listen on
    pub port: u16,

    /// Return synthetic reports without any outbound call
    pub mock: bool,

    /// Polygon base URL override
    pub polygon_api_base: Option<String>,

    /// OpenAI base URL override
    pub openai_api_base: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            polygon_api_key: None,
            openai_api_key: None,
            port: DEFAULT_PORT,
            mock: false,
            polygon_api_base: None,
            openai_api_base: None,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read the configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = match env_var("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            polygon_api_key: env_var("POLYGON_API_KEY"),
            openai_api_key: env_var("OPENAI_API_KEY"),
            port,
            mock: env_flag("MOCK"),
            polygon_api_base: env_var("POLYGON_API_BASE"),
            openai_api_base: env_var("OPENAI_API_BASE"),
        })
    }

    /// Whether live summarization is available
    pub fn summarization_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| ReportError::Config(format!("PORT must be a port number, got '{raw}'")))
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn polygon_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.polygon_api_key = Some(key.into());
        self
    }

    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.openai_api_key = Some(key.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn mock(mut self, mock: bool) -> Self {
        self.config.mock = mock;
        self
    }

    pub fn polygon_api_base(mut self, base: impl Into<String>) -> Self {
        self.config.polygon_api_base = Some(base.into());
        self
    }

    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.config.openai_api_base = Some(base.into());
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert!(!config.mock);
        assert!(!config.summarization_enabled());
    }

    #[test]
    fn test_config_builder() {
        let config = ServerConfig::builder()
            .openai_api_key("sk-test")
            .port(8080)
            .mock(true)
            .build();

        assert_eq!(config.port, 8080);
        assert!(config.mock);
        assert!(config.summarization_enabled());
        assert_eq!(config.polygon_api_key, None);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert_eq!(parse_port(" 3001 ").unwrap(), 3001);
        assert!(matches!(parse_port("abc"), Err(ReportError::Config(_))));
        assert!(parse_port("70000").is_err());
    }
}
