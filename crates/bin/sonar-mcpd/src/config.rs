use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use sonar_core::client::DEFAULT_BASE_URL;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Parser, Debug)]
#[command(name = "sonar-mcpd", version, about = "Perplexity Sonar MCP daemon.")]
struct CliArgs {
    /// Perplexity API key. An unset key fails on the first upstream call.
    #[arg(long, env = "PERPLEXITY_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "SONAR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(
        long,
        env = "SONAR_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "SONAR_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "SONAR_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "SONAR_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct SonarConfig {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub enable_stdio: bool,
    pub http_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
    NoTransport,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransport => {
                write!(f, "no transport enabled: set --stdio or SONAR_HTTP_SERVE")
            }
        }
    }
}

impl Error for ConfigError {}

impl SonarConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for SonarConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "SONAR_REQUEST_TIMEOUT_SECS",
                value: args.request_timeout_secs.to_string(),
            });
        }

        if !args.enable_stdio && !args.http_serve {
            return Err(ConfigError::NoTransport);
        }

        let base_url = if args.base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            args.base_url
        };

        Ok(Self {
            api_key: args.api_key,
            base_url,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            enable_stdio: args.enable_stdio,
            http_serve: args.http_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            enable_stdio: true,
            http_serve: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
        }
    }

    #[test]
    fn empty_base_url_falls_back_to_default() {
        let mut args = base_args();
        args.base_url = "   ".to_string();

        let config = SonarConfig::try_from(args).expect("config should parse");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_api_key_is_not_rejected() {
        let config = SonarConfig::try_from(base_args()).expect("config should parse");
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut args = base_args();
        args.request_timeout_secs = 0;

        assert!(SonarConfig::try_from(args).is_err());
    }

    #[test]
    fn disabling_every_transport_is_rejected() {
        let mut args = base_args();
        args.enable_stdio = false;
        args.http_serve = false;

        assert!(matches!(
            SonarConfig::try_from(args),
            Err(ConfigError::NoTransport)
        ));
    }
}
