use std::time::Duration;

use thiserror::Error;

pub const ENV_TRANSPORT: &str = "CREDIT_RISKD_TRANSPORT";
pub const ENV_HTTP_ADDR: &str = "CREDIT_RISK_HTTP_ADDR";
pub const ENV_MAX_BODY_BYTES: &str = "CREDIT_RISK_MAX_BODY_BYTES";
pub const ENV_HTTP_TIMEOUT_MS: &str = "CREDIT_RISK_HTTP_TIMEOUT_MS";

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8501";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
const MIN_MAX_BODY_BYTES: usize = 1024;
const MAX_MAX_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5_000;
const MIN_HTTP_TIMEOUT_MS: u64 = 100;
const MAX_HTTP_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Stdio,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CREDIT_RISKD_TRANSPORT must be http or stdio, got `{0}`")]
    UnknownTransport(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub transport: Transport,
    pub http_addr: String,
    pub max_body_bytes: usize,
    /// Read and write deadline for a single HTTP connection.
    pub http_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Http,
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let transport = match lookup(ENV_TRANSPORT) {
            None => Transport::Http,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "http" => Transport::Http,
                "stdio" => Transport::Stdio,
                _ => return Err(ConfigError::UnknownTransport(raw)),
            },
        };
        let http_addr = lookup(ENV_HTTP_ADDR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let max_body_bytes = lookup(ENV_MAX_BODY_BYTES)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES)
            .clamp(MIN_MAX_BODY_BYTES, MAX_MAX_BODY_BYTES);
        let http_timeout_ms = lookup(ENV_HTTP_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS)
            .clamp(MIN_HTTP_TIMEOUT_MS, MAX_HTTP_TIMEOUT_MS);

        Ok(Self {
            transport,
            http_addr,
            max_body_bytes,
            http_timeout: Duration::from_millis(http_timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.transport, Transport::Http);
        assert_eq!(cfg.http_addr, DEFAULT_HTTP_ADDR);
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(
            cfg.http_timeout,
            Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS)
        );
    }

    #[test]
    fn clamps_http_timeout() {
        let low = config_from(&[(ENV_HTTP_TIMEOUT_MS, "0")]).unwrap();
        assert_eq!(low.http_timeout, Duration::from_millis(MIN_HTTP_TIMEOUT_MS));

        let high = config_from(&[(ENV_HTTP_TIMEOUT_MS, "3600000")]).unwrap();
        assert_eq!(high.http_timeout, Duration::from_millis(MAX_HTTP_TIMEOUT_MS));

        let set = config_from(&[(ENV_HTTP_TIMEOUT_MS, " 750 ")]).unwrap();
        assert_eq!(set.http_timeout, Duration::from_millis(750));

        let junk = config_from(&[(ENV_HTTP_TIMEOUT_MS, "soon")]).unwrap();
        assert_eq!(
            junk.http_timeout,
            Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS)
        );
    }

    #[test]
    fn reads_transport_and_clamps_body_limit() {
        let cfg = config_from(&[
            (ENV_TRANSPORT, "STDIO"),
            (ENV_HTTP_ADDR, "0.0.0.0:9000"),
            (ENV_MAX_BODY_BYTES, "10"),
        ])
        .unwrap();
        assert_eq!(cfg.transport, Transport::Stdio);
        assert_eq!(cfg.http_addr, "0.0.0.0:9000");
        assert_eq!(cfg.max_body_bytes, MIN_MAX_BODY_BYTES);
    }

    #[test]
    fn rejects_unknown_transport() {
        let err = config_from(&[(ENV_TRANSPORT, "grpc")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTransport("grpc".to_string()));
        assert!(err.to_string().contains(ENV_TRANSPORT));
    }
}
