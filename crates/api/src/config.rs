use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_VAR: &str = "FIELDCHECK_BIND";
pub const BODY_LIMIT_VAR: &str = "FIELDCHECK_BODY_LIMIT";

const DEFAULT_BIND: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}={value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(DEFAULT_BIND),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_VAR) {
            config.bind = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: BIND_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup(BODY_LIMIT_VAR) {
            config.body_limit = match value.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        name: BODY_LIMIT_VAR,
                        value,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(limit) => limit,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: BODY_LIMIT_VAR,
                        value,
                        reason: e.to_string(),
                    });
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.body_limit, 16 * 1024 * 1024);
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_VAR, "127.0.0.1:3000"),
            (BODY_LIMIT_VAR, "1024"),
        ]))
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.body_limit, 1024);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_VAR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: BIND_VAR, .. }));

        let err = ApiConfig::from_lookup(lookup(&[(BODY_LIMIT_VAR, "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let err = ApiConfig::from_lookup(lookup(&[(BODY_LIMIT_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: BODY_LIMIT_VAR, .. }));
    }
}
