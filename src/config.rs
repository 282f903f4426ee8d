use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Diabetes Risk Predictor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Listen address when `DIABETES_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Classifier artifact location when `DIABETES_MODEL_PATH` is unset.
pub const DEFAULT_MODEL_PATH: &str = "artifacts/diabetes_model.json";

/// Static asset directory when `DIABETES_STATIC_DIR` is unset.
pub const DEFAULT_STATIC_DIR: &str = "static";

const ENV_BIND_ADDR: &str = "DIABETES_BIND_ADDR";
const ENV_MODEL_PATH: &str = "DIABETES_MODEL_PATH";
const ENV_MODEL_SHA256: &str = "DIABETES_MODEL_SHA256";
const ENV_STATIC_DIR: &str = "DIABETES_STATIC_DIR";
const ENV_ENFORCE_RANGES: &str = "DIABETES_ENFORCE_RANGES";

/// Byte length of a SHA-256 digest.
const SHA256_LEN: usize = 32;

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "info,diabetes_predictor_lib=debug"
    } else {
        "info"
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} must be a 64-character hex SHA-256 digest")]
    InvalidDigest { var: &'static str },
    #[error("{var} must be a boolean (true/false/1/0/yes/no), got: {value}")]
    InvalidBool { var: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    /// Expected lowercase hex digest of the artifact. `None` skips the check.
    pub model_sha256: Option<String>,
    pub static_dir: PathBuf,
    /// Reject measurements outside the form's accepted ranges.
    pub enforce_ranges: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            enforce_ranges: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Split out from `from_env` so tests don't have to mutate the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = non_empty(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                var: ENV_BIND_ADDR,
                value: bind_raw.clone(),
            })?;

        let model_sha256 = match non_empty(ENV_MODEL_SHA256) {
            Some(raw) => {
                let digest = raw.trim().to_ascii_lowercase();
                if !hex::decode(&digest).is_ok_and(|bytes| bytes.len() == SHA256_LEN) {
                    return Err(ConfigError::InvalidDigest {
                        var: ENV_MODEL_SHA256,
                    });
                }
                Some(digest)
            }
            None => None,
        };

        let enforce_ranges = match non_empty(ENV_ENFORCE_RANGES) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidBool {
                var: ENV_ENFORCE_RANGES,
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            model_path: non_empty(ENV_MODEL_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            model_sha256,
            static_dir: non_empty(ENV_STATIC_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            enforce_ranges,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "1.0.0");
    }

    #[test]
    fn defaults_when_environment_empty() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert!(config.model_sha256.is_none());
        assert!(!config.enforce_ranges);
    }

    #[test]
    fn overrides_are_applied() {
        let digest = "AB".repeat(32);
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DIABETES_BIND_ADDR", "127.0.0.1:8080"),
            ("DIABETES_MODEL_PATH", "/opt/models/clf.onnx"),
            ("DIABETES_MODEL_SHA256", digest.as_str()),
            ("DIABETES_STATIC_DIR", "/srv/static"),
            ("DIABETES_ENFORCE_RANGES", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.model_path, PathBuf::from("/opt/models/clf.onnx"));
        assert_eq!(config.model_sha256.as_deref(), Some("ab".repeat(32).as_str()));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert!(config.enforce_ranges);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("DIABETES_MODEL_PATH", "  ")])).unwrap();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn invalid_bind_addr_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("DIABETES_BIND_ADDR", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn short_digest_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("DIABETES_MODEL_SHA256", "abc123")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDigest {
                var: "DIABETES_MODEL_SHA256"
            }
        );
    }

    #[test]
    fn non_hex_digest_rejected() {
        let digest = "zz".repeat(32);
        let err = ServerConfig::from_lookup(lookup_from(&[(
            "DIABETES_MODEL_SHA256",
            digest.as_str(),
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDigest { .. }));
    }

    #[test]
    fn invalid_bool_rejected() {
        let err =
            ServerConfig::from_lookup(lookup_from(&[("DIABETES_ENFORCE_RANGES", "sometimes")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }
}
