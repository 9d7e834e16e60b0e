/*
 * Responsibility
 * - Read environment settings (IP/PORT, valid tans, status mode, ...)
 * - Validate them (missing or broken values fail startup)
 */
use thiserror::Error;

use crate::services::valid_tans::ValidTans;

const DEFAULT_IP: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8004;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

// Unset means false
fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}

/// How verification outcomes are mapped onto HTTP status codes.
///
/// - `Compat`: every failure is a 404, and malformed bodies echo the decoder
///   error. Existing callers depend on this.
/// - `Rest`: 405 / 400 / 403, with a generic message for malformed bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    #[default]
    Compat,
    Rest,
}

impl StatusMode {
    fn parse(value: Option<String>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "compat" => Ok(Self::Compat),
            "rest" => Ok(Self::Rest),
            _ => Err(ConfigError::Invalid("STATUS_MODE")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read {0}: {1}")]
    Io(&'static str, #[source] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub ip: String,
    pub port: u16,
    pub status_mode: StatusMode,
    pub max_body_bytes: usize,
    // Off unless asked for: a panicking request must not take the service down
    pub abort_on_panic: bool,
    // Raw entries from VALID_TANS and VALID_TANS_FILE, merged
    pub valid_tans: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ip = var("IP").unwrap_or_else(|| DEFAULT_IP.to_string());

        let port = match var("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let status_mode = StatusMode::parse(var("STATUS_MODE"))?;

        let max_body_bytes = match var("MAX_BODY_BYTES") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("MAX_BODY_BYTES"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let abort_on_panic = parse_flag("ABORT_ON_PANIC", var("ABORT_ON_PANIC"))?;

        let inline = var("VALID_TANS");
        let file = var("VALID_TANS_FILE");
        if inline.is_none() && file.is_none() {
            return Err(ConfigError::Missing("VALID_TANS"));
        }

        let mut valid_tans = inline
            .as_deref()
            .map(ValidTans::parse)
            .unwrap_or_default();
        if let Some(path) = file {
            let text = std::fs::read_to_string(path.trim())
                .map_err(|e| ConfigError::Io("VALID_TANS_FILE", e))?;
            valid_tans.extend(ValidTans::parse(&text));
        }

        Ok(Self {
            ip,
            port,
            status_mode,
            max_body_bytes,
            abort_on_panic,
            valid_tans,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("VALID_TANS", "abc-123")]).unwrap();

        assert_eq!(config.ip, "0.0.0.0");
        assert_eq!(config.port, 8004);
        assert!(!config.abort_on_panic);
        assert_eq!(config.status_mode, StatusMode::Compat);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.valid_tans, vec!["abc-123"]);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("IP", "127.0.0.1"),
            ("PORT", "9000"),
            ("ABORT_ON_PANIC", "True"),
            ("STATUS_MODE", "rest"),
            ("MAX_BODY_BYTES", "4096"),
            ("VALID_TANS", "a,b"),
        ])
        .unwrap();

        assert_eq!(config.ip, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert!(config.abort_on_panic);
        assert_eq!(config.status_mode, StatusMode::Rest);
        assert_eq!(config.max_body_bytes, 4096);
        assert_eq!(config.valid_tans, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = load(&[("IP", ""), ("PORT", " "), ("VALID_TANS", "abc-123")]).unwrap();

        assert_eq!(config.ip, "0.0.0.0");
        assert_eq!(config.port, 8004);
    }

    #[test]
    fn test_missing_valid_tans() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::Missing("VALID_TANS"))
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "http"), ("VALID_TANS", "a")]),
            Err(ConfigError::Invalid("PORT"))
        ));
        assert!(matches!(
            load(&[("PORT", "70000"), ("VALID_TANS", "a")]),
            Err(ConfigError::Invalid("PORT"))
        ));
        assert!(matches!(
            load(&[("STATUS_MODE", "strict"), ("VALID_TANS", "a")]),
            Err(ConfigError::Invalid("STATUS_MODE"))
        ));
        assert!(matches!(
            load(&[("MAX_BODY_BYTES", "0"), ("VALID_TANS", "a")]),
            Err(ConfigError::Invalid("MAX_BODY_BYTES"))
        ));
        assert!(matches!(
            load(&[("ABORT_ON_PANIC", "sometimes"), ("VALID_TANS", "a")]),
            Err(ConfigError::Invalid("ABORT_ON_PANIC"))
        ));
    }

    #[test]
    fn test_abort_on_panic_is_opt_in() {
        for value in ["0", "false", "off", ""] {
            let config = load(&[("ABORT_ON_PANIC", value), ("VALID_TANS", "a")]).unwrap();
            assert!(!config.abort_on_panic, "{value:?} should keep the process alive");
        }
        let config = load(&[("ABORT_ON_PANIC", "1"), ("VALID_TANS", "a")]).unwrap();
        assert!(config.abort_on_panic);
    }

    #[test]
    fn test_valid_tans_file_is_merged() {
        let path = std::env::temp_dir().join(format!("tan-verify-{}.txt", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# from file\nfile-1\nfile-2").unwrap();
        drop(file);

        let config = load(&[
            ("VALID_TANS", "inline-1"),
            ("VALID_TANS_FILE", path.to_str().unwrap()),
        ])
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.valid_tans, vec!["inline-1", "file-1", "file-2"]);
    }

    #[test]
    fn test_unreadable_valid_tans_file() {
        let err = load(&[("VALID_TANS_FILE", "/nonexistent/valid_tans.txt")]).unwrap_err();

        assert!(matches!(err, ConfigError::Io("VALID_TANS_FILE", _)));
        assert!(err.to_string().starts_with("failed to read VALID_TANS_FILE"));
    }
}
