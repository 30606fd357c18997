//! parse the engine settings document. The document is TOML; keys may sit at the
//! top level or under an `[engine]` title:
//!
//! ```toml
//! [engine]
//! max_order = 5
//! strict = true
//! loglevel = "warn"
//! ```
//! If some field is not found in the document it keeps its default value.
use crate::symbolic::errors::ConfigError;
use std::path::Path;
use toml::{Table, Value};

/// Limits and behaviour switches of the derivative engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Highest derivative order a single call may request.
    pub max_order: usize,
    /// Turn unparseable input and unmatched terms into errors instead of
    /// passing them through unchanged.
    pub strict: bool,
    /// "debug", "info", "warn", "error" or "off"; `None` leaves logging alone.
    pub loglevel: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_order: 10,
            strict: false,
            loglevel: None,
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let document: Table = toml::from_str(input)?;
        let section = match document.get("engine") {
            Some(Value::Table(engine)) => engine,
            Some(_) => return Err(invalid("engine", "expected a table")),
            None => &document,
        };
        let mut config = EngineConfig::default();
        for (key, value) in section {
            match key.as_str() {
                "max_order" => {
                    let order = value
                        .as_integer()
                        .ok_or_else(|| invalid(key, "expected an integer"))?;
                    if order < 1 {
                        return Err(invalid(key, "must be at least 1"));
                    }
                    config.max_order = order as usize;
                }
                "strict" => {
                    config.strict = value
                        .as_bool()
                        .ok_or_else(|| invalid(key, "expected true or false"))?;
                }
                "loglevel" => {
                    let level = value
                        .as_str()
                        .ok_or_else(|| invalid(key, "expected a string"))?;
                    if crate::Utils::logger::level_filter(Some(level)).is_none() {
                        return Err(invalid(key, "expected debug, info, warn, error or off"));
                    }
                    config.loglevel = Some(level.to_string());
                }
                _ => log::warn!("unknown engine setting '{}' ignored", key),
            }
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_order, 10);
        assert!(!config.strict);
        assert_eq!(config.loglevel, None);
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_top_level_keys() {
        let config = EngineConfig::from_toml_str("max_order = 3\nstrict = true").unwrap();
        assert_eq!(config.max_order, 3);
        assert!(config.strict);
    }

    #[test]
    fn test_engine_section() {
        let doc = "[engine]\nmax_order = 5\nloglevel = \"warn\"\n";
        let config = EngineConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.max_order, 5);
        assert!(!config.strict);
        assert_eq!(config.loglevel.as_deref(), Some("warn"));
    }

    #[test]
    fn test_invalid_fields() {
        assert!(matches!(
            EngineConfig::from_toml_str("max_order = 0"),
            Err(ConfigError::InvalidField { .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("strict = \"yes\""),
            Err(ConfigError::InvalidField { .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("loglevel = \"loud\""),
            Err(ConfigError::InvalidField { .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("max_order = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nstrict = true").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(config.strict);
        assert!(matches!(
            EngineConfig::from_file("no/such/engine.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
