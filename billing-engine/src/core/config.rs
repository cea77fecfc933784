//! Environment-driven configuration, loaded once at startup

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level / `EnvFilter` directive |
/// | LOG_JSON | false (true in production) | JSON log output |
/// | LOG_DIR | (none) | Directory for daily rolling log files |
/// | LOG_RETENTION_DAYS | 14 | Days of rolled log files to keep |
/// | CURRENCY_SIGN | Rs | Prefix for formatted amounts |
///
/// # Example
///
/// ```ignore
/// LOG_LEVEL=debug CURRENCY_SIGN=$ billing-engine invoice invoice.json
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub log_retention_days: u64,
    pub currency_sign: String,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let production = environment == "production";

        Self {
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: var("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(production),
            log_dir: var("LOG_DIR").filter(|d| !d.trim().is_empty()),
            log_retention_days: var("LOG_RETENTION_DAYS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(14),
            currency_sign: var("CURRENCY_SIGN").unwrap_or_else(|| "Rs".into()),
            environment,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]);
        assert!(config.is_development());
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_retention_days, 14);
        assert_eq!(config.currency_sign, "Rs");
    }

    #[test]
    fn test_production_defaults_to_json() {
        let config = load(&[("ENVIRONMENT", "production")]);
        assert!(config.is_production());
        assert!(config.log_json);

        let config = load(&[("ENVIRONMENT", "production"), ("LOG_JSON", "false")]);
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_DIR", "/tmp/billing"),
            ("LOG_RETENTION_DAYS", "not-a-number"),
            ("CURRENCY_SIGN", "$"),
        ]);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/billing"));
        assert_eq!(config.log_retention_days, 14);
        assert_eq!(config.currency_sign, "$");
    }

    #[test]
    fn test_blank_log_dir_is_none() {
        assert_eq!(load(&[("LOG_DIR", "  ")]).log_dir, None);
    }
}
