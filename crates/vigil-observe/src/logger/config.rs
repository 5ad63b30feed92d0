use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

/// Environment variable overriding the level / directive string.
pub const ENV_LEVEL: &str = "VIGIL_LOG";
/// Environment variable overriding the output format.
pub const ENV_FORMAT: &str = "VIGIL_LOG_FORMAT";
/// Environment variable toggling event targets in the output.
pub const ENV_TARGETS: &str = "VIGIL_LOG_TARGETS";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `"info"` or `"warn,vigil_filter=debug"`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color: std::io::stdout().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Defaults, overridden by `VIGIL_LOG`, `VIGIL_LOG_FORMAT` and `VIGIL_LOG_TARGETS` when set.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(level) = lookup(ENV_LEVEL).filter(|v| !v.trim().is_empty()) {
            cfg.level = level;
        }
        if let Some(format) = lookup(ENV_FORMAT).filter(|v| !v.trim().is_empty()) {
            cfg.format = format.parse()?;
        }
        if let Some(targets) = lookup(ENV_TARGETS).filter(|v| !v.trim().is_empty()) {
            cfg.with_targets = parse_flag(ENV_TARGETS, &targets)?;
        }
        if cfg.format != LoggerFormat::Text {
            cfg.use_color = false;
        }
        Ok(cfg)
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_targets(mut self, with_targets: bool) -> Self {
        self.with_targets = with_targets;
        self
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, LoggerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let cfg = LoggerConfig::from_lookup(|key| match key {
            ENV_LEVEL => Some("debug,vigil_filter=trace".into()),
            ENV_FORMAT => Some("json".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cfg.level, "debug,vigil_filter=trace");
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert!(!cfg.use_color);
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = LoggerConfig::from_lookup(|_| Some("  ".into())).unwrap();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, LoggerFormat::Text);
    }

    #[test]
    fn targets_can_be_switched_off() {
        assert!(LoggerConfig::default().with_targets);

        let cfg = LoggerConfig::from_lookup(|key| (key == ENV_TARGETS).then(|| "Off".into())).unwrap();
        assert!(!cfg.with_targets);

        let cfg = LoggerConfig::from_lookup(|key| (key == ENV_TARGETS).then(|| "1".into())).unwrap();
        assert!(cfg.with_targets);
    }

    #[test]
    fn bad_targets_flag_is_an_error() {
        let res = LoggerConfig::from_lookup(|key| (key == ENV_TARGETS).then(|| "maybe".into()));
        assert!(matches!(
            res,
            Err(LoggerError::InvalidValue { key: ENV_TARGETS, ref value }) if value == "maybe"
        ));
    }

    #[test]
    fn bad_format_is_an_error() {
        let res = LoggerConfig::from_lookup(|key| (key == ENV_FORMAT).then(|| "yaml".into()));
        assert!(matches!(res, Err(LoggerError::InvalidFormat(_))));
    }
}
