use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid logger format: {0} (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("journald is not supported on this platform or feature disabled")]
    JournaldNotSupported,
    #[error("logger has been already initialized")]
    AlreadyInitialized,
    #[error("failed to initialize logger: {0}")]
    InitializationFailed(String),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    #[error("invalid value for {key}: {value:?} (expected: true|false)")]
    InvalidValue { key: &'static str, value: String },
}
