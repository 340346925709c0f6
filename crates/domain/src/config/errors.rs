#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Missing arguments: {0}")]
    MissingArguments(String),

    #[error("Invalid CIDR '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    #[error("Rule directive on line {line}: {source}")]
    Directive {
        line: usize,
        source: Box<ConfigError>,
    },
}
