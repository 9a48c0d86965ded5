use std::fmt;

#[derive(Debug)]
pub enum FinanceError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (out-of-range ratio, zero months, etc.).
    ConfigValidation(String),
    /// IO error (file read, etc.).
    Io(String),
    /// CSV writer error.
    Export(String),
}

impl fmt::Display for FinanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Export(msg) => write!(f, "export error: {msg}"),
        }
    }
}

impl std::error::Error for FinanceError {}
