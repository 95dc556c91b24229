use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    NoFile,
    BadToml,
    CreateDirectory,
    LogFile,
    Merge,
}

impl std::error::Error for CoreError {}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::NoFile => write!(f, "Could not read TOML file"),
            CoreError::BadToml => write!(f, "Failed to parse TOML data"),
            CoreError::CreateDirectory => write!(f, "Could not create output directory"),
            CoreError::LogFile => write!(f, "Could not create log file"),
            CoreError::Merge => write!(f, "Failed to merge CSV output"),
        }
    }
}
