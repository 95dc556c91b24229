use std::fmt;

#[derive(Debug)]
pub(crate) enum ParserError {
    NotFound,
    MissingDatabase,
    Execute,
}

impl std::error::Error for ParserError {}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::NotFound => write!(f, "Parser executable not found"),
            ParserError::MissingDatabase => write!(f, "Amcache database file not found"),
            ParserError::Execute => write!(f, "Could not execute parser"),
        }
    }
}
