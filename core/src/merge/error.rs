use std::fmt;

#[derive(Debug)]
pub(crate) enum MergeError {
    ReadCsv,
    NoHeaders,
    TooManyFields,
    MissingColumn,
    WriteCsv,
}

impl std::error::Error for MergeError {}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::ReadCsv => write!(f, "Could not read CSV file"),
            MergeError::NoHeaders => write!(f, "CSV file has no header row"),
            MergeError::TooManyFields => write!(f, "CSV row has more fields than the header"),
            MergeError::MissingColumn => write!(f, "CSV file is missing its timestamp column"),
            MergeError::WriteCsv => write!(f, "Could not write CSV file"),
        }
    }
}
