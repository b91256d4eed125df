use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Missing input: {what}")]
    MissingInput { what: String },

    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl NetworkError {
    pub fn missing(what: impl Into<String>) -> Self {
        NetworkError::MissingInput { what: what.into() }
    }

    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        NetworkError::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Whether the error aborts the build for the whole match.
    ///
    /// Only a bad option combination is reported before any data is read;
    /// everything else means an input the build depends on is unusable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, NetworkError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = NetworkError::missing_column("home tracking", "Period");
        assert_eq!(err.to_string(), "Missing column 'Period' in home tracking");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_invalid_argument_not_fatal() {
        let err = NetworkError::InvalidArgument("pass_value on tracking".into());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: NetworkError = io.into();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
