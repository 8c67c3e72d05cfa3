use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Settings file error: {source}")]
    SettingsFormatError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Inventory store error: {0}")]
    StoreError(String),
}

impl TrackerError {
    /// Process exit code for the command line tool.
    pub fn exit_code(&self) -> i32 {
        match self {
            TrackerError::ConfigError(_) | TrackerError::SettingsFormatError { .. } => 78,
            TrackerError::IoError { .. } => 74,
            TrackerError::CsvSystemError { .. } | TrackerError::CsvDataFormatError(_) => 65,
            TrackerError::StoreError(_) => 1,
        }
    }

    /// Classifies an error from the CSV loaders by its root cause. Failures to
    /// read the file stay I/O errors; everything else is bad data.
    pub fn from_loader(err: anyhow::Error) -> Self {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return TrackerError::IoError {
                source: std::io::Error::new(io.kind(), format!("{:#}", err)),
            };
        }
        match err.downcast::<csv::Error>() {
            Ok(source) => TrackerError::CsvSystemError { source },
            Err(err) => TrackerError::CsvDataFormatError(format!("{:#}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(TrackerError::ConfigError("x".into()).exit_code(), 78);
        assert_eq!(TrackerError::CsvDataFormatError("x".into()).exit_code(), 65);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(TrackerError::from(io).exit_code(), 74);
        assert_eq!(TrackerError::StoreError("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_from_loader_keeps_io_failures() {
        use anyhow::Context;

        let missing: anyhow::Result<()> = Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .context("Failed to open inventory file 'stock.csv'");
        let err = TrackerError::from_loader(missing.unwrap_err());
        assert!(matches!(err, TrackerError::IoError { .. }));
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("stock.csv"));

        let bad_row = TrackerError::from_loader(anyhow::anyhow!("Error parsing 'quantity' at line 3"));
        assert!(matches!(bad_row, TrackerError::CsvDataFormatError(_)));
        assert_eq!(bad_row.exit_code(), 65);
    }
}
