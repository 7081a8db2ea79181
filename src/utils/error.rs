// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 503 Service Unavailable

    #[error("Could not build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Classifies a reqwest failure for `url`. Timeouts are reported the same
    /// way whether they hit while sending or while reading the body.
    pub fn from_reqwest(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else {
            FetchError::Network(err)
        }
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("HTML parsing error: {0}")]
    Parse(String),

    #[error("Table not found: expected a table at index {index}, document has {found}")]
    TableNotFound { index: usize, found: usize },

    #[error("Row {row} has {cells} data cells, cell index {required} is out of range")]
    CellIndex { row: usize, cells: usize, required: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not locate the executable's directory: {0}")]
    ExeDir(#[source] std::io::Error),

    #[error("Invalid YAML in config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config file is not a YAML mapping")]
    NotAMapping,

    #[error("Missing key in config file: {0}")]
    MissingKey(String),

    #[error("Value for key {0} is not a string")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Fetching document failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Output serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_errors_describe_the_structure_problem() {
        let err = ExtractError::TableNotFound { index: 2, found: 1 };
        assert_eq!(
            err.to_string(),
            "Table not found: expected a table at index 2, document has 1"
        );

        let err = ExtractError::CellIndex { row: 4, cells: 2, required: 3 };
        assert_eq!(
            err.to_string(),
            "Row 4 has 2 data cells, cell index 3 is out of range"
        );
    }

    #[test]
    fn app_error_wraps_layer_errors() {
        let app: AppError = ConfigError::MissingKey("onedrive_root".into()).into();
        assert!(matches!(app, AppError::Config(ConfigError::MissingKey(_))));
        assert_eq!(
            app.to_string(),
            "Configuration error: Missing key in config file: onedrive_root"
        );
    }
}
