use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops a dataset from loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// The source could not be reached or its payload could not be parsed.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("failed to fetch {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("malformed arrow batch")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("malformed data: {0}")]
    Malformed(String),
    #[error("unsupported source format: {0}")]
    Unsupported(String),
}

/// One or more expected columns are absent from the header row.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required column(s): {}", missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::DataSource(e.into())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::DataSource(e.into())
    }
}

impl From<parquet::errors::ParquetError> for LoadError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        LoadError::DataSource(e.into())
    }
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(e: arrow::error::ArrowError) -> Self {
        LoadError::DataSource(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_column() {
        let e = SchemaError {
            missing: vec!["Brand Name".into(), "Care homes beds".into()],
        };
        assert_eq!(
            e.to_string(),
            "missing required column(s): Brand Name, Care homes beds"
        );
    }

    #[test]
    fn load_error_is_transparent() {
        let e: LoadError = DataSourceError::Status {
            url: "https://example.org/x.csv".into(),
            status: 404,
        }
        .into();
        assert_eq!(e.to_string(), "https://example.org/x.csv answered with HTTP 404");
    }
}
