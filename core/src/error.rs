use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinflowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Delimited text error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    MissingInput { path: String },

    #[error("Data quality checks failed: {failed} check(s) reported failing rows")]
    QualityChecksFailed { failed: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FinflowResult<T> = Result<T, FinflowError>;
