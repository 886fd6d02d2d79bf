use thiserror::Error;

/// Errors from storage collaborators (recipe catalog, plan history, staples).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("Recipe title already exists: {0}")]
    DuplicateTitle(String),

    #[error("Not found")]
    NotFound,
}

/// Errors from plan generation. Note that an over-constrained or empty
/// catalog is not an error: the planner degrades to recipe-less entries.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    CsvEncoding(#[from] std::string::FromUtf8Error),

    #[error("CSV buffer write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
