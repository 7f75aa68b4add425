use thiserror::Error;

/// Errors from storage collaborators (comment repository, rate-limit store).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Outcomes of the submit pipeline that terminate a request.
///
/// Every variant is terminal for its request; nothing is retried.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("posting too frequently")]
    RateLimited,

    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}
