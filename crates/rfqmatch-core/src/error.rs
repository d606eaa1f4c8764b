use thiserror::Error;

/// Fatal error taxonomy for one match call. Per-candidate anomalies (a
/// single unusable catalog entry) are not errors: they are skipped, counted
/// and logged by the retriever.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Retrieval failure: {0}")]
    RetrievalFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
