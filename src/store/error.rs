use thiserror::Error;

/// Errors talking to the remote entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("record not found in {table}")]
    NotFound { table: String },

    #[error("store returned no row for write on {table}")]
    EmptyWrite { table: String },

    #[error("store request failed with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode store record: {0}")]
    Decode(#[from] serde_json::Error),
}
