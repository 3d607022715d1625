use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("empty body")]
    Empty,
}
