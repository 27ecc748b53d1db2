use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    #[allow(dead_code)] // Raised by persistent backends; the in-memory store cannot fail
    Backend(String),
}
