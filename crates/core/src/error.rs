#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}
