/// Reply text that does not fit the expected schema.
#[derive(thiserror::Error, Debug)]
pub enum BoundaryError {
    #[error("no JSON {expected} found in service reply")]
    MissingJson { expected: &'static str },

    #[error("malformed JSON in service reply: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced when calling an external service.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("service backend failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error("failed to encode image for transport: {0}")]
    Encode(#[from] image::ImageError),
}
