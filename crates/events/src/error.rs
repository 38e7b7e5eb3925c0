/// Errors raised while receiving or enriching review change events.
///
/// None of these reach end users; the pipeline logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The change payload was not valid JSON of the expected shape.
    #[error("Malformed review change payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The database connection or query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A non-database business lookup failed.
    #[error("Business lookup failed: {0}")]
    Lookup(String),
}
