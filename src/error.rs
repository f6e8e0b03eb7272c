use thiserror::Error;

pub type Result<T> = std::result::Result<T, LensError>;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Document store error: {0}")]
    Store(String),
}

// Every remote-source failure surfaces as the single Fetch condition
// carrying its cause.
impl From<ureq::Error> for LensError {
    fn from(err: ureq::Error) -> Self {
        LensError::Fetch(err.to_string())
    }
}
