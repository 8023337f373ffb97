use thiserror::Error;
pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("No place found for '{query}'")]
    NotFound { query: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("All {attempts} Overpass servers failed")]
    AllServersFailed { attempts: usize },
}
