use school_finder_sources::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolFinderError {
    #[error("Please enter a city")]
    EmptyInput,
    #[error("City not found: {city}")]
    NotFound { city: String },
    #[error("Service error: {0}")]
    ServiceError(#[source] SourceError),
    #[error("No schools found in {city}")]
    NoResults { city: String },
    #[error("Search superseded by a newer search")]
    Superseded,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SourceError> for SchoolFinderError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { query } => Self::NotFound { city: query },
            other => Self::ServiceError(other),
        }
    }
}

impl SchoolFinderError {
    /// The single line shown in the transient error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "Please enter a city",
            Self::NotFound { .. } => "City not found",
            Self::NoResults { .. } => "No schools found in this area",
            _ => "Search failed",
        }
    }

    /// Whether the presentation layer should show this error at all.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Superseded)
    }
}

pub type Result<T> = std::result::Result<T, SchoolFinderError>;
