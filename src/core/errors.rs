use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Invalid Google Sheet URL: {0}")]
    InvalidReference(String),

    #[error("Request failed ({0})")]
    HttpStatus(u16),

    #[error("Request failed: {0}")]
    Network(Box<reqwest::Error>),

    #[error("No valid cards found. Use any two populated columns (or headers like front/back).")]
    EmptyDeck,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("DeckError: {0}")]
    Custom(String),
}

impl DeckError {
    /// Network errors and non-2xx responses.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, DeckError::HttpStatus(_) | DeckError::Network(_))
    }
}

impl From<std::io::Error> for DeckError {
    fn from(error: std::io::Error) -> Self {
        DeckError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for DeckError {
    fn from(error: reqwest::Error) -> Self {
        DeckError::Network(Box::new(error))
    }
}
