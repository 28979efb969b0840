use thiserror::Error;

/// Failure of a single request against the dish service.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Transport(Box<reqwest::Error>),

    #[error("{0}")]
    Service(String),

    /// The service answered, but its payload did not describe a usable dish.
    #[error("{0}")]
    Malformed(String),

    /// The response body could not be read as JSON at all.
    #[error("Unreadable response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else {
            FetchError::Transport(Box::new(error))
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Malformed(error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum DishSwipeError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("GUI error: {0}")]
    Gui(Box<eframe::Error>),
}

impl From<std::io::Error> for DishSwipeError {
    fn from(error: std::io::Error) -> Self {
        DishSwipeError::Io(Box::new(error))
    }
}

impl From<eframe::Error> for DishSwipeError {
    fn from(error: eframe::Error) -> Self {
        DishSwipeError::Gui(Box::new(error))
    }
}

impl From<reqwest::Error> for DishSwipeError {
    fn from(error: reqwest::Error) -> Self {
        DishSwipeError::Reqwest(Box::new(error))
    }
}

/// Why a dish record was rejected before reaching the queue or the card.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDish {
    #[error("dish record is not an object")]
    NotAnObject,

    #[error("dish record has no name")]
    MissingName,
}
