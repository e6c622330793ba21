//! Error types for wayfinder-nav

use thiserror::Error;
use wayfinder_core::Error as CoreError;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl From<NavError> for CoreError {
    fn from(err: NavError) -> Self {
        CoreError::Navigation(format!("{}", err))
    }
}
