use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Navigation error: {0}")]
    Navigation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
