use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
