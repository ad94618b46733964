use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinakesError {
    #[error("network error: {0}")]
    Network(String),

    #[error("GitHub API error {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PinakesError>;
