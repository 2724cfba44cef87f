use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Invalid percentage format: {0}")]
    Format(String),
}

pub type NormalizeResult<T> = Result<T, NormalizeError>;
