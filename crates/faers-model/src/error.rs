use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid field path '{0}': expected 1 or 2 non-empty dot-separated segments")]
    InvalidFieldPath(String),
    #[error("invalid patient id '{0}'")]
    InvalidPatientId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
