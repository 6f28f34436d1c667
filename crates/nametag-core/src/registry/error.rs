use thiserror::Error;

use nametag_model::EntityId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(String),

    #[error("corrupt registry document: {0}")]
    Corrupt(String),

    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for RegistryError {
    fn from(e: std::io::Error) -> Self {
        RegistryError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Corrupt(e.to_string())
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
