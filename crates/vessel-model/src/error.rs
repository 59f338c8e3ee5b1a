use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid reference id: {0:?}")]
    InvalidReferenceId(String),
    #[error("unknown field kind: {0}")]
    UnknownFieldKind(String),
    #[error("outcome status {stored} does not match its issues ({derived})")]
    StatusMismatch {
        stored: crate::RecordStatus,
        derived: crate::RecordStatus,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
