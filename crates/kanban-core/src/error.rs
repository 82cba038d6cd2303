use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    /// The backend answered 401. The session is already cleared when this surfaces.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Request failed: {status}")]
    RequestFailed { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KanbanError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status carried by the error, if the backend produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}
