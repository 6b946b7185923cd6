use thiserror::Error;

/// Protocol-level errors for STUN message handling
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed STUN message: {0}")]
    Stun(#[from] stun::Error),

    #[error("Unexpected message type: {0}")]
    UnexpectedMessageType(String),

    #[error("Server returned error response {code}: {reason}")]
    ErrorResponse { code: u16, reason: String },

    #[error("No mapped address in response")]
    MissingMappedAddress,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
