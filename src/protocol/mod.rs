//! STUN Binding transactions on top of the `stun` crate

pub mod error;
pub mod message;

pub use error::{ProtocolError, Result as ProtocolResult};
pub use message::{binding_request, binding_success, decode, mapped_address, STUN_DEFAULT_PORT};
pub use stun::agent::TransactionId;
pub use stun::message::{Message, MESSAGE_HEADER_SIZE};
