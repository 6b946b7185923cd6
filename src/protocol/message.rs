use crate::protocol::error::{ProtocolError, Result};
use std::net::SocketAddr;
use stun::addr::MappedAddress;
use stun::error_code::ErrorCodeAttribute;
use stun::agent::TransactionId;
use stun::message::{
    Getter, Message, BINDING_ERROR, BINDING_REQUEST, BINDING_SUCCESS,
};
use stun::xoraddr::XorMappedAddress;
use tracing::debug;

/// Default STUN port when the host flag carries none
pub const STUN_DEFAULT_PORT: u16 = 3478;

/// Builds a Binding request with a fresh random transaction ID
pub fn binding_request() -> Result<Message> {
    let mut msg = Message::new();
    msg.build(&[Box::new(TransactionId::new()), Box::new(BINDING_REQUEST)])?;
    Ok(msg)
}

/// Builds a Binding success response carrying XOR-MAPPED-ADDRESS
pub fn binding_success(transaction_id: TransactionId, mapped: SocketAddr) -> Result<Message> {
    let mut msg = Message::new();
    msg.build(&[
        Box::new(transaction_id),
        Box::new(BINDING_SUCCESS),
        Box::new(XorMappedAddress {
            ip: mapped.ip(),
            port: mapped.port(),
        }),
    ])?;
    Ok(msg)
}

/// Decodes a raw STUN message
pub fn decode(bytes: &[u8]) -> Result<Message> {
    let mut msg = Message::new();
    msg.raw = bytes.to_vec();
    msg.decode()?;
    Ok(msg)
}

/// Extracts the reflexive address from a Binding response.
///
/// XOR-MAPPED-ADDRESS is preferred over the legacy MAPPED-ADDRESS. Error
/// responses are surfaced as [`ProtocolError::ErrorResponse`].
pub fn mapped_address(msg: &Message) -> Result<SocketAddr> {
    if msg.typ == BINDING_ERROR {
        let mut attr = ErrorCodeAttribute::default();
        return Err(match attr.get_from(msg) {
            Ok(()) => ProtocolError::ErrorResponse {
                code: attr.code.0,
                reason: String::from_utf8_lossy(&attr.reason).into_owned(),
            },
            Err(_) => ProtocolError::ErrorResponse {
                code: 0,
                reason: "missing ERROR-CODE attribute".into(),
            },
        });
    }
    if msg.typ != BINDING_SUCCESS {
        return Err(ProtocolError::UnexpectedMessageType(msg.typ.to_string()));
    }

    let mut xor_addr = XorMappedAddress::default();
    if xor_addr.get_from(msg).is_ok() {
        let addr = SocketAddr::new(xor_addr.ip, xor_addr.port);
        debug!(mapped_address = %addr, "Binding response decoded");
        return Ok(addr);
    }

    let mut addr = MappedAddress::default();
    addr.get_from(msg)
        .map_err(|_| ProtocolError::MissingMappedAddress)?;
    debug!(mapped_address = %SocketAddr::new(addr.ip, addr.port), "Legacy MAPPED-ADDRESS used");
    Ok(SocketAddr::new(addr.ip, addr.port))
}
