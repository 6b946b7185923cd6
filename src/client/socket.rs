use crate::client::constants::RECV_BUFFER_SIZE;
use crate::client::error::{ClientError, Result};
use crate::protocol::{binding_request, decode, mapped_address};
use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Trait for a connection able to perform STUN binding transactions
pub trait StunSocket {
    /// Send one binding request and wait for its response.
    ///
    /// Returns the reflexive address reported by the server. A single attempt
    /// is made; exceeding `timeout` yields [`ClientError::Timeout`].
    fn binding_request(&mut self, timeout: Duration) -> Result<SocketAddr>;

    /// Release the connection. Further requests fail.
    fn close(&mut self) -> Result<()>;
}

/// UDP-based implementation of StunSocket, connected to a single server
#[derive(Debug)]
pub struct UdpStunSocket {
    socket: Option<UdpSocket>,
    server: SocketAddr,
}

impl UdpStunSocket {
    /// Resolve `addr` and connect a UDP socket of the matching family to it
    pub fn connect(addr: &str) -> Result<Self> {
        debug!(addr = addr, "Resolving STUN server");
        let server = addr
            .to_socket_addrs()
            .map_err(|e| {
                warn!(error = %e, "Failed to resolve server address");
                ClientError::Socket(format!("Failed to resolve {}: {}", addr, e))
            })?
            .next()
            .ok_or_else(|| ClientError::Socket(format!("No addresses found for {}", addr)))?;

        let local = match server {
            SocketAddr::V4(_) => "0.0.0.0:0",
            SocketAddr::V6(_) => "[::]:0",
        };
        let socket = UdpSocket::bind(local).map_err(|e| {
            warn!(error = %e, "Failed to bind socket");
            ClientError::Socket(format!("Failed to bind to {}: {}", local, e))
        })?;
        socket.connect(server).map_err(|e| {
            warn!(error = %e, "Failed to connect socket");
            ClientError::Socket(format!("Failed to connect to {}: {}", server, e))
        })?;
        debug!(%server, "Socket connected successfully");

        Ok(Self {
            socket: Some(socket),
            server,
        })
    }

    /// The resolved server address
    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// The local address the socket is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.open_socket()?.local_addr()?)
    }

    fn open_socket(&self) -> Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| ClientError::Socket("socket is closed".into()))
    }
}

impl StunSocket for UdpStunSocket {
    fn binding_request(&mut self, timeout: Duration) -> Result<SocketAddr> {
        let socket = self.open_socket()?;
        let request = binding_request()?;
        socket.send(&request.raw)?;
        debug!(transaction_id = ?request.transaction_id.0, "Binding request sent");

        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ClientError::Timeout(timeout));
            }
            socket.set_read_timeout(Some(remaining))?;

            let len = match socket.recv(&mut buf) {
                Ok(len) => len,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    debug!("Binding request timed out");
                    return Err(ClientError::Timeout(timeout));
                }
                Err(e) => return Err(e.into()),
            };

            let response = match decode(&buf[..len]) {
                Ok(response) => response,
                Err(e) => {
                    debug!(bytes = len, error = %e, "Discarding undecodable datagram");
                    continue;
                }
            };
            // Late answers to earlier, timed-out requests share the socket
            if response.transaction_id != request.transaction_id {
                debug!(bytes = len, "Discarding response for another transaction");
                continue;
            }

            return Ok(mapped_address(&response)?);
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.socket.take().is_some() {
            debug!(server = %self.server, "Socket closed");
        }
        Ok(())
    }
}


#[cfg(test)]
pub use tests::MockStunSocket;
