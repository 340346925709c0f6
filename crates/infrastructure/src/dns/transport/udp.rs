//! DNS over UDP (RFC 1035 §4.2.1).
//!
//! The socket is connected to the upstream, so the kernel discards datagrams
//! from any other source. Replies whose id does not match the query are
//! skipped until the deadline.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_respfilter_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    fn failure(&self, reason: impl std::fmt::Display) -> DomainError {
        DomainError::TransportFailure {
            server: self.server_addr.to_string(),
            reason: reason.to_string(),
        }
    }

    async fn connect(&self) -> Result<UdpSocket, DomainError> {
        let local: SocketAddr = match self.server_addr {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| self.failure(format!("bind: {}", e)))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.failure(format!("connect: {}", e)))?;
        Ok(socket)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let Some(query_id) = message_bytes.get(..2) else {
            return Err(self.failure("query shorter than a DNS id"));
        };
        let deadline = Instant::now() + timeout;
        let socket = self.connect().await?;

        tokio::time::timeout_at(deadline, socket.send(message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.failure(format!("send: {}", e)))?;

        debug!(server = %self.server_addr, len = message_bytes.len(), "UDP query sent");

        let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let len = tokio::time::timeout_at(deadline, socket.recv(&mut buf))
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| self.failure(format!("recv: {}", e)))?;

            if buf[..len].get(..2) != Some(query_id) {
                warn!(
                    server = %self.server_addr,
                    len,
                    "Discarding UDP reply with mismatched id"
                );
                continue;
            }

            buf.truncate(len);
            debug!(server = %self.server_addr, len, "UDP response received");

            return Ok(TransportResponse {
                bytes: buf,
                protocol_used: "UDP",
            });
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
