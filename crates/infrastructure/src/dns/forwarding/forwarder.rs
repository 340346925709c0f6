use super::message_builder::MessageBuilder;
use crate::dns::transport::{DnsTransport, TcpTransport, UdpTransport};
use async_trait::async_trait;
use ferrous_respfilter_application::ports::{QueryHandler, ResponseWriter};
use ferrous_respfilter_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

struct Upstream {
    addr: SocketAddr,
    udp: UdpTransport,
    tcp: TcpTransport,
}

/// Resolves queries by forwarding them to upstream servers.
///
/// Servers are tried in order; the first usable answer wins. Truncated UDP
/// answers are retried over TCP against the same server.
pub struct UpstreamForwarder {
    upstreams: Vec<Upstream>,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(servers: Vec<SocketAddr>, timeout: Duration) -> Self {
        let upstreams = servers
            .into_iter()
            .map(|addr| Upstream {
                addr,
                udp: UdpTransport::new(addr),
                tcp: TcpTransport::new(addr),
            })
            .collect();

        Self { upstreams, timeout }
    }

    async fn exchange(&self, query: &[u8], query_id: u16) -> Result<Message, DomainError> {
        for upstream in &self.upstreams {
            match self.exchange_with(upstream, query, query_id).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(server = %upstream.addr, error = %e, "Upstream query failed");
                }
            }
        }

        Err(DomainError::TransportNoHealthyServers)
    }

    async fn exchange_with(
        &self,
        upstream: &Upstream,
        query: &[u8],
        query_id: u16,
    ) -> Result<Message, DomainError> {
        let response = self.send_via(&upstream.udp, query, query_id).await?;

        if !response.truncated() {
            return Ok(response);
        }

        debug!(server = %upstream.addr, "Truncated UDP response, retrying over TCP");
        self.send_via(&upstream.tcp, query, query_id).await
    }

    async fn send_via(
        &self,
        transport: &dyn DnsTransport,
        query: &[u8],
        query_id: u16,
    ) -> Result<Message, DomainError> {
        let raw = transport.send(query, self.timeout).await?;
        let response = MessageBuilder::parse(&raw.bytes)?;

        if response.id() != query_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} response id {} does not match query id {}",
                raw.protocol_used,
                response.id(),
                query_id
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl QueryHandler for UpstreamForwarder {
    fn name(&self) -> &'static str {
        "forward"
    }

    async fn handle(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<(), DomainError> {
        // Upstreams see a fresh id; the client's id is restored on the way back.
        let query_id = fastrand::u16(..);
        let mut query = request.clone();
        let mut header = *query.header();
        header.set_id(query_id);
        query.set_header(header);
        let query_bytes = MessageBuilder::serialize(&query)?;

        match self.exchange(&query_bytes, query_id).await {
            Ok(mut response) => {
                let mut header = *response.header();
                header.set_id(request.id());
                response.set_header(header);
                debug!(
                    answers = response.answers().len(),
                    rcode = ?response.response_code(),
                    "Upstream response received"
                );
                writer.write_message(&response).await?;
                Ok(())
            }
            Err(e) => {
                let servfail = MessageBuilder::error_response(request, ResponseCode::ServFail);
                writer.write_message(&servfail).await?;
                Err(e)
            }
        }
    }
}
