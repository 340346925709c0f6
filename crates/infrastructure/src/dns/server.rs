use crate::dns::forwarding::MessageBuilder;
use async_trait::async_trait;
use ferrous_respfilter_application::ports::{QueryHandler, ResponseWriter};
use ferrous_respfilter_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error};

/// Smallest payload every DNS client accepts over UDP.
const MIN_UDP_PAYLOAD: usize = 512;

enum Inbound {
    Query(Message),
    Malformed(Message),
    Ignored,
}

/// Entry point for requests coming off a socket.
///
/// UDP datagrams are decoded here; TCP connections are served by
/// `hickory_server::ServerFuture`, which reaches the chain through the
/// [`RequestHandler`] impl.
#[derive(Clone)]
pub struct DnsServerHandler {
    chain: Arc<dyn QueryHandler>,
}

impl DnsServerHandler {
    pub fn new(chain: Arc<dyn QueryHandler>) -> Self {
        Self { chain }
    }

    /// Decodes one UDP datagram and answers `peer` on `socket`.
    ///
    /// Undecodable queries get FORMERR when their id is recoverable and are
    /// dropped otherwise. Messages that are not queries are ignored. Answers
    /// larger than the client's payload size go out truncated with TC set.
    pub async fn handle_udp(
        &self,
        raw: &[u8],
        socket: Arc<UdpSocket>,
        peer: SocketAddr,
    ) -> Result<(), DomainError> {
        match decode(raw) {
            Inbound::Query(request) => {
                let max_payload = usize::from(request.max_payload());
                let mut writer = UdpResponseWriter::new(socket, peer, max_payload);
                self.handle_query(&request, &mut writer).await
            }
            Inbound::Malformed(formerr) => {
                let mut writer = UdpResponseWriter::new(socket, peer, MIN_UDP_PAYLOAD);
                writer.write_message(&formerr).await?;
                Ok(())
            }
            Inbound::Ignored => Ok(()),
        }
    }

    pub async fn handle_query(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<(), DomainError> {
        if let Some(query) = request.queries().first() {
            debug!(
                id = request.id(),
                domain = %query.name(),
                record_type = ?query.query_type(),
                handler = self.chain.name(),
                "DNS query received"
            );
        }

        self.chain.handle(request, writer).await
    }
}

fn decode(raw: &[u8]) -> Inbound {
    let request = match MessageBuilder::parse(raw) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, len = raw.len(), "Malformed DNS request");
            return MessageBuilder::format_error_for_raw(raw)
                .map_or(Inbound::Ignored, Inbound::Malformed);
        }
    };

    if request.message_type() != MessageType::Query {
        debug!(id = request.id(), "Ignoring non-query message");
        return Inbound::Ignored;
    }

    Inbound::Query(request)
}

/// Rebuilds the chain's view of a request decoded by `hickory-server`.
fn request_message(request: &Request) -> Option<Message> {
    let info = match request.request_info() {
        Ok(info) => info,
        Err(e) => {
            debug!(error = %e, "Failed to parse request info");
            return None;
        }
    };

    let header = request.header();
    let mut message = Message::new(header.id(), header.message_type(), header.op_code());
    message
        .set_recursion_desired(header.recursion_desired())
        .set_checking_disabled(header.checking_disabled())
        .add_query(info.query.original().clone());
    Some(message)
}

#[async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        let mut writer = HickoryResponseWriter::new(request, response_handle);

        let Some(message) = request_message(request) else {
            let header = request.header();
            let mut formerr = Message::new(header.id(), MessageType::Response, header.op_code());
            formerr.set_response_code(ResponseCode::FormErr);
            if let Err(e) = writer.write_message(&formerr).await {
                error!(error = %e, "Failed to send FORMERR response");
            }
            return writer.into_info();
        };

        if message.message_type() != MessageType::Query {
            debug!(id = message.id(), "Ignoring non-query message");
            return writer.into_info();
        }

        if let Err(e) = self.handle_query(&message, &mut writer).await {
            debug!(id = message.id(), error = %e, "TCP request failed");
        }
        writer.into_info()
    }
}

fn encode(response: &Message) -> io::Result<Vec<u8>> {
    MessageBuilder::serialize(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

/// Sends responses back to one UDP peer.
pub struct UdpResponseWriter {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    max_payload: usize,
}

impl UdpResponseWriter {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr, max_payload: usize) -> Self {
        Self {
            socket,
            peer,
            max_payload: max_payload.max(MIN_UDP_PAYLOAD),
        }
    }
}

#[async_trait]
impl ResponseWriter for UdpResponseWriter {
    async fn write_message(&mut self, response: &Message) -> io::Result<()> {
        let mut bytes = encode(response)?;

        if bytes.len() > self.max_payload {
            debug!(
                id = response.id(),
                size = bytes.len(),
                max_payload = self.max_payload,
                "Response exceeds client payload size, truncating"
            );
            bytes = encode(&MessageBuilder::truncated(response))?;
        }

        self.socket.send_to(&bytes, self.peer).await?;
        Ok(())
    }
}

/// Adapts a `hickory-server` response handle to [`ResponseWriter`].
///
/// The question section and EDNS come from the original request; header,
/// answer, authority and additional records from the chain's response.
pub struct HickoryResponseWriter<'a, R> {
    request: &'a Request,
    handle: R,
    info: Option<ResponseInfo>,
}

impl<'a, R: ResponseHandler> HickoryResponseWriter<'a, R> {
    pub fn new(request: &'a Request, handle: R) -> Self {
        Self {
            request,
            handle,
            info: None,
        }
    }

    /// Info of the response sent, or the request header when nothing went out.
    pub fn into_info(self) -> ResponseInfo {
        self.info
            .unwrap_or_else(|| ResponseInfo::from(*self.request.header()))
    }
}

#[async_trait]
impl<R: ResponseHandler> ResponseWriter for HickoryResponseWriter<'_, R> {
    async fn write_message(&mut self, response: &Message) -> io::Result<()> {
        let builder = MessageResponseBuilder::from_message_request(self.request);
        let message_response = builder.build(
            *response.header(),
            response.answers(),
            response.name_servers(),
            &[] as &[Record],
            response.additionals(),
        );

        let info = self.handle.send_response(message_response).await?;
        self.info = Some(info);
        Ok(())
    }
}
