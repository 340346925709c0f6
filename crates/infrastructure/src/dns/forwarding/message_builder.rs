//! DNS message helpers
//!
//! Wire encoding/decoding with `hickory-proto` plus construction of the
//! header-only error responses the pipeline sends (FORMERR, SERVFAIL, REFUSED).

use ferrous_respfilter_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

const DNS_HEADER_LEN: usize = 12;
const QR_BIT: u8 = 0x80;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Serialize a Message to wire format bytes
    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    pub fn parse(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS message: {}", e))
        })
    }

    /// Response to `request` carrying only `code`.
    ///
    /// Mirrors the id, op code, RD/CD flags and the first question; answer,
    /// authority and additional sections stay empty.
    pub fn error_response(request: &Message, code: ResponseCode) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response
            .set_recursion_desired(request.recursion_desired())
            .set_checking_disabled(request.checking_disabled())
            .set_recursion_available(true)
            .set_response_code(code);

        if let Some(query) = request.queries().first() {
            response.add_query(query.clone());
        }
        response
    }

    /// Header and question of `response` with TC set and no records.
    ///
    /// Sent to UDP clients when the full answer exceeds their payload size.
    pub fn truncated(response: &Message) -> Message {
        let mut truncated =
            Message::new(response.id(), MessageType::Response, response.op_code());
        truncated
            .set_recursion_desired(response.recursion_desired())
            .set_recursion_available(response.recursion_available())
            .set_checking_disabled(response.checking_disabled())
            .set_authoritative(response.authoritative())
            .set_response_code(response.response_code())
            .set_truncated(true)
            .add_queries(response.queries().to_vec());
        truncated
    }

    /// FORMERR for a request that could not be decoded.
    ///
    /// Returns `None` when not even the 12-byte header is present, or when
    /// the QR bit marks the datagram as a response.
    pub fn format_error_for_raw(raw_request: &[u8]) -> Option<Message> {
        if raw_request.len() < DNS_HEADER_LEN || raw_request[2] & QR_BIT != 0 {
            return None;
        }

        let id = u16::from_be_bytes([raw_request[0], raw_request[1]]);
        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_response_code(ResponseCode::FormErr);
        Some(response)
    }
}
