use crate::dns::forwarding::MessageBuilder;
use hickory_proto::op::{Message, ResponseCode};

/// REFUSED answer substituted for a blocked response.
///
/// Keeps the request's id and question so the client can match it; carries
/// no answer, authority or additional records.
pub fn build_refusal(request: &Message) -> Message {
    MessageBuilder::error_response(request, ResponseCode::Refused)
}
