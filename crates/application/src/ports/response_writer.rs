use async_trait::async_trait;
use hickory_proto::op::Message;
use std::io;

/// The channel a response leaves through.
///
/// Implementations serialize and send the message to the client. Errors are
/// surfaced as-is to whoever called `write_message`.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write_message(&mut self, response: &Message) -> io::Result<()>;
}
