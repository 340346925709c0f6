use super::ResponseWriter;
use async_trait::async_trait;
use ferrous_respfilter_domain::DomainError;
use hickory_proto::op::Message;

/// One step of the request chain.
///
/// A step either answers through `writer` or hands the request to the next
/// step, possibly with a wrapped writer.
#[async_trait]
pub trait QueryHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<(), DomainError>;
}
