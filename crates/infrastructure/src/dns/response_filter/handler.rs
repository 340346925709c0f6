use super::engine::ResponseFilterEngine;
use super::writer::FilteringResponseWriter;
use async_trait::async_trait;
use ferrous_respfilter_application::ports::{QueryHandler, ResponseWriter};
use ferrous_respfilter_domain::DomainError;
use hickory_proto::op::Message;
use std::sync::Arc;

/// Chain step that filters whatever the next step answers.
pub struct ResponseFilterHandler {
    next: Arc<dyn QueryHandler>,
    engine: Arc<ResponseFilterEngine>,
}

impl ResponseFilterHandler {
    pub fn new(next: Arc<dyn QueryHandler>, engine: Arc<ResponseFilterEngine>) -> Self {
        Self { next, engine }
    }
}

#[async_trait]
impl QueryHandler for ResponseFilterHandler {
    fn name(&self) -> &'static str {
        "responsefilter"
    }

    async fn handle(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<(), DomainError> {
        let mut filtered = FilteringResponseWriter::new(writer, &self.engine, request);
        self.next.handle(request, &mut filtered).await
    }
}
