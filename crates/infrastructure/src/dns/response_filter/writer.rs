use super::engine::ResponseFilterEngine;
use super::refusal::build_refusal;
use async_trait::async_trait;
use ferrous_respfilter_application::ports::{FilterDecision, ResponseWriter};
use hickory_proto::op::Message;
use std::io;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptState {
    Pending,
    Evaluated(FilterDecision),
    Sent,
}

/// Wraps the real response channel for one request.
///
/// Every response written through it is run past the engine; a blocked one
/// is swapped for a refusal built from the original request. Exactly one
/// write reaches the inner channel, and its result is returned untouched.
pub struct FilteringResponseWriter<'a> {
    inner: &'a mut dyn ResponseWriter,
    engine: &'a ResponseFilterEngine,
    request: &'a Message,
    state: InterceptState,
}

impl<'a> FilteringResponseWriter<'a> {
    pub fn new(
        inner: &'a mut dyn ResponseWriter,
        engine: &'a ResponseFilterEngine,
        request: &'a Message,
    ) -> Self {
        Self {
            inner,
            engine,
            request,
            state: InterceptState::Pending,
        }
    }

    pub fn state(&self) -> InterceptState {
        self.state
    }
}

#[async_trait]
impl ResponseWriter for FilteringResponseWriter<'_> {
    async fn write_message(&mut self, response: &Message) -> io::Result<()> {
        if self.state == InterceptState::Sent {
            warn!(id = self.request.id(), "Response already sent for this request");
            return Err(io::Error::other("response already sent for this request"));
        }

        let decision = self.engine.evaluate(Some(response));
        self.state = InterceptState::Evaluated(decision);

        let result = match decision {
            FilterDecision::Block => {
                let refusal = build_refusal(self.request);
                self.inner.write_message(&refusal).await
            }
            FilterDecision::Allow => {
                debug!(id = response.id(), "Response allowed");
                self.inner.write_message(response).await
            }
        };

        self.state = InterceptState::Sent;
        result
    }
}
