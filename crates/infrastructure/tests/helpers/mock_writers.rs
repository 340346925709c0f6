#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_respfilter_application::ports::ResponseWriter;
use hickory_proto::op::Message;
use std::io;

/// Keeps every message written to it.
#[derive(Default)]
pub struct RecordingWriter {
    pub written: Vec<Message>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(&self) -> &Message {
        assert_eq!(self.written.len(), 1, "expected exactly one write");
        &self.written[0]
    }
}

#[async_trait]
impl ResponseWriter for RecordingWriter {
    async fn write_message(&mut self, response: &Message) -> io::Result<()> {
        self.written.push(response.clone());
        Ok(())
    }
}

/// Fails every write with the configured error kind.
pub struct FailingWriter {
    pub kind: io::ErrorKind,
    pub attempts: usize,
}

impl FailingWriter {
    pub fn new(kind: io::ErrorKind) -> Self {
        Self { kind, attempts: 0 }
    }
}

#[async_trait]
impl ResponseWriter for FailingWriter {
    async fn write_message(&mut self, _response: &Message) -> io::Result<()> {
        self.attempts += 1;
        Err(io::Error::new(self.kind, "mock transmission failure"))
    }
}
