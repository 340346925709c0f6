pub mod forwarder;
pub mod message_builder;

pub use forwarder::UpstreamForwarder;
pub use message_builder::MessageBuilder;
