mod query_handler;
mod response_filter;
mod response_writer;

pub use query_handler::QueryHandler;
pub use response_filter::FilterDecision;
pub use response_writer::ResponseWriter;

// Re-export for convenience
pub use hickory_proto::op::Message;
