//! Response filtering.
//!
//! Answers whose A/AAAA records resolve into a configured network range for
//! a matching domain are replaced with a REFUSED response before they reach
//! the client.

pub mod engine;
pub mod handler;
pub mod refusal;
pub mod writer;

pub use engine::{FilterStats, ResponseFilterEngine};
pub use handler::ResponseFilterHandler;
pub use refusal::build_refusal;
pub use writer::{FilteringResponseWriter, InterceptState};
