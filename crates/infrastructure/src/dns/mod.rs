pub mod forwarding;
pub mod response_filter;
pub mod server;
pub mod transport;

pub use forwarding::UpstreamForwarder;
pub use response_filter::{ResponseFilterEngine, ResponseFilterHandler};
pub use server::{DnsServerHandler, HickoryResponseWriter, UdpResponseWriter};
