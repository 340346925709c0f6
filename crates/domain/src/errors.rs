use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("No healthy upstream servers available")]
    TransportNoHealthyServers,

    /// Failure while writing a response to the client. Carried verbatim.
    #[error(transparent)]
    Transmission(#[from] std::io::Error),
}
