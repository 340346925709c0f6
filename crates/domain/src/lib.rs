//! Ferrous Response Filter Domain Layer
pub mod config;
pub mod directive;
pub mod errors;
pub mod fqdn;
pub mod rule;

pub use config::{CliOverrides, Config, ConfigError};
pub use directive::{parse_directive, parse_rule_set};
pub use errors::DomainError;
pub use fqdn::{is_subdomain, normalize_fqdn};
pub use rule::{BlockRule, RuleMatch, RuleSet};
