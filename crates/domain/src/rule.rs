use crate::fqdn::{is_subdomain, normalize_fqdn};
use crate::DomainError;
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::sync::Arc;

/// A domain suffix paired with the network ranges its answers must not resolve into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    domain: Arc<str>,
    blocks: Vec<IpNetwork>,
}

impl BlockRule {
    pub fn new(domain: &str, blocks: Vec<IpNetwork>) -> Result<Self, DomainError> {
        let domain = normalize_fqdn(domain)?;

        if blocks.is_empty() {
            return Err(DomainError::InvalidCidr(format!(
                "rule for {} has no network ranges",
                domain
            )));
        }

        // Keep the masked network so 10.1.1.5/24 is stored as 10.1.1.0/24.
        let blocks = blocks
            .into_iter()
            .map(|net| IpNetwork::new(net.network(), net.prefix()).unwrap_or(net))
            .collect();

        Ok(Self { domain, blocks })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn blocks(&self) -> &[IpNetwork] {
        &self.blocks
    }

    #[inline]
    pub fn matches_domain(&self, name: &str) -> bool {
        is_subdomain(name, &self.domain)
    }

    /// First range, in storage order, containing `addr`.
    /// Ranges of the other address family never contain it.
    #[inline]
    pub fn find_block(&self, addr: IpAddr) -> Option<&IpNetwork> {
        self.blocks.iter().find(|net| net.contains(addr))
    }
}

/// The rule and range that caused a block decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub domain: &'a str,
    pub network: &'a IpNetwork,
}

/// Ordered, immutable collection of [`BlockRule`]s.
///
/// Built once at startup and shared between requests; clones share storage.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Arc<[BlockRule]>,
}

impl RuleSet {
    pub fn new(rules: Vec<BlockRule>) -> Self {
        Self {
            rules: Arc::from(rules),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockRule> {
        self.rules.iter()
    }

    /// Whether any rule covers `owner` and holds a range containing `addr`.
    pub fn is_blocked(&self, owner: &str, addr: IpAddr) -> bool {
        self.find_match(owner, addr).is_some()
    }

    /// First rule (in store order) and first range within it matching both conditions.
    pub fn find_match(&self, owner: &str, addr: IpAddr) -> Option<RuleMatch<'_>> {
        self.rules
            .iter()
            .filter(|rule| rule.matches_domain(owner))
            .find_map(|rule| {
                rule.find_block(addr).map(|network| RuleMatch {
                    domain: rule.domain(),
                    network,
                })
            })
    }
}
