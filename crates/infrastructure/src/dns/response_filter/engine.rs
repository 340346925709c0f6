use ferrous_respfilter_application::ports::FilterDecision;
use ferrous_respfilter_domain::RuleSet;
use hickory_proto::op::Message;
use hickory_proto::rr::RData;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub inspected: u64,
    pub blocked: u64,
}

/// Decides whether a response must be suppressed.
///
/// Holds the rule set for the lifetime of the process. Evaluation is
/// synchronous and lock-free, so one engine is shared by every request.
pub struct ResponseFilterEngine {
    rules: RuleSet,
    inspected: AtomicU64,
    blocked: AtomicU64,
}

impl ResponseFilterEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            inspected: AtomicU64::new(0),
            blocked: AtomicU64::new(0),
        }
    }

    /// Scans the answer section in order and stops at the first address
    /// record that hits a rule. Absent or answer-less responses are allowed.
    pub fn evaluate(&self, response: Option<&Message>) -> FilterDecision {
        let Some(response) = response else {
            return FilterDecision::Allow;
        };

        self.inspected.fetch_add(1, Ordering::Relaxed);

        if response.answers().is_empty() || self.rules.is_empty() {
            return FilterDecision::Allow;
        }

        for record in response.answers() {
            let addr = match record.data() {
                RData::A(a) => IpAddr::V4(a.0),
                RData::AAAA(aaaa) => IpAddr::V6(aaaa.0),
                // Aliases carry no address and their targets are not followed.
                RData::CNAME(_) => continue,
                _ => continue,
            };

            let owner = record.name().to_ascii();
            if let Some(matched) = self.rules.find_match(&owner, addr) {
                self.blocked.fetch_add(1, Ordering::Relaxed);
                info!(
                    owner = %owner,
                    address = %addr,
                    rule = %matched.domain,
                    network = %matched.network,
                    "Response blocked"
                );
                return FilterDecision::Block;
            }
        }

        FilterDecision::Allow
    }

    pub fn should_block(&self, response: &Message) -> bool {
        self.evaluate(Some(response)).is_block()
    }

    pub fn stats(&self) -> FilterStats {
        FilterStats {
            inspected: self.inspected.load(Ordering::Relaxed),
            blocked: self.blocked.load(Ordering::Relaxed),
        }
    }
}
