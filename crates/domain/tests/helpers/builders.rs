#![allow(dead_code)]
use ferrous_respfilter_domain::{BlockRule, RuleSet};
use ipnetwork::IpNetwork;

pub struct RuleSetBuilder {
    rules: Vec<BlockRule>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn block(mut self, domain: &str, cidrs: &[&str]) -> Self {
        let blocks: Vec<IpNetwork> = cidrs.iter().map(|c| c.parse().unwrap()).collect();
        self.rules.push(BlockRule::new(domain, blocks).unwrap());
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet::new(self.rules)
    }
}
