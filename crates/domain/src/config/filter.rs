use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::directive::parse_rule_set;
use crate::rule::RuleSet;

/// Response filtering rules.
///
/// ```toml
/// [filter]
/// rules = [
///     "block abc.com 10.1.1.0/24",
///     "block xyz.com 192.168.0.0/16 172.16.0.0/12",
/// ]
/// rules_file = "/etc/ferrous-respfilter/rules.conf"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub rules: Vec<String>,

    #[serde(default)]
    pub rules_file: Option<String>,
}

impl FilterConfig {
    /// Inline rules first, then the rules file, in that order.
    pub fn build_rule_set(&self) -> Result<RuleSet, ConfigError> {
        let mut lines = self.rules.clone();

        if let Some(path) = &self.rules_file {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::FileRead(path.clone(), e.to_string()))?;
            lines.extend(contents.lines().map(str::to_string));
        }

        parse_rule_set(&lines)
    }
}
