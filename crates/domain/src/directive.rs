//! Parser for `block <domain> <cidr> [<cidr> ...]` directives.
//!
//! ```text
//! # comments and blank lines are ignored
//! block abc.com 10.1.1.0/24
//! block xyz.com 192.168.0.0/16 172.16.0.0/12
//! ```

use crate::config::ConfigError;
use crate::rule::{BlockRule, RuleSet};
use ipnetwork::IpNetwork;

const BLOCK_KEYWORD: &str = "block";

/// Parses one directive line. Blank and comment-only lines yield `Ok(None)`.
pub fn parse_directive(line: &str) -> Result<Option<BlockRule>, ConfigError> {
    let line = line.split_once('#').map_or(line, |(directive, _)| directive);
    let mut tokens = line.split_whitespace();

    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };

    if keyword != BLOCK_KEYWORD {
        return Err(ConfigError::UnknownProperty(keyword.to_string()));
    }

    let args: Vec<&str> = tokens.collect();
    if args.len() < 2 {
        return Err(ConfigError::MissingArguments(format!(
            "'{}' needs a domain and at least one CIDR range, got {} argument(s)",
            BLOCK_KEYWORD,
            args.len()
        )));
    }

    let blocks = args[1..]
        .iter()
        .map(|cidr| parse_cidr(cidr))
        .collect::<Result<Vec<_>, _>>()?;

    BlockRule::new(args[0], blocks)
        .map(Some)
        .map_err(|e| ConfigError::Validation(e.to_string()))
}

/// Parses every line into a [`RuleSet`]. Any error rejects the whole set.
pub fn parse_rule_set<I, S>(lines: I) -> Result<RuleSet, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rules = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        match parse_directive(line.as_ref()) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err(e) => {
                return Err(ConfigError::Directive {
                    line: index + 1,
                    source: Box::new(e),
                })
            }
        }
    }

    Ok(RuleSet::new(rules))
}

fn parse_cidr(text: &str) -> Result<IpNetwork, ConfigError> {
    // A bare address would parse as a host route; ranges must spell out the prefix.
    if !text.contains('/') {
        return Err(ConfigError::InvalidCidr {
            cidr: text.to_string(),
            reason: "missing prefix length (e.g., 10.0.0.0/8)".to_string(),
        });
    }

    text.parse::<IpNetwork>()
        .map_err(|e| ConfigError::InvalidCidr {
            cidr: text.to_string(),
            reason: e.to_string(),
        })
}
