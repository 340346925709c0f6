use anyhow::Context;
use ferrous_respfilter_domain::{CliOverrides, Config, RuleSet};

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Builds the rule set from configuration. Any bad directive is fatal.
pub fn load_rules(config: &Config) -> anyhow::Result<RuleSet> {
    config
        .filter
        .build_rule_set()
        .context("failed to load response filter rules")
}
