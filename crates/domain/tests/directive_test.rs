use ferrous_respfilter_domain::{parse_directive, parse_rule_set, ConfigError};
use std::net::IpAddr;

#[test]
fn test_parse_single_range() {
    let rule = parse_directive("block abc.com 10.1.1.0/24").unwrap().unwrap();

    assert_eq!(rule.domain(), "abc.com.");
    assert_eq!(rule.blocks().len(), 1);
    assert_eq!(rule.blocks()[0].to_string(), "10.1.1.0/24");
}

#[test]
fn test_parse_multiple_ranges_keeps_order() {
    let rule = parse_directive("block xyz.com 192.168.0.0/16 172.16.0.0/12 2001:db8::/32")
        .unwrap()
        .unwrap();

    let ranges: Vec<String> = rule.blocks().iter().map(|n| n.to_string()).collect();
    assert_eq!(ranges, vec!["192.168.0.0/16", "172.16.0.0/12", "2001:db8::/32"]);
}

#[test]
fn test_blank_and_comment_lines_are_skipped() {
    assert!(parse_directive("").unwrap().is_none());
    assert!(parse_directive("    ").unwrap().is_none());
    assert!(parse_directive("# block abc.com 10.0.0.0/8").unwrap().is_none());
}

#[test]
fn test_missing_arguments() {
    let err = parse_directive("block abc.com").unwrap_err();
    assert!(matches!(err, ConfigError::MissingArguments(_)));

    let err = parse_directive("block").unwrap_err();
    assert!(matches!(err, ConfigError::MissingArguments(_)));
}

#[test]
fn test_invalid_cidr_names_the_range() {
    let err = parse_directive("block abc.com 10.1.1.0/24 bogus/99").unwrap_err();

    match err {
        ConfigError::InvalidCidr { cidr, .. } => assert_eq!(cidr, "bogus/99"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bare_address_is_rejected() {
    let err = parse_directive("block abc.com 10.1.1.1").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCidr { .. }));
}

#[test]
fn test_unknown_property() {
    let err = parse_directive("allow abc.com 10.0.0.0/8").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownProperty(ref p) if p == "allow"));
}

#[test]
fn test_rule_set_preserves_insertion_order() {
    let rules = parse_rule_set([
        "block abc.com 10.1.1.0/24",
        "",
        "# second rule",
        "block xyz.com 192.168.0.0/16 172.16.0.0/12",
    ])
    .unwrap();

    let domains: Vec<&str> = rules.iter().map(|r| r.domain()).collect();
    assert_eq!(domains, vec!["abc.com.", "xyz.com."]);
}

#[test]
fn test_rule_set_is_all_or_nothing() {
    let result = parse_rule_set([
        "block abc.com 10.1.1.0/24",
        "block xyz.com 192.168.0.0/16",
        "block broken.com 300.0.0.0/8",
    ]);

    match result {
        Err(ConfigError::Directive { line, source }) => {
            assert_eq!(line, 3);
            assert!(matches!(*source, ConfigError::InvalidCidr { .. }));
        }
        other => panic!("expected directive error, got {other:?}"),
    }
}

#[test]
fn test_parsed_rules_drive_matching() {
    let rules = parse_rule_set(["block abc.com 10.1.1.0/24"]).unwrap();

    let inside: IpAddr = "10.1.1.5".parse().unwrap();
    let outside: IpAddr = "10.2.1.5".parse().unwrap();
    assert!(rules.is_blocked("abc.com.", inside));
    assert!(!rules.is_blocked("abc.com.", outside));
}
