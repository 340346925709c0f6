//! Fully-qualified domain name helpers.

use crate::DomainError;
use std::sync::Arc;

/// Normalizes a domain to its dot-terminated form (`example.com` -> `example.com.`).
///
/// Case is preserved; comparisons through [`is_subdomain`] ignore it.
pub fn normalize_fqdn(domain: &str) -> Result<Arc<str>, DomainError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain cannot be empty".to_string(),
        ));
    }

    if domain.ends_with('.') {
        Ok(Arc::from(domain))
    } else {
        Ok(Arc::from(format!("{}.", domain)))
    }
}

/// Returns true when `name` equals `zone` or sits below it.
///
/// Labels are compared right to left, ASCII case-insensitively, so
/// `www.example.com.` is inside `example.com.` while `notexample.com.` is not.
/// The root zone contains every name.
pub fn is_subdomain(name: &str, zone: &str) -> bool {
    let zone = zone.trim_end_matches('.');
    if zone.is_empty() {
        return true;
    }

    let mut name_labels = name.trim_end_matches('.').rsplit('.');
    for zone_label in zone.rsplit('.') {
        match name_labels.next() {
            Some(label) if label.eq_ignore_ascii_case(zone_label) => {}
            _ => return false,
        }
    }

    true
}
