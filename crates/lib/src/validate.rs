//! # Trust Validator
//!
//! A pure, conservative SSRF guard. It rejects URLs that are oversized,
//! malformed, not HTTP(S), or whose hostname literally looks private. It does
//! not resolve DNS, so a public name pointing at a private address passes.

use crate::constants::MAX_URL_LENGTH;
use crate::errors::ValidationError;
use url::{Host, Url};

const BLOCKED_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "0.0.0.0", "::1"];
const BLOCKED_PREFIXES: [&str; 2] = ["192.168.", "10."];
const BLOCKED_SUFFIXES: [&str; 2] = [".local", ".internal"];

/// Validates a source URL. The first failing rule wins.
pub fn validate_url(raw: &str) -> Result<Url, ValidationError> {
    let length = raw.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(ValidationError::UrlTooLong(length));
    }

    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidFormat(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::SchemeNotAllowed(url.scheme().to_string()));
    }

    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => return Err(ValidationError::InvalidFormat("URL has no host".to_string())),
    };

    if is_private_host(&host) {
        return Err(ValidationError::PrivateHostBlocked(host));
    }

    Ok(url)
}

/// Pattern match over the normalised hostname.
pub fn is_private_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    BLOCKED_HOSTS.contains(&host)
        || BLOCKED_PREFIXES.iter().any(|p| host.starts_with(p))
        || BLOCKED_SUFFIXES.iter().any(|s| host.ends_with(s))
        || in_172_private_block(host)
}

// 172.16.0.0 – 172.31.255.255, matched on the second octet.
fn in_172_private_block(host: &str) -> bool {
    let Some(rest) = host.strip_prefix("172.") else {
        return false;
    };
    let Some((octet, _)) = rest.split_once('.') else {
        return false;
    };
    matches!(octet.parse::<u8>(), Ok(16..=31))
}
