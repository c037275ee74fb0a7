//! Authoritative server discovery via a root referral server.
//!
//! A root server such as `whois.iana.org` answers a domain query with a
//! block describing the TLD, including the server that holds the domain's
//! registration data:
//!
//! ```text
//! domain:       COM
//! whois:        whois.verisign-grs.com
//! ```

use super::whois::WhoisClient;
use crate::error::DominfoError;
use regex::Regex;
use tracing::debug;

lazy_static::lazy_static! {
    static ref REFERRAL_LINE: Regex =
        Regex::new(r"(?im)whois:[ \t]+(\S+)").expect("referral pattern is valid");
}

/// Ask `root_server` which server is authoritative for `domain`.
///
/// # Errors
///
/// Propagates transport failures against the root server, and returns
/// `DominfoError::ReferralNotFound` when the response has no `whois:` line.
pub fn resolve_authoritative_server(
    client: &WhoisClient,
    root_server: &str,
    domain: &str,
) -> Result<String, DominfoError> {
    let response = client.query(root_server, domain)?;

    match parse_referral(&response) {
        Some(server) => {
            debug!(root = %root_server, referral = %server, "Found authoritative WHOIS server");
            Ok(server)
        }
        None => Err(DominfoError::referral_not_found(root_server, domain)),
    }
}

/// Extract the first `whois:` referral from a root server response.
///
/// The label is matched case-insensitively and must be followed on the
/// same line by whitespace and a hostname.
pub fn parse_referral(response: &str) -> Option<String> {
    REFERRAL_LINE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
