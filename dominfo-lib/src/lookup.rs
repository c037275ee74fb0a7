//! Lookup orchestration.
//!
//! A lookup is two sequential WHOIS round trips followed by parsing:
//! referral from the root server, the authoritative query, then field
//! extraction and date normalization.

use crate::error::DominfoError;
use crate::extract::extract;
use crate::normalize::normalize;
use crate::protocols::{fetch_raw, resolve_authoritative_server, WhoisClient};
use crate::types::{LookupConfig, RawWhoisResponse, WhoisRecord};
use crate::utils::validate_domain;
use tracing::{debug, instrument};

/// Runs WHOIS lookups with a fixed configuration.
///
/// Holds no per-lookup state; every call opens and closes its own sockets.
///
/// # Example
///
/// ```rust,no_run
/// use dominfo_lib::{DomainLookup, WhoisField};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let lookup = DomainLookup::new();
///     let record = lookup.lookup("example.com")?;
///     println!("Registrar: {}", record.get(WhoisField::Registrar));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DomainLookup {
    /// Configuration settings for this instance
    config: LookupConfig,
    /// Transport shared by the referral and authoritative queries
    client: WhoisClient,
}

impl DomainLookup {
    /// Create a lookup against `whois.iana.org` with a 10 second timeout.
    pub fn new() -> Self {
        Self::with_config(LookupConfig::default())
    }

    /// Create a lookup with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dominfo_lib::{DomainLookup, LookupConfig};
    /// use std::time::Duration;
    ///
    /// let config = LookupConfig::default()
    ///     .with_root_server("whois.iana.org")
    ///     .with_timeout(Duration::from_secs(5));
    ///
    /// let lookup = DomainLookup::with_config(config);
    /// ```
    pub fn with_config(config: LookupConfig) -> Self {
        let client = WhoisClient::with_timeout(config.timeout).port(config.port);
        Self { config, client }
    }

    /// Look up `domain` and return its extracted, normalized record.
    ///
    /// # Errors
    ///
    /// Returns `DominfoError` if:
    /// - The domain is empty or spans more than one line
    /// - Either server cannot be reached or times out
    /// - The root server does not name an authoritative server
    #[instrument(skip(self), fields(root = %self.config.root_server))]
    pub fn lookup(&self, domain: &str) -> Result<WhoisRecord, DominfoError> {
        let raw = self.lookup_raw(domain)?;
        let record = normalize(extract(&raw.text));
        debug!(present = record.present_count(), "Parsed WHOIS record");
        Ok(record)
    }

    /// Resolve the authoritative server for `domain` and return its
    /// unparsed response.
    #[instrument(skip(self), fields(root = %self.config.root_server))]
    pub fn lookup_raw(&self, domain: &str) -> Result<RawWhoisResponse, DominfoError> {
        let domain = validate_domain(domain)?;

        let server = resolve_authoritative_server(&self.client, &self.config.root_server, domain)?;
        let text = fetch_raw(&self.client, &server, domain)?;

        Ok(RawWhoisResponse {
            domain: domain.to_string(),
            server,
            text,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }
}

impl Default for DomainLookup {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up `domain` through `root_server` on the standard WHOIS port.
///
/// Convenience wrapper for callers that only choose the root server.
pub fn lookup(domain: &str, root_server: &str) -> Result<WhoisRecord, DominfoError> {
    DomainLookup::with_config(LookupConfig::default().with_root_server(root_server)).lookup(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_with_config_builds_matching_client() {
        let config = LookupConfig::default()
            .with_timeout(Duration::from_secs(2))
            .with_port(4343);
        let lookup = DomainLookup::with_config(config.clone());
        assert_eq!(lookup.config(), &config);
        assert_eq!(lookup.client.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_domain_rejected_before_connecting() {
        // An unresolvable root would fail with a connection error; validation
        // must fail first.
        let config = LookupConfig::default().with_root_server("invalid.invalid");
        let err = DomainLookup::with_config(config).lookup("  ").unwrap_err();
        assert!(matches!(err, DominfoError::InvalidDomain { .. }));
    }
}
