//! Utility functions for query validation.

use crate::error::DominfoError;

/// Validate that a domain can be sent as a WHOIS query line.
///
/// The domain is otherwise passed to servers exactly as given; registries
/// decide what they accept.
///
/// # Returns
///
/// The domain with surrounding whitespace removed, or
/// `DominfoError::InvalidDomain` if it is empty or spans more than one line.
pub fn validate_domain(domain: &str) -> Result<&str, DominfoError> {
    let trimmed = domain.trim();

    if trimmed.is_empty() {
        return Err(DominfoError::invalid_domain(
            domain,
            "Domain name cannot be empty",
        ));
    }

    if trimmed.contains(|c: char| c == '\r' || c == '\n') {
        return Err(DominfoError::invalid_domain(
            domain,
            "Domain name must be a single line",
        ));
    }

    Ok(trimmed)
}
