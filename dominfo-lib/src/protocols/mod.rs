//! Protocol implementations for WHOIS lookups.
//!
//! This module contains the raw WHOIS transport and the referral step that
//! finds the authoritative server for a domain.

/// WHOIS transport and authoritative record fetch
pub mod whois;

/// Root server referral resolution
pub mod referral;

// Re-export commonly used functions and types
pub use referral::{parse_referral, resolve_authoritative_server};
pub use whois::{fetch_raw, WhoisClient};
