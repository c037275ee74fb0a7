//! # dominfo Library
//!
//! Domain registration lookups over WHOIS.
//!
//! A lookup asks a root referral server (by default `whois.iana.org`) which
//! server is authoritative for a domain, queries that server, and extracts a
//! fixed set of registry fields from its free-text answer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dominfo_lib::{lookup, WhoisField, DEFAULT_ROOT_SERVER};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let record = lookup("example.com", DEFAULT_ROOT_SERVER)?;
//!
//!     for (field, value) in record.iter() {
//!         println!("{}: {}", field, value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Transport**: one blocking socket per query, read until the server
//!   closes, invalid UTF-8 dropped
//! - **Referral**: first `whois:` line of the root response
//! - **Extraction**: a fixed label pattern per field; absent, single, or list
//! - **Normalization**: registration dates parsed into timestamps when possible

// Re-export main public API types and functions
pub use config::{load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig};
pub use error::DominfoError;
pub use extract::extract;
pub use lookup::{lookup, DomainLookup};
pub use normalize::{normalize, parse_timestamp};
pub use protocols::{fetch_raw, parse_referral, resolve_authoritative_server, WhoisClient};
pub use types::{
    FieldValue, LookupConfig, RawWhoisResponse, WhoisField, WhoisRecord, DEFAULT_ROOT_SERVER,
    DEFAULT_TIMEOUT, WHOIS_PORT,
};
pub use utils::validate_domain;

// Internal modules - these are not part of the public API
mod config;
mod error;
mod extract;
mod lookup;
mod normalize;
mod protocols;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DominfoError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
