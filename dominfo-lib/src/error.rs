//! Error handling for WHOIS lookups.
//!
//! Only the failures that stop a lookup are represented here. Undecodable
//! bytes and unparseable dates are not errors: the pipeline degrades to
//! best-effort text instead.

use std::fmt;

/// Main error type for lookup operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DominfoError {
    /// The domain cannot be sent as a single-line WHOIS query
    InvalidDomain { domain: String, reason: String },

    /// Resolve, connect, send, or read failure against a WHOIS server
    ConnectionError { host: String, message: String },

    /// The root server's response carried no `whois:` referral line
    ReferralNotFound { server: String, domain: String },

    /// Configuration errors (invalid settings, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading configuration files
    FileError { path: String, message: String },
}

impl DominfoError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new connection error for `host`.
    pub fn connection<H: Into<String>, M: Into<String>>(host: H, message: M) -> Self {
        Self::ConnectionError {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Create a new referral-not-found error.
    pub fn referral_not_found<S: Into<String>, D: Into<String>>(server: S, domain: D) -> Self {
        Self::ReferralNotFound {
            server: server.into(),
            domain: domain.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The host this error is attributed to, if it is a network failure.
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::ConnectionError { host, .. } => Some(host),
            Self::ReferralNotFound { server, .. } => Some(server),
            _ => None,
        }
    }
}

impl fmt::Display for DominfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain.escape_debug(), reason)
            }
            Self::ConnectionError { host, message } => {
                write!(f, "Failed to connect to {}: {}", host, message)
            }
            Self::ReferralNotFound { server, domain } => {
                write!(
                    f,
                    "WHOIS server not found in {} response for '{}'",
                    server, domain
                )
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for DominfoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_failing_host() {
        let err = DominfoError::connection("whois.example.tld", "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to connect to whois.example.tld: connection refused"
        );
        assert_eq!(err.host(), Some("whois.example.tld"));
    }

    #[test]
    fn test_referral_not_found_display() {
        let err = DominfoError::referral_not_found("whois.iana.org", "example.com");
        let msg = err.to_string();
        assert!(msg.contains("whois.iana.org"));
        assert!(msg.contains("example.com"));
    }

    #[test]
    fn test_invalid_domain_escapes_control_chars() {
        let err = DominfoError::invalid_domain("a\r\nb", "contains a line break");
        assert!(err.to_string().contains("a\\r\\nb"));
        assert_eq!(err.host(), None);
    }
}
