//! Core data types for WHOIS lookups.
//!
//! This module defines the fixed field set a lookup produces, the value
//! shapes a field can take, and the configuration a lookup runs with.

use chrono::{DateTime, FixedOffset};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Root referral server queried when no other is configured.
pub const DEFAULT_ROOT_SERVER: &str = "whois.iana.org";

/// TCP port assigned to WHOIS (RFC 3912).
pub const WHOIS_PORT: u16 = 43;

/// Connect/read/write timeout applied to every WHOIS socket by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The fixed set of fields extracted from a registry response.
///
/// Variants are declared in output order; [`WhoisField::ALL`] follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhoisField {
    DomainName,
    RegistryDomainId,
    RegistrarWhoisServer,
    RegistrarUrl,
    UpdatedDate,
    CreationDate,
    RegistryExpiryDate,
    Registrar,
    RegistrarIanaId,
    NameServer,
    Dnssec,
}

impl WhoisField {
    /// Every field, in output order.
    pub const ALL: [WhoisField; 11] = [
        WhoisField::DomainName,
        WhoisField::RegistryDomainId,
        WhoisField::RegistrarWhoisServer,
        WhoisField::RegistrarUrl,
        WhoisField::UpdatedDate,
        WhoisField::CreationDate,
        WhoisField::RegistryExpiryDate,
        WhoisField::Registrar,
        WhoisField::RegistrarIanaId,
        WhoisField::NameServer,
        WhoisField::Dnssec,
    ];

    /// The fields the normalizer converts to timestamps.
    pub const DATES: [WhoisField; 3] = [
        WhoisField::UpdatedDate,
        WhoisField::CreationDate,
        WhoisField::RegistryExpiryDate,
    ];

    /// Stable snake_case key used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            WhoisField::DomainName => "domain_name",
            WhoisField::RegistryDomainId => "registry_domain_id",
            WhoisField::RegistrarWhoisServer => "registrar_whois_server",
            WhoisField::RegistrarUrl => "registrar_url",
            WhoisField::UpdatedDate => "updated_date",
            WhoisField::CreationDate => "creation_date",
            WhoisField::RegistryExpiryDate => "registry_expiry_date",
            WhoisField::Registrar => "registrar",
            WhoisField::RegistrarIanaId => "registrar_iana_id",
            WhoisField::NameServer => "name_server",
            WhoisField::Dnssec => "dnssec",
        }
    }

    /// Whether this field holds a registration date.
    pub fn is_date(self) -> bool {
        Self::DATES.contains(&self)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WhoisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single field in a [`WhoisRecord`].
///
/// Arity is discovered per response: no match is `Absent`, one match is
/// `Text`, repeated matches are a `List` in order of appearance. Date
/// fields become `Timestamp` once normalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The label did not appear in the response (serialized as `null`)
    #[default]
    Absent,

    /// Exactly one occurrence
    Text(String),

    /// Two or more occurrences, in order of appearance
    List(Vec<String>),

    /// A date field parsed into a structured timestamp
    #[serde(serialize_with = "serialize_rfc3339")]
    Timestamp(DateTime<FixedOffset>),
}

/// Write timestamps the same way [`fmt::Display`] does, with a numeric
/// offset rather than `Z`.
fn serialize_rfc3339<S: Serializer>(
    ts: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339())
}

impl FieldValue {
    /// Collapse a list of matches into a value using the 0/1/many rule.
    pub fn from_matches(mut matches: Vec<String>) -> Self {
        match matches.len() {
            0 => FieldValue::Absent,
            1 => FieldValue::Text(matches.remove(0)),
            _ => FieldValue::List(matches),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// The single text value, if this field matched exactly once and was not
    /// converted to a timestamp.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
            FieldValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
        }
    }
}

/// Structured result of a WHOIS lookup.
///
/// Always holds exactly one value per [`WhoisField`]; fields the response
/// did not mention are [`FieldValue::Absent`] rather than missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhoisRecord {
    values: [FieldValue; 11],
}

impl WhoisRecord {
    /// A record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: WhoisField) -> &FieldValue {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: WhoisField, value: FieldValue) {
        self.values[field.index()] = value;
    }

    /// Iterate over all fields in output order.
    pub fn iter(&self) -> impl Iterator<Item = (WhoisField, &FieldValue)> + '_ {
        WhoisField::ALL
            .iter()
            .map(move |field| (*field, self.get(*field)))
    }

    /// Number of fields that matched at least once.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_absent()).count()
    }
}

impl Serialize for WhoisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WhoisField::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

/// Unparsed response from the authoritative server of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawWhoisResponse {
    /// The domain that was queried
    pub domain: String,

    /// Authoritative server named by the root referral
    pub server: String,

    /// Decoded response text
    pub text: String,
}

/// Configuration options for lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Root referral server queried first.
    /// Default: whois.iana.org
    pub root_server: String,

    /// Connect, read, and write timeout for every socket.
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Port for both the root and authoritative servers.
    /// Default: 43
    pub port: u16,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            root_server: DEFAULT_ROOT_SERVER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            port: WHOIS_PORT,
        }
    }
}

impl LookupConfig {
    /// Set the root referral server.
    pub fn with_root_server<S: Into<String>>(mut self, root_server: S) -> Self {
        self.root_server = root_server.into();
        self
    }

    /// Set the socket timeout. A zero duration is raised to one millisecond,
    /// since std sockets reject a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Set the WHOIS port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
