//! Field extraction from registry-style WHOIS text.
//!
//! Registries do not share a schema, so each field is a fixed label pattern
//! matched anywhere in the response. Fields that never appear are absent;
//! extraction itself never fails.

use crate::types::{FieldValue, WhoisField, WhoisRecord};
use regex::Regex;

/// Label patterns per field, in output order. Whitespace between the words
/// of a label is free; the value is everything after the colon on that line,
/// so multi-word values like `Registrar: Example Registrar` stay whole. The
/// same applies to lines carrying extra tokens: `Name Server: ns1.example.com
/// 192.0.2.1` yields `"ns1.example.com 192.0.2.1"`, glue address included.
const FIELD_LABELS: [(WhoisField, &str); 11] = [
    (WhoisField::DomainName, r"Domain[ \t]*Name"),
    (WhoisField::RegistryDomainId, r"Registry[ \t]*Domain[ \t]*ID"),
    (WhoisField::RegistrarWhoisServer, r"Registrar[ \t]*WHOIS[ \t]*Server"),
    (WhoisField::RegistrarUrl, r"Registrar[ \t]*URL"),
    (WhoisField::UpdatedDate, r"Updated[ \t]*Date"),
    (WhoisField::CreationDate, r"Creation[ \t]*Date"),
    (WhoisField::RegistryExpiryDate, r"Registry[ \t]*Expiry[ \t]*Date"),
    (WhoisField::Registrar, r"Registrar"),
    (WhoisField::RegistrarIanaId, r"Registrar[ \t]*IANA[ \t]*ID"),
    (WhoisField::NameServer, r"Name[ \t]*Server"),
    (WhoisField::Dnssec, r"DNSSEC"),
];

lazy_static::lazy_static! {
    static ref FIELD_PATTERNS: Vec<(WhoisField, Regex)> = FIELD_LABELS
        .iter()
        .map(|(field, label)| {
            let pattern = format!(r"(?im)\b{}:[ \t]*(\S[^\r\n]*)", label);
            (*field, Regex::new(&pattern).expect("field pattern is valid"))
        })
        .collect();
}

/// Extract every known field from `raw`.
///
/// Each field takes the 0/1/many shape of its matches: absent, a single
/// text value, or a list in order of appearance. Values are text only;
/// see [`crate::normalize()`] for date conversion.
pub fn extract(raw: &str) -> WhoisRecord {
    let mut record = WhoisRecord::new();

    for (field, pattern) in FIELD_PATTERNS.iter() {
        let matches: Vec<String> = pattern
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end().to_string())
            .collect();

        record.set(*field, FieldValue::from_matches(matches));
    }

    record
}
