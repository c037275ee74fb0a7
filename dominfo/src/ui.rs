//! Text-mode display logic for the dominfo CLI.
//!
//! Renders a record as aligned `field: value` lines. Uses only the
//! `console` crate, which drops styling when stdout is not a terminal.

use console::{pad_str, style, Alignment};
use dominfo_lib::{FieldValue, RawWhoisResponse, WhoisField, WhoisRecord};

/// Width of the longest field key, used to align values.
fn key_width() -> usize {
    WhoisField::ALL
        .iter()
        .map(|field| field.as_str().len())
        .max()
        .unwrap_or(0)
}

/// Print a styled header followed by one line per field.
pub fn print_record(domain: &str, record: &WhoisRecord) {
    println!(
        "{} {}",
        style("WHOIS").bold(),
        style(domain.trim()).cyan().bold()
    );

    for line in format_record_lines(record) {
        println!("{}", line);
    }
}

/// Build the display lines for a record. Lists put each item on its own
/// line under the key.
fn format_record_lines(record: &WhoisRecord) -> Vec<String> {
    let width = key_width();
    let mut lines = Vec::new();

    for (field, value) in record.iter() {
        let key = format!(
            "{}:",
            pad_str(field.as_str(), width, Alignment::Left, None)
        );
        let key = style(key).bold();

        match value {
            FieldValue::Absent => lines.push(format!("  {} {}", key, style("-").dim())),
            FieldValue::Text(text) => lines.push(format!("  {} {}", key, text)),
            FieldValue::Timestamp(ts) => {
                lines.push(format!("  {} {}", key, style(ts.to_rfc3339()).green()))
            }
            FieldValue::List(items) => {
                let indent = " ".repeat(width + 4);
                for (i, item) in items.iter().enumerate() {
                    if i == 0 {
                        lines.push(format!("  {} {}", key, item));
                    } else {
                        lines.push(format!("{}{}", indent, item));
                    }
                }
            }
        }
    }

    lines
}

/// Print the authoritative server name and its unparsed response.
pub fn print_raw(raw: &RawWhoisResponse) {
    println!(
        "{} {}",
        style("% Authoritative server:").dim(),
        style(&raw.server).cyan()
    );
    println!();
    print!("{}", raw.text);
    if !raw.text.ends_with('\n') {
        println!();
    }
}
