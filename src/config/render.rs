//! Serialize a [`ConfigDocument`] into its canonical text form.
//!
//! Layout: the `[conda]` table (when present and non-empty) followed by a
//! blank line, then one `[[packages]]` table per entry with `repository`
//! first, `name` second and the remaining fields in their stored order, each
//! table followed by a blank line. Strings are written as basic strings;
//! every other value uses its TOML literal form (arrays and tables inline).

use std::fmt::Write as _;

use super::{ConfigDocument, ConfigEntry, PACKAGES_TABLE, SETTINGS_TABLE};

/// Render the whole document.
#[must_use]
pub fn render(document: &ConfigDocument) -> String {
    let mut out = String::new();

    if let Some(settings) = document.settings.as_ref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "[{SETTINGS_TABLE}]");
        for (key, value) in settings {
            push_key_value(&mut out, key, value);
        }
        out.push('\n');
    }

    for entry in &document.packages {
        push_entry(&mut out, entry);
    }
    out
}

fn push_entry(out: &mut String, entry: &ConfigEntry) {
    let _ = writeln!(out, "[[{PACKAGES_TABLE}]]");
    let _ = writeln!(out, "repository = {}", quote(&entry.repository));
    if let Some(name) = &entry.name {
        let _ = writeln!(out, "name = {}", quote(name));
    }
    for (key, value) in &entry.extra {
        push_key_value(out, key, value);
    }
    out.push('\n');
}

fn push_key_value(out: &mut String, key: &str, value: &toml::Value) {
    let rendered = match value {
        toml::Value::String(s) => quote(s),
        other => other.to_string(),
    };
    let _ = writeln!(out, "{} = {rendered}", format_key(key));
}

/// Write `key` bare when TOML allows it, quoted otherwise.
fn format_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare { key.to_string() } else { quote(key) }
}

/// Quote `s` as a TOML basic string.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
