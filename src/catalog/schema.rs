/// Field declaration mini-language
///
/// `name [auto_inc] [timestamp] [default=value]`
use crate::error::{Result, StoreError};
use crate::sql::LiteralVault;
use crate::types::FieldSpec;
use regex::Regex;
use std::sync::OnceLock;

fn assign_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*=\s*").expect("valid assignment regex"))
}

/// Parse one field declaration into its name and rule
///
/// Attribute names are case-insensitive. Default values may be quoted, in
/// which case they keep their spaces and are stored as text. Unknown
/// attributes are skipped.
pub fn parse_field_declaration(decl: &str) -> Result<(String, FieldSpec)> {
    let (text, mut vault) = LiteralVault::extract(decl)?;
    let text = assign_re().replace_all(&text, "=");

    let mut parts = text.split_whitespace();
    let name = parts
        .next()
        .ok_or_else(|| StoreError::MalformedQuery(format!("Empty field declaration '{}'", decl)))?
        .to_string();

    let mut spec = FieldSpec::new();
    for part in parts {
        let (attr, value) = match part.split_once('=') {
            Some((attr, value)) => (attr, Some(value)),
            None => (part, None),
        };

        match (attr.to_ascii_lowercase().as_str(), value) {
            ("auto_inc", _) => spec.auto_increment = true,
            ("timestamp", _) => spec.timestamp = true,
            ("default", Some(raw)) if !raw.is_empty() => spec.default = Some(vault.resolve(raw)?),
            ("default", _) => {
                tracing::warn!(field = %name, "default attribute without a value ignored");
            }
            (other, _) => {
                tracing::warn!(field = %name, attribute = other, "unknown field attribute ignored");
            }
        }
    }

    Ok((name, spec))
}
