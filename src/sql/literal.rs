/// Literal vault - lifts quoted literals out of query text
///
/// Every quoted substring is swapped for a synthesized label (`_LIT1_`,
/// `_LIT2_`, ...) before any normalization runs, so later stages never see
/// a quote character and can rewrite punctuation and keywords freely.
use crate::error::{Result, StoreError};
use crate::types::Value;
use std::collections::HashMap;

pub const DEFAULT_PREFIX: &str = "LIT";

/// `_<prefix><digits>_`
pub fn is_placeholder_label(token: &str, prefix: &str) -> bool {
    token
        .strip_prefix('_')
        .and_then(|rest| rest.strip_prefix(prefix))
        .and_then(|rest| rest.strip_suffix('_'))
        .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct LiteralVault {
    prefix: String,
    literals: HashMap<String, String>,
}

impl LiteralVault {
    /// Extract literals using the default `LIT` prefix
    pub fn extract(input: &str) -> Result<(String, Self)> {
        Self::extract_with_prefix(input, DEFAULT_PREFIX)
    }

    /// Replace each quoted substring with a placeholder label
    ///
    /// Single and double quotes are both accepted; a backslash escapes the
    /// next quote or backslash inside a literal, except right before the
    /// final closing quote (`'C:\'`). Labels are padded with spaces.
    pub fn extract_with_prefix(input: &str, prefix: &str) -> Result<(String, Self)> {
        let mut vault = Self {
            prefix: prefix.to_string(),
            literals: HashMap::new(),
        };
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars();
        let mut counter = 0usize;

        while let Some(ch) = chars.next() {
            if ch != '\'' && ch != '"' {
                output.push(ch);
                continue;
            }

            let quote = ch;
            let mut literal = String::new();
            let mut closed = false;

            while let Some(c) = chars.next() {
                match c {
                    // Backslash before the last matching quote of the input is kept as-is
                    '\\' if chars.clone().next() == Some(quote) && !chars.clone().skip(1).any(|c| c == quote) => {
                        literal.push('\\');
                    }
                    '\\' => match chars.next() {
                        Some(escaped) if escaped == quote || escaped == '\\' => literal.push(escaped),
                        Some(other) => {
                            literal.push('\\');
                            literal.push(other);
                        }
                        None => break,
                    },
                    c if c == quote => {
                        closed = true;
                        break;
                    }
                    c => literal.push(c),
                }
            }

            if !closed {
                return Err(StoreError::MalformedQuery(format!(
                    "Unterminated literal starting with {}{}",
                    quote, literal
                )));
            }

            counter += 1;
            let label = vault.label(counter);
            tracing::trace!(label = %label, literal = %literal, "extracted literal");
            // Pad so the label never fuses with a neighbouring word
            output.push(' ');
            output.push_str(&label);
            output.push(' ');
            vault.literals.insert(label, literal);
        }

        Ok((output, vault))
    }

    fn label(&self, n: usize) -> String {
        format!("_{}{}_", self.prefix, n)
    }

    /// Does the token have the shape of a placeholder label
    pub fn is_placeholder(&self, token: &str) -> bool {
        is_placeholder_label(token, &self.prefix)
    }

    /// Take the literal behind a placeholder; each label resolves once
    pub fn take(&mut self, label: &str) -> Result<String> {
        self.literals
            .remove(label)
            .ok_or_else(|| StoreError::UnresolvedLiteral(label.to_string()))
    }

    /// Resolve a comparand token to a value
    ///
    /// Placeholders yield their literal text (consuming it); any other token
    /// is interpreted with `Value::from_token`.
    pub fn resolve(&mut self, token: &str) -> Result<Value> {
        if self.is_placeholder(token) {
            self.take(token).map(Value::Text)
        } else {
            Ok(Value::from_token(token))
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Literals not yet resolved
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}
