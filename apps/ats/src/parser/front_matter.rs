//! Contact details from the YAML-style block at the top of the resume.

use tracing::warn;

use crate::models::{Contact, ParseWarning, WarningKind};
use crate::patterns::is_email;

#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatterField {
    /// 1-based source line.
    pub line: usize,
    /// Lowercased key.
    pub key: String,
    pub value: String,
}

/// Key/value pairs of the leading `---` block, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub fields: Vec<FrontMatterField>,
    /// Number of source lines the block occupies, delimiters included.
    pub line_count: usize,
}

const KNOWN_LINK_LABELS: &[(&str, &str)] = &[
    ("linkedin", "LinkedIn"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("website", "Website"),
    ("homepage", "Website"),
    ("portfolio", "Portfolio"),
    ("twitter", "Twitter"),
];

/// Returns the front matter block when `source` opens with one.
///
/// A leading `---` only counts as front matter when it is closed by another
/// `---` and every line in between is blank or `key: value`; otherwise it is
/// an ordinary separator and `None` is returned.
pub fn split_front_matter(source: &str) -> Option<FrontMatter> {
    let mut lines = source.lines();
    if lines.next()?.trim() != "---" {
        return None;
    }

    let mut fields = Vec::new();
    for (offset, line) in lines.enumerate() {
        let trimmed = line.trim();
        if trimmed == "---" {
            return Some(FrontMatter {
                fields,
                line_count: offset + 2,
            });
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (key, value) = trimmed.split_once(':')?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        fields.push(FrontMatterField {
            line: offset + 2,
            key: key.to_lowercase(),
            value: unquote(value.trim()).to_string(),
        });
    }
    None
}

/// Copies front matter fields into `contact`, validating the email address.
pub fn apply_front_matter(
    front_matter: &FrontMatter,
    contact: &mut Contact,
    warnings: &mut Vec<ParseWarning>,
) {
    for field in &front_matter.fields {
        let value = &field.value;
        if value.is_empty() {
            continue;
        }
        match field.key.as_str() {
            "name" => contact.name = value.clone(),
            "subtitle" | "title" | "tagline" => contact.title = value.clone(),
            "email" => {
                if is_email(value) {
                    contact.email = value.clone();
                } else {
                    let message = format!("email '{value}' is not a valid address; dropped");
                    warn!("{message}");
                    warnings.push(ParseWarning {
                        line: field.line,
                        kind: WarningKind::InvalidContact,
                        message,
                    });
                }
            }
            "phone" => contact.phone = value.clone(),
            "location" | "address" => contact.location = value.clone(),
            other => {
                contact.links.insert(link_label(other), value.clone());
            }
        }
    }
}

fn link_label(key: &str) -> String {
    KNOWN_LINK_LABELS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| key.to_string())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}
