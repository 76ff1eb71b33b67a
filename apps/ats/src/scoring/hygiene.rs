//! Character classes that trip up ATS text extraction, and the ASCII
//! rewrite that removes them.

use indexmap::IndexSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    BulletGlyph,
    SmartQuote,
    Dash,
    Ampersand,
    OtherNonAscii,
}

const BULLET_GLYPHS: &[char] = &['•', '·', '◦', '▪', '▫', '■', '□', '●', '○', '►', '▸', '‣', '⁃', '➢', '✓', '✔'];
const SMART_QUOTES: &[char] = &['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '\u{2032}', '\u{2033}'];
const DASHES: &[char] = &['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}'];

impl CharClass {
    pub fn of(c: char) -> Option<Self> {
        if c == '&' {
            Some(CharClass::Ampersand)
        } else if c.is_ascii() {
            None
        } else if BULLET_GLYPHS.contains(&c) {
            Some(CharClass::BulletGlyph)
        } else if SMART_QUOTES.contains(&c) {
            Some(CharClass::SmartQuote)
        } else if DASHES.contains(&c) {
            Some(CharClass::Dash)
        } else {
            Some(CharClass::OtherNonAscii)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharClass::BulletGlyph => "non_ascii_bullets",
            CharClass::SmartQuote => "smart_quotes",
            CharClass::Dash => "em_en_dashes",
            CharClass::Ampersand => "ampersands",
            CharClass::OtherNonAscii => "other_non_ascii",
        }
    }

    pub fn issue(&self) -> &'static str {
        match self {
            CharClass::BulletGlyph => "non-ASCII bullet characters found; use '*' or '-'",
            CharClass::SmartQuote => "smart quotes found; use straight ASCII quotes",
            CharClass::Dash => "em/en dashes found; use '-'",
            CharClass::Ampersand => "ampersand found; spell out 'and'",
            CharClass::OtherNonAscii => "other non-ASCII characters found",
        }
    }
}

/// Distinct offending classes in order of first occurrence.
pub fn offending_classes(text: &str) -> Vec<CharClass> {
    text.chars()
        .filter_map(CharClass::of)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Rewrites `text` into plain ASCII: `&` becomes `and`, bullet glyphs `*`,
/// smart quotes their straight forms, dashes `-`; anything else non-ASCII
/// is dropped.
pub fn sanitize_for_ats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match CharClass::of(c) {
            None => out.push(c),
            Some(CharClass::Ampersand) => out.push_str("and"),
            Some(CharClass::BulletGlyph) => out.push('*'),
            Some(CharClass::Dash) => out.push('-'),
            Some(CharClass::SmartQuote) => match c {
                '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
                _ => out.push('"'),
            },
            Some(CharClass::OtherNonAscii) => {
                if c.is_whitespace() {
                    out.push(' ');
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_deduplicated_in_order() {
        let classes = offending_classes("R&D “quoted” & more “quotes”");
        assert_eq!(classes, vec![CharClass::Ampersand, CharClass::SmartQuote]);
    }

    #[test]
    fn test_plain_ascii_is_clean() {
        assert!(offending_classes("Engineer: Acme | 2020 - 2022\n* Shipped it").is_empty());
    }

    #[test]
    fn test_each_class_detected() {
        assert_eq!(CharClass::of('•'), Some(CharClass::BulletGlyph));
        assert_eq!(CharClass::of('’'), Some(CharClass::SmartQuote));
        assert_eq!(CharClass::of('—'), Some(CharClass::Dash));
        assert_eq!(CharClass::of('–'), Some(CharClass::Dash));
        assert_eq!(CharClass::of('&'), Some(CharClass::Ampersand));
        assert_eq!(CharClass::of('é'), Some(CharClass::OtherNonAscii));
        assert_eq!(CharClass::of('a'), None);
    }

    #[test]
    fn test_sanitize_rewrites_to_ascii() {
        let clean = sanitize_for_ats("R&D • “Ship it” — it’s café\u{00A0}time");
        assert_eq!(clean, "RandD * \"Ship it\" - it's caf time");
        assert!(clean.is_ascii());
        assert!(offending_classes(&clean).is_empty());
    }
}
