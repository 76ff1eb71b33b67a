//! Shared regexes for contact details and the ATS plain-text entry shapes.

use regex::Regex;
use std::sync::LazyLock;

pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("static regex")
});

/// `+1 555-123-4567`, `(555) 123-4567`, `555.123.4567`, `5551234567`.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?(?:\([0-9]{3}\)|\b[0-9]{3})[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b")
        .expect("static regex")
});

/// `City, ST` or `City, Country`.
pub static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[A-Z][a-zA-Z.]+(?:[ -][A-Z][a-zA-Z.]+)*,[ \t]*(?:[A-Z]{2}\b|[A-Z][a-z]+(?:[ \t][A-Z][a-z]+)*)",
    )
    .expect("static regex")
});

pub static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:linkedin\.com/in/|linkedin:[ \t]*)([A-Za-z0-9_-]+)").expect("static regex")
});

/// `Title: Company | Dates`. Titles may not contain `:` or `|`.
pub static JOB_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[^:|]+?)\s*:\s*(?P<company>[^|]*?)\s*\|\s*(?P<dates>.*?)\s*$")
        .expect("static regex")
});

/// `Category: term, term, term`.
pub static SKILL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<category>[^:|]{1,50}?)\s*:\s*(?P<terms>.+?)\s*$").expect("static regex")
});

/// Dollar amounts, percentages, multipliers and `N+` counts.
pub static QUANTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$[0-9][0-9,]*|\b[0-9]+(?:\.[0-9]+)?%|\b[0-9]+x\b|\b[0-9]+\+").expect("static regex")
});

pub static ACTION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:led|managed|developed|created|built|launched|increased|improved|saved|unlocked)\b",
    )
    .expect("static regex")
});

/// A bulleted or numbered line in extracted text.
pub static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[*+•◦▪-]|[0-9]+\.)\s+\S").expect("static regex")
});

/// True when the whole of `value` is a single email address.
pub fn is_email(value: &str) -> bool {
    EMAIL
        .find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

/// Splits a skills line on commas and bullet-like separators, dropping empty terms.
pub fn split_terms(text: &str) -> Vec<String> {
    text.split([',', '•', '·', '|', ';'])
        .map(|t| t.trim().trim_matches('*').trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_matches_standard_address() {
        assert!(EMAIL.is_match("reach me at jane.doe+cv@example.co.uk today"));
        assert!(!EMAIL.is_match("jane.doe at example dot com"));
    }

    #[test]
    fn test_is_email_requires_whole_value() {
        assert!(is_email("jane@example.com"));
        assert!(!is_email("mailto jane@example.com"));
        assert!(!is_email("jane@"));
    }

    #[test]
    fn test_phone_variants() {
        assert!(PHONE.is_match("+1 555-123-4567"));
        assert!(PHONE.is_match("(555) 123-4567"));
        assert!(PHONE.is_match("555.123.4567"));
        assert!(PHONE.is_match("5551234567"));
        assert!(!PHONE.is_match("October 2022 - January 2025"));
    }

    #[test]
    fn test_location_city_state_and_country() {
        assert!(LOCATION.is_match("San Francisco, CA"));
        assert!(LOCATION.is_match("London, United Kingdom"));
        assert!(!LOCATION.is_match("no location here"));
    }

    #[test]
    fn test_linkedin_handle_captured() {
        let caps = LINKEDIN.captures("LinkedIn: jane-doe").unwrap();
        assert_eq!(&caps[1], "jane-doe");
        let caps = LINKEDIN.captures("https://www.linkedin.com/in/jdoe42").unwrap();
        assert_eq!(&caps[1], "jdoe42");
    }

    #[test]
    fn test_job_line_captures_triple() {
        let caps = JOB_LINE
            .captures("Co-Founder & CEO, Scalpel: Scalpel | October 2022 - January 2025")
            .unwrap();
        assert_eq!(&caps["title"], "Co-Founder & CEO, Scalpel");
        assert_eq!(&caps["company"], "Scalpel");
        assert_eq!(&caps["dates"], "October 2022 - January 2025");
    }

    #[test]
    fn test_split_terms_drops_empty() {
        assert_eq!(
            split_terms("Rust, Go •  Python ,, · SQL"),
            vec!["Rust", "Go", "Python", "SQL"]
        );
    }
}
