//! Line classification for the Definition-List dialect.

/// Shape of a single source line, independent of parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// `---` or `***` on its own.
    Separator,
    /// `### Work Experience`
    Header(&'a str),
    /// `**Title**`
    Bold(&'a str),
    /// `***Project***`
    Subproject(&'a str),
    /// `: Company | _Dates_`
    Definition(&'a str),
    /// `*   Achievement` (also `-`, `+`, `•` markers)
    Bullet(&'a str),
    Text(&'a str),
}

const BULLET_MARKERS: &[char] = &['*', '-', '+', '•'];

pub fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if is_separator(line) {
        return LineKind::Separator;
    }
    if let Some(header) = line.strip_prefix("### ") {
        return LineKind::Header(header.trim());
    }
    if let Some(inner) = wrapped(line, "***") {
        return LineKind::Subproject(inner);
    }
    if let Some(inner) = wrapped(line, "**") {
        if !inner.contains("**") {
            return LineKind::Bold(inner);
        }
    }
    if let Some(rest) = line.strip_prefix(':') {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return LineKind::Definition(rest.trim());
        }
    }
    if let Some(rest) = line.strip_prefix(BULLET_MARKERS) {
        if rest.starts_with(char::is_whitespace) {
            return LineKind::Bullet(rest.trim());
        }
    }
    LineKind::Text(line)
}

/// Splits the original inline education form `**Institution** | Location | _Dates_`
/// into the bold lead and the remainder after the first `|`.
pub fn split_bold_lead(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("**")?;
    let end = rest.find("**")?;
    let lead = rest[..end].trim();
    let tail = rest[end + 2..].trim_start().strip_prefix('|')?;
    if lead.is_empty() {
        return None;
    }
    Some((lead, tail.trim()))
}

/// Strips `_.._` / `*..*` emphasis around a free-text value.
pub fn strip_emphasis(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '_' || c == '*').trim()
}

fn is_separator(line: &str) -> bool {
    line.len() >= 3
        && (line.chars().all(|c| c == '-') || line.chars().all(|c| c == '*'))
}

fn wrapped<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let inner = line.strip_prefix(marker)?.strip_suffix(marker)?.trim();
    if inner.is_empty() || inner.starts_with('*') || inner.ends_with('*') {
        return None;
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_separators() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("---"), LineKind::Separator);
        assert_eq!(classify("***"), LineKind::Separator);
        assert_eq!(classify("-----"), LineKind::Separator);
    }

    #[test]
    fn test_header() {
        assert_eq!(classify("### Work Experience"), LineKind::Header("Work Experience"));
        assert_eq!(classify("## Jane Doe"), LineKind::Text("## Jane Doe"));
    }

    #[test]
    fn test_bold_and_subproject() {
        assert_eq!(
            classify("**Co-Founder & CEO, Scalpel**"),
            LineKind::Bold("Co-Founder & CEO, Scalpel")
        );
        assert_eq!(classify("***Data Platform***"), LineKind::Subproject("Data Platform"));
        assert_eq!(
            classify("**Rust** and **Go**"),
            LineKind::Text("**Rust** and **Go**")
        );
    }

    #[test]
    fn test_definition_requires_space_after_colon() {
        assert_eq!(
            classify(": Scalpel | _October 2022 - January 2025_"),
            LineKind::Definition("Scalpel | _October 2022 - January 2025_")
        );
        assert_eq!(classify(":Scalpel"), LineKind::Text(":Scalpel"));
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(classify("*   Built a platform."), LineKind::Bullet("Built a platform."));
        assert_eq!(classify("  - Shipped v2"), LineKind::Bullet("Shipped v2"));
        assert_eq!(classify("• Led a team"), LineKind::Bullet("Led a team"));
        assert_eq!(classify("*emphasis*"), LineKind::Text("*emphasis*"));
    }

    #[test]
    fn test_split_bold_lead() {
        assert_eq!(
            split_bold_lead("**MIT** | Cambridge, MA | _2014 - 2018_"),
            Some(("MIT", "Cambridge, MA | _2014 - 2018_"))
        );
        assert_eq!(split_bold_lead("**MIT**"), None);
        assert_eq!(split_bold_lead("MIT | Cambridge"), None);
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_emphasis(" _October 2022 - Present_ "), "October 2022 - Present");
        assert_eq!(strip_emphasis("2020"), "2020");
    }
}
