//! Text-level detectors behind the rubric: contact fields, section
//! locations, and entry parseability inside a section.

use std::ops::Range;

use regex::Regex;

use crate::patterns::{split_terms, EMAIL, JOB_LINE, LINKEDIN, LOCATION, PHONE, SKILL_LINE};

const MAX_HEADER_LEN: usize = 40;
const IMPLIED_BLOCK_MIN: usize = 3;

const SECTION_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (SectionKind::Work, &["experience", "employment", "work history"]),
    (SectionKind::Education, &["education"]),
    (SectionKind::Skills, &["skill"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Work,
    Education,
    Skills,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Work => "work experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFindings {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
}

impl ContactFindings {
    pub fn any(&self) -> bool {
        self.email.is_some() || self.phone.is_some() || self.location.is_some()
    }
}

pub fn find_contact(text: &str) -> ContactFindings {
    ContactFindings {
        email: first_match(&EMAIL, text),
        phone: first_match(&PHONE, text),
        location: first_match(&LOCATION, text),
        linkedin: LINKEDIN.captures(text).map(|c| c[1].to_string()),
    }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().trim().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Where a section's body lives, as a range of line indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub lines: Range<usize>,
    /// True when no header was found and the block was inferred from its content.
    pub implied: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    pub work: Option<Region>,
    pub education: Option<Region>,
    pub skills: Option<Region>,
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> Option<&Region> {
        match kind {
            SectionKind::Work => self.work.as_ref(),
            SectionKind::Education => self.education.as_ref(),
            SectionKind::Skills => self.skills.as_ref(),
        }
    }
}

pub fn locate_sections(lines: &[&str]) -> SectionMap {
    let mut map = SectionMap::default();

    // Marked headers (`#`, upper-case, trailing `:`) beat plain lines that
    // merely mention a keyword, such as a tagline.
    for marked_pass in [true, false] {
        for (idx, line) in lines.iter().enumerate() {
            let Some(kind) = header_kind(line) else {
                continue;
            };
            if marked_pass && !is_marked_header(line) {
                continue;
            }
            let slot = match kind {
                SectionKind::Work => &mut map.work,
                SectionKind::Education => &mut map.education,
                SectionKind::Skills => &mut map.skills,
            };
            if slot.is_none() {
                let end = lines[idx + 1..]
                    .iter()
                    .position(|l| is_header_like(l))
                    .map_or(lines.len(), |p| idx + 1 + p);
                *slot = Some(Region {
                    lines: idx + 1..end,
                    implied: false,
                });
            }
        }
    }

    if map.work.is_none() {
        map.work = implied_block(lines, is_job_line, |l| l.is_empty() || is_bullet(l));
    }
    if map.skills.is_none() {
        map.skills = implied_block(lines, is_skill_line, |_| false);
    }
    map
}

/// Short line naming one of the tracked sections: `### Work Experience`,
/// `EDUCATION`, `Technical Skills:`.
pub fn header_kind(line: &str) -> Option<SectionKind> {
    let text = header_text(line)?;
    let lower = text.to_lowercase();
    SECTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(kind, _)| *kind)
}

/// Any header that ends a section body, tracked or not (`PROJECTS`, `## Awards`).
fn is_header_like(line: &str) -> bool {
    if header_kind(line).is_some() {
        return true;
    }
    let Some(text) = header_text(line) else {
        return false;
    };
    if line.trim_start().starts_with('#') {
        return true;
    }
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
}

fn is_marked_header(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('#')
        || line.ends_with(':')
        || line.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

fn header_text(line: &str) -> Option<&str> {
    if is_bullet(line) {
        return None;
    }
    let text = line
        .trim()
        .trim_start_matches('#')
        .trim()
        .trim_end_matches(':')
        .trim();
    if text.is_empty() || text.chars().count() > MAX_HEADER_LEN || text.contains([':', '|']) {
        return None;
    }
    Some(text)
}

/// First run of lines holding at least three `is_entry` lines, where every
/// line in the run is an entry or passes `is_filler`.
fn implied_block(
    lines: &[&str],
    is_entry: impl Fn(&str) -> bool,
    is_filler: impl Fn(&str) -> bool,
) -> Option<Region> {
    let mut start: Option<usize> = None;
    let mut last_entry = 0;
    let mut entries = 0;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim();
        if is_entry(line) {
            if start.is_none() {
                start = Some(idx);
                entries = 0;
            }
            entries += 1;
            last_entry = idx;
        } else if start.is_some() && is_filler(line) {
            continue;
        } else if let Some(s) = start.take() {
            if entries >= IMPLIED_BLOCK_MIN {
                return Some(Region {
                    lines: s..last_entry + 1,
                    implied: true,
                });
            }
        }
    }

    match start {
        Some(s) if entries >= IMPLIED_BLOCK_MIN => Some(Region {
            lines: s..lines.len(),
            implied: true,
        }),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry parseability
// ────────────────────────────────────────────────────────────────────────────

/// Entry lines that look like they were meant to be parsed, and how many were.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parseability {
    pub expected: usize,
    pub parsed: usize,
}

impl Parseability {
    pub fn fraction(&self) -> f64 {
        if self.expected == 0 {
            0.0
        } else {
            self.parsed as f64 / self.expected as f64
        }
    }
}

/// Work entries: `Title: Company | Dates` lines, or `**Title**` followed by
/// `: Company | Dates`. Any other non-bullet line containing `|` is counted
/// as an entry that failed to parse, except directly under a bold title,
/// where it belongs to that title.
pub fn work_parseability(lines: &[&str]) -> Parseability {
    let mut result = Parseability::default();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx].trim();
        idx += 1;
        if line.is_empty() || is_bullet(line) {
            continue;
        }

        if let Some(title) = bold_only(line) {
            result.expected += 1;
            if let Some(next) = next_non_blank(lines, idx) {
                let next_line = lines[next].trim();
                if let Some(def) = next_line.strip_prefix(": ") {
                    idx = next + 1;
                    if !title.is_empty() && split_company_dates(def).is_some() {
                        result.parsed += 1;
                    }
                } else if next_line.contains('|')
                    && !is_bullet(next_line)
                    && parse_job_line(next_line).is_none()
                {
                    // The title's definition, missing its `: ` marker.
                    idx = next + 1;
                }
            }
            continue;
        }

        if line.contains('|') {
            result.expected += 1;
            if parse_job_line(line).is_some() {
                result.parsed += 1;
            }
        }
    }
    result
}

/// Skill entries: `Category: a, b` lines, or a category line followed by a
/// line of terms. Comma-separated lines with no category of their own
/// continue the previous entry and are not counted.
pub fn skills_parseability(lines: &[&str]) -> Parseability {
    let mut result = Parseability::default();
    let mut idx = 0;

    while idx < lines.len() {
        let line = strip_bullet(lines[idx].trim());
        idx += 1;
        if line.is_empty() {
            continue;
        }

        if line.contains(':') {
            result.expected += 1;
            if is_skill_line(line) {
                result.parsed += 1;
            }
            continue;
        }

        if split_terms(line).len() >= 2 {
            continue;
        }

        result.expected += 1;
        let bold = bold_only(line).is_some();
        if let Some(next) = next_non_blank(lines, idx) {
            let terms = strip_bullet(lines[next].trim());
            let term_count = split_terms(terms).len();
            let is_terms = !terms.contains(':') && header_kind(terms).is_none();
            if is_terms && (term_count >= 2 || (bold && term_count == 1)) {
                result.parsed += 1;
                idx = next + 1;
            }
        }
    }
    result
}

pub fn parse_job_line(line: &str) -> Option<(String, String, String)> {
    let caps = JOB_LINE.captures(line.trim())?;
    let title = caps["title"].trim().trim_matches('*').trim();
    let company = caps["company"].trim();
    let dates = caps["dates"].trim().trim_matches('_').trim();
    if title.is_empty() || company.is_empty() || dates.is_empty() {
        return None;
    }
    Some((title.to_string(), company.to_string(), dates.to_string()))
}

fn split_company_dates(def: &str) -> Option<(&str, &str)> {
    let (company, dates) = def.split_once('|')?;
    let company = company.trim();
    let dates = dates.trim().trim_matches('_').trim();
    (!company.is_empty() && !dates.is_empty()).then_some((company, dates))
}

pub fn is_job_line(line: &str) -> bool {
    !is_bullet(line) && parse_job_line(line).is_some()
}

pub fn is_skill_line(line: &str) -> bool {
    if is_bullet(line) || line.contains('|') {
        return false;
    }
    SKILL_LINE
        .captures(line.trim())
        .is_some_and(|caps| !split_terms(&caps["terms"]).is_empty())
}

fn is_bullet(line: &str) -> bool {
    strip_bullet(line.trim()).len() != line.trim().len()
}

fn strip_bullet(line: &str) -> &str {
    for marker in ['*', '-', '+', '•', '·', '▪', '◦'] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    line
}

fn bold_only(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    (!inner.contains('*')).then(|| inner.trim())
}

fn next_non_blank(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&i| !lines[i].trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_find_contact() {
        let found = find_contact(
            "Jane Doe\njane@example.com | (555) 123-4567 | Austin, TX | LinkedIn: jane-doe\n",
        );
        assert_eq!(found.email.as_deref(), Some("jane@example.com"));
        assert_eq!(found.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(found.location.as_deref(), Some("Austin, TX"));
        assert_eq!(found.linkedin.as_deref(), Some("jane-doe"));
        assert!(!find_contact("nothing to see").any());
    }

    #[test]
    fn test_header_kind_variants() {
        assert_eq!(header_kind("### Work Experience"), Some(SectionKind::Work));
        assert_eq!(header_kind("PROFESSIONAL EXPERIENCE"), Some(SectionKind::Work));
        assert_eq!(header_kind("Education:"), Some(SectionKind::Education));
        assert_eq!(header_kind("Technical Skills"), Some(SectionKind::Skills));
        assert_eq!(header_kind("Skills: Rust, Go"), None);
        assert_eq!(header_kind("* Gained experience in Rust"), None);
    }

    #[test]
    fn test_regions_end_at_next_header() {
        let text = lines("Jane\nWORK EXPERIENCE\nA: B | C\n\nPROJECTS\nX\nSKILLS\nRust: fast");
        let map = locate_sections(&text);
        assert_eq!(map.work.as_ref().unwrap().lines, 2..4);
        assert_eq!(map.skills.as_ref().unwrap().lines, 7..8);
        assert!(map.education.is_none());
    }

    #[test]
    fn test_marked_header_preferred_over_tagline() {
        let text = lines("Jane\nExperience Designer\n\nWORK EXPERIENCE\nA: B | C\n");
        let map = locate_sections(&text);
        assert_eq!(map.work.unwrap().lines, 4..5);
    }

    #[test]
    fn test_implied_work_block() {
        let text = lines(
            "Engineer: Acme | 2020 - 2022\n* Did things\n\nEngineer: Initech | 2018 - 2020\nEngineer: Foo | 2016 - 2018\nSKILLS",
        );
        let map = locate_sections(&text);
        let work = map.work.unwrap();
        assert!(work.implied);
        assert_eq!(work.lines, 0..5);
    }

    #[test]
    fn test_two_job_lines_do_not_imply_work() {
        let text = lines("Engineer: Acme | 2020\nEngineer: Initech | 2018\nprose");
        assert!(locate_sections(&text).work.is_none());
    }

    #[test]
    fn test_implied_skills_block_needs_consecutive_lines() {
        let text = lines("Languages: Rust, Go\nCloud: AWS\nDatabases: Postgres\n");
        assert!(locate_sections(&text).skills.unwrap().implied);
        let text = lines("Languages: Rust, Go\n\nCloud: AWS\nDatabases: Postgres\n");
        assert!(locate_sections(&text).skills.is_none());
    }

    #[test]
    fn test_work_parseability_mixed_forms() {
        let text = lines(
            "Engineer: Acme | 2020 - 2022\n* Built\n**Lead**\n: Initech | _2018 - 2020_\nManager | 2016\nProject: Billing",
        );
        let p = work_parseability(&text);
        assert_eq!(p, Parseability { expected: 3, parsed: 2 });
    }

    #[test]
    fn test_work_parseability_missing_colon() {
        let p = work_parseability(&lines("**Job Title**\nCompany Name | _Date Range_"));
        assert_eq!(p, Parseability { expected: 1, parsed: 0 });
    }

    #[test]
    fn test_work_parseability_malformed_job_counted_once() {
        let text = lines("Engineer: Acme | 2020\n**Job Title**\n\nCompany Name | _Date Range_\n* Shipped");
        assert_eq!(work_parseability(&text), Parseability { expected: 2, parsed: 1 });
    }

    #[test]
    fn test_work_parseability_bold_title_before_job_line() {
        let text = lines("**Acme**\nEngineer: Acme | 2020");
        assert_eq!(work_parseability(&text), Parseability { expected: 2, parsed: 1 });
    }

    #[test]
    fn test_skills_parseability_forms() {
        let text = lines("Languages: Rust, Go\n  Python, SQL\n**Cloud**\nAWS • GCP\nTooling\nGit, Docker\nmisc");
        let p = skills_parseability(&text);
        assert_eq!(p, Parseability { expected: 4, parsed: 3 });
    }

    #[test]
    fn test_parse_job_line_strips_emphasis() {
        assert_eq!(
            parse_job_line("Engineer: Acme | _2020 - 2022_"),
            Some(("Engineer".into(), "Acme".into(), "2020 - 2022".into()))
        );
        assert_eq!(parse_job_line("Engineer:  | 2020"), None);
    }
}
