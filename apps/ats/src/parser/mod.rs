pub mod ats_text;
pub mod front_matter;
pub mod line;
pub mod markdown;

use tracing::info;

use crate::models::{ParseOutcome, ResumeRecord};
use front_matter::{apply_front_matter, split_front_matter};
use markdown::ResumeParser;

/// Parses a Definition-List Markdown resume. Never fails; problems are
/// reported as warnings on the outcome.
pub fn parse_resume(source: &str) -> ParseOutcome {
    let mut record = ResumeRecord::default();
    let mut warnings = Vec::new();

    let skip = match split_front_matter(source) {
        Some(front_matter) => {
            apply_front_matter(&front_matter, &mut record.contact, &mut warnings);
            front_matter.line_count
        }
        None => 0,
    };

    let mut parser = ResumeParser::with_record(record);
    parser.push_warnings(warnings);
    for (idx, line) in source.lines().enumerate().skip(skip) {
        parser.feed(idx + 1, line);
    }

    let outcome = parser.finish();
    info!(
        jobs = outcome.record.work_history.len(),
        unclassified = outcome.record.unclassified.len(),
        education = outcome.record.education.len(),
        skill_categories = outcome.record.skills.len(),
        warnings = outcome.warnings.len(),
        "parsed resume"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WarningKind;

    const RESUME: &str = "\
---
name: Jane Doe
subtitle: Staff Engineer
email: jane@example.com
phone: (555) 123-4567
location: Austin, TX
linkedin: jane-doe
---

### Work Experience

**Staff Engineer**
: Acme Corp | _2021 - Present_
*   Led migration to Rust
*   Mentored four engineers

**Senior Engineer**
: Initech | _2017 - 2021_
*   Built billing pipeline

### Education

**University of Texas**
: Austin, TX | _2013 - 2017_
*   B.S. Computer Science

### Skills

**Languages**
Rust, Go, Python

**Infrastructure**
AWS • Kubernetes • Terraform
";

    #[test]
    fn test_parse_full_resume() {
        let out = parse_resume(RESUME);
        let record = &out.record;

        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(record.contact.name, "Jane Doe");
        assert_eq!(record.contact.title, "Staff Engineer");
        assert_eq!(record.contact.links["LinkedIn"], "jane-doe");

        assert_eq!(record.work_history.len(), 2);
        assert_eq!(record.work_history[0].company, "Acme Corp");
        assert_eq!(record.work_history[0].date_range, "2021 - Present");
        assert_eq!(record.work_history[1].title, "Senior Engineer");

        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].details, vec!["B.S. Computer Science"]);

        let categories: Vec<&str> = record.skills.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["Languages", "Infrastructure"]);
        assert_eq!(record.skill_count(), 6);
        assert!(record.unclassified.is_empty());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_conventional_jobs_have_non_empty_triples() {
        let out = parse_resume(RESUME);
        for job in out.record.all_jobs() {
            assert!(job.missing_fields().is_empty(), "{job:?}");
        }
    }

    #[test]
    fn test_warning_lines_account_for_front_matter() {
        let src = "---\nname: Jane\n---\n### Work Experience\nloose prose\n";
        let out = parse_resume(src);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, WarningKind::UnrecognizedLine);
        assert_eq!(out.warnings[0].line, 5);
    }

    #[test]
    fn test_invalid_email_and_missing_name() {
        let out = parse_resume("---\nemail: nope\n---\n");
        assert!(out.has_warnings_of(WarningKind::InvalidContact));
        assert!(out.has_warnings_of(WarningKind::MissingField));
        assert!(out.record.contact.email.is_empty());
    }

    #[test]
    fn test_leading_separator_without_fields_is_not_front_matter() {
        let out = parse_resume("---\n**Engineer**\n: Acme | 2020\n");
        assert_eq!(out.record.unclassified.len(), 1);
    }
}
