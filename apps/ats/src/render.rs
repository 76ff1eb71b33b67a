//! Plain-text rendering of a [`ResumeRecord`] in the layout ATS parsers
//! read most reliably.
//!
//! ```text
//! Jane Doe
//! Staff Engineer
//! jane@example.com | (555) 123-4567 | Austin, TX | LinkedIn: jane-doe
//!
//! WORK EXPERIENCE
//! Staff Engineer: Acme Corp | 2021 - Present
//! * Led migration to Rust
//! Project: Billing
//! * Rewrote invoicing
//!
//! EDUCATION
//! University of Texas | Austin, TX | 2013 - 2017
//! * B.S. Computer Science
//!
//! SKILLS
//! Languages: Rust, Go, Python
//! ```
//!
//! `ADDITIONAL INFORMATION` is appended only when the record carries notes
//! or unclassified entries: notes first as `- text` lines, a blank line, then
//! the unclassified entries laid out like work experience.

use crate::models::{Contact, EducationEntry, Job, ParseWarning, ResumeRecord, WarningKind};

pub const WORK_HEADER: &str = "WORK EXPERIENCE";
pub const EDUCATION_HEADER: &str = "EDUCATION";
pub const SKILLS_HEADER: &str = "SKILLS";
pub const ADDITIONAL_HEADER: &str = "ADDITIONAL INFORMATION";

pub const SECTION_HEADERS: &[&str] = &[WORK_HEADER, EDUCATION_HEADER, SKILLS_HEADER, ADDITIONAL_HEADER];

pub const FIELD_SEPARATOR: &str = " | ";
pub const BULLET_PREFIX: &str = "* ";
pub const PROJECT_PREFIX: &str = "Project: ";
pub const NOTE_PREFIX: &str = "- ";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedText {
    pub text: String,
    /// Empty required fields. Rendered as blanks, never invented.
    pub warnings: Vec<ParseWarning>,
}

pub fn render_ats_text(record: &ResumeRecord) -> RenderedText {
    let mut lines: Vec<String> = Vec::new();

    lines.push(record.contact.name.clone());
    lines.push(record.contact.title.clone());
    lines.push(contact_line(&record.contact));
    lines.push(String::new());

    lines.push(WORK_HEADER.to_string());
    for job in &record.work_history {
        push_job(&mut lines, job);
    }
    if record.work_history.is_empty() {
        lines.push(String::new());
    }

    lines.push(EDUCATION_HEADER.to_string());
    for entry in &record.education {
        push_education(&mut lines, entry);
    }
    if record.education.is_empty() {
        lines.push(String::new());
    }

    lines.push(SKILLS_HEADER.to_string());
    for (category, terms) in &record.skills {
        lines.push(format!("{category}: {}", terms.join(", ")));
    }
    lines.push(String::new());

    if !record.notes.is_empty() || !record.unclassified.is_empty() {
        lines.push(ADDITIONAL_HEADER.to_string());
        for note in &record.notes {
            lines.push(format!("{NOTE_PREFIX}{note}"));
        }
        lines.push(String::new());
        for job in &record.unclassified {
            push_job(&mut lines, job);
        }
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    let mut text = lines.join("\n");
    text.push('\n');

    RenderedText {
        text,
        warnings: missing_field_warnings(record),
    }
}

/// `email | phone | location | Label: value ...`, skipping empty fields.
pub fn contact_line(contact: &Contact) -> String {
    let mut parts: Vec<String> = [&contact.email, &contact.phone, &contact.location]
        .into_iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();
    parts.extend(
        contact
            .links
            .iter()
            .map(|(label, value)| format!("{label}: {value}")),
    );
    parts.join(FIELD_SEPARATOR)
}

pub fn job_line(job: &Job) -> String {
    format!("{}: {}{FIELD_SEPARATOR}{}", job.title, job.company, job.date_range)
}

fn push_job(lines: &mut Vec<String>, job: &Job) {
    lines.push(job_line(job));
    for bullet in &job.bullets {
        lines.push(format!("{BULLET_PREFIX}{bullet}"));
    }
    for sub in &job.subprojects {
        lines.push(format!("{PROJECT_PREFIX}{}", sub.label));
        for bullet in &sub.bullets {
            lines.push(format!("{BULLET_PREFIX}{bullet}"));
        }
    }
    lines.push(String::new());
}

fn push_education(lines: &mut Vec<String>, entry: &EducationEntry) {
    lines.push(
        [
            entry.institution.as_str(),
            entry.location.as_str(),
            entry.date_range.as_str(),
        ]
        .join(FIELD_SEPARATOR),
    );
    for detail in &entry.details {
        lines.push(format!("{BULLET_PREFIX}{detail}"));
    }
    lines.push(String::new());
}

fn missing_field_warnings(record: &ResumeRecord) -> Vec<ParseWarning> {
    let mut warnings = Vec::new();
    let mut push = |message: String| {
        warnings.push(ParseWarning {
            line: 0,
            kind: WarningKind::MissingField,
            message,
        })
    };

    if record.contact.name.trim().is_empty() {
        push("contact name is missing".to_string());
    }
    for job in record.all_jobs() {
        let missing = job.missing_fields();
        if !missing.is_empty() {
            push(format!(
                "job '{}' rendered without {}",
                job.title,
                missing.join(", ")
            ));
        }
    }
    for entry in &record.education {
        if entry.institution.trim().is_empty() {
            push("education entry rendered without an institution".to_string());
        }
    }
    warnings
}
