#![allow(dead_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Contact block at the top of the resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    /// Tagline shown under the name (front matter `subtitle`).
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Label → URL or handle, in source order (`LinkedIn` → `jdoe`).
    pub links: IndexMap<String, String>,
}

/// A `***Label***` block inside a multi-project role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subproject {
    pub label: String,
    pub bullets: Vec<String>,
}

/// One employment entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    /// Empty only when the source omitted the `: ` definition line.
    pub company: String,
    /// Free text, never parsed into dates.
    pub date_range: String,
    pub bullets: Vec<String>,
    pub subprojects: Vec<Subproject>,
}

impl Job {
    #[cfg(test)]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Names of the required fields left empty by the source.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.company.trim().is_empty() {
            missing.push("company");
        }
        if self.date_range.trim().is_empty() {
            missing.push("date range");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub location: String,
    pub date_range: String,
    pub details: Vec<String>,
}

/// Normalized resume, built in a single parsing pass and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub contact: Contact,
    /// Reverse-chronological as written; never re-sorted.
    pub work_history: Vec<Job>,
    pub education: Vec<EducationEntry>,
    pub skills: IndexMap<String, Vec<String>>,
    /// Entries seen before any section header, or under a header we don't recognize.
    pub unclassified: Vec<Job>,
    /// Best-effort leftovers of malformed lines.
    pub notes: Vec<String>,
}

impl ResumeRecord {
    /// Every job-shaped entry, work history first.
    pub fn all_jobs(&self) -> impl Iterator<Item = &Job> {
        self.work_history.iter().chain(self.unclassified.iter())
    }

    pub fn skill_count(&self) -> usize {
        self.skills.values().map(Vec::len).sum()
    }
}

/// Category of a non-fatal problem found while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// An entry that doesn't follow the `**Title**` / `: Company | _Dates_` shape.
    MalformedEntry,
    /// A line matching no known pattern inside an active section.
    UnrecognizedLine,
    /// A required field left empty (content defect, not a program error).
    MissingField,
    /// A contact value that fails validation (e.g. a malformed email).
    InvalidContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based source line; 0 when the warning concerns the whole document.
    pub line: usize,
    pub kind: WarningKind,
    pub message: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Result of a parsing pass: the record plus every warning collected along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub record: ResumeRecord,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    pub fn has_warnings_of(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}
