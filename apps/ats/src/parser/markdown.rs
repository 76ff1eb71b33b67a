#![allow(dead_code)]

//! Definition-List Markdown state machine.
//!
//! # Grammar
//! ```text
//! ### Work Experience            section header
//! **Title**                      entry start (InEntry)
//! : Company | _Dates_            definition line (InBulletList)
//! *   Achievement                bullet
//! ***Project***                  subproject (InSubproject)
//! ---                            separator
//! ```
//!
//! Skills sections use `**Category**` followed by a plain line of terms.
//! Nothing here is fatal: malformed lines degrade to notes and warnings.

use tracing::{debug, warn};

use crate::models::{
    EducationEntry, Job, ParseOutcome, ParseWarning, ResumeRecord, Subproject, WarningKind,
};
use crate::parser::line::{classify, split_bold_lead, strip_emphasis, LineKind};
use crate::patterns::split_terms;

/// Collection that entries are dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Work,
    Education,
    Skills,
    Unclassified,
}

impl Section {
    pub fn from_header(header: &str) -> Self {
        let lower = header.to_lowercase();
        if lower.contains("experience") || lower.contains("employment") || lower.contains("work history")
        {
            Section::Work
        } else if lower.contains("education") {
            Section::Education
        } else if lower.contains("skill") {
            Section::Skills
        } else {
            Section::Unclassified
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No section header seen yet.
    Idle,
    /// Inside a section, no entry accepting bullets.
    InSection,
    /// Bold title seen, waiting for its `: ` definition line (or skill terms).
    InEntry,
    /// Entry open; bullets attach to it.
    InBulletList,
    /// Subproject open; bullets attach to the latest subproject.
    InSubproject,
}

#[derive(Debug)]
struct PendingTitle {
    text: String,
    line: usize,
    /// Skills only: terms already attached through bullet lines.
    has_terms: bool,
}

#[derive(Debug)]
enum OpenEntry {
    Job { job: Job, section: Section },
    Education(EducationEntry),
}

impl OpenEntry {
    /// Whether the run that bullets currently attach to has any items yet.
    fn has_items(&self, in_subproject: bool) -> bool {
        match self {
            OpenEntry::Job { job, .. } if in_subproject => job
                .subprojects
                .last()
                .is_some_and(|sub| !sub.bullets.is_empty()),
            OpenEntry::Job { job, .. } => !job.bullets.is_empty(),
            OpenEntry::Education(entry) => !entry.details.is_empty(),
        }
    }
}

pub struct ResumeParser {
    state: ParserState,
    section: Section,
    header_seen: bool,
    pending: Option<PendingTitle>,
    current: Option<(OpenEntry, usize)>,
    record: ResumeRecord,
    warnings: Vec<ParseWarning>,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        Self::with_record(ResumeRecord::default())
    }

    /// Starts from a record that already carries front matter contact info.
    pub fn with_record(record: ResumeRecord) -> Self {
        Self {
            state: ParserState::Idle,
            section: Section::Unclassified,
            header_seen: false,
            pending: None,
            current: None,
            record,
            warnings: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn push_warnings(&mut self, warnings: impl IntoIterator<Item = ParseWarning>) {
        self.warnings.extend(warnings);
    }

    /// Feeds one source line (1-based `line_no`).
    pub fn feed(&mut self, line_no: usize, raw: &str) {
        let kind = classify(raw);

        if let LineKind::Text(text) = kind {
            if raw.starts_with([' ', '\t']) && self.append_continuation(text) {
                return;
            }
        }

        if self.state == ParserState::InEntry {
            self.on_pending_line(line_no, kind);
        } else {
            self.on_line(line_no, kind);
        }
    }

    pub fn finish(mut self) -> ParseOutcome {
        if self.pending.is_some() {
            self.abandon_pending();
        }
        self.close_entry();

        if self.record.contact.name.trim().is_empty() {
            self.warnings.push(ParseWarning {
                line: 0,
                kind: WarningKind::MissingField,
                message: "contact name is missing".to_string(),
            });
        }

        ParseOutcome {
            record: self.record,
            warnings: self.warnings,
        }
    }

    // ── state handlers ──────────────────────────────────────────────────────

    fn on_line(&mut self, line_no: usize, kind: LineKind<'_>) {
        match kind {
            LineKind::Blank => {
                let in_subproject = self.state == ParserState::InSubproject;
                let ends_run = matches!(
                    self.state,
                    ParserState::InBulletList | ParserState::InSubproject
                ) && self
                    .current
                    .as_ref()
                    .is_some_and(|(e, _)| e.has_items(in_subproject));
                if ends_run {
                    self.transition(line_no, ParserState::InSection);
                }
            }
            LineKind::Separator => {
                self.close_entry();
                self.transition(line_no, self.rest_state());
            }
            LineKind::Header(header) => {
                self.close_entry();
                self.section = Section::from_header(header);
                self.header_seen = true;
                debug!(line = line_no, header, section = ?self.section, "section header");
                self.transition(line_no, ParserState::InSection);
            }
            LineKind::Bold(title) => {
                self.close_entry();
                self.pending = Some(PendingTitle {
                    text: title.to_string(),
                    line: line_no,
                    has_terms: false,
                });
                self.transition(line_no, ParserState::InEntry);
            }
            LineKind::Subproject(label) => self.on_subproject(line_no, label),
            LineKind::Definition(text) => {
                self.unrecognized(
                    line_no,
                    text,
                    WarningKind::MalformedEntry,
                    "definition line without a preceding bold title",
                );
            }
            LineKind::Bullet(text) => self.on_bullet(line_no, text),
            LineKind::Text(text) => self.on_text(line_no, text),
        }
    }

    fn on_pending_line(&mut self, line_no: usize, kind: LineKind<'_>) {
        if self.section == Section::Skills {
            match kind {
                LineKind::Text(terms) | LineKind::Definition(terms) => {
                    self.add_skill_terms(terms);
                    self.pending = None;
                    self.transition(line_no, ParserState::InSection);
                    return;
                }
                LineKind::Bullet(terms) => {
                    self.add_skill_terms(terms);
                    return;
                }
                _ => {}
            }
        } else {
            match kind {
                LineKind::Definition(text) => {
                    let (company, date_range) = split_definition(text);
                    self.open_from_pending(company, date_range);
                    self.transition(line_no, ParserState::InBulletList);
                    return;
                }
                LineKind::Text(text) => {
                    // The colon is mandatory: keep the title, leave the company empty.
                    let title = self.pending.as_ref().map(|p| p.text.clone()).unwrap_or_default();
                    self.malformed(
                        line_no,
                        format!("'**{title}**' is not followed by a ': ' definition line; company left empty"),
                    );
                    self.open_from_pending(String::new(), String::new());
                    self.record.notes.push(text.to_string());
                    self.transition(line_no, ParserState::InBulletList);
                    return;
                }
                LineKind::Bullet(text) => {
                    let title = self.pending.as_ref().map(|p| p.text.clone()).unwrap_or_default();
                    self.malformed(
                        line_no,
                        format!("'**{title}**' has bullets but no ': ' definition line"),
                    );
                    self.open_from_pending(String::new(), String::new());
                    self.transition(line_no, ParserState::InBulletList);
                    self.push_item(text);
                    return;
                }
                _ => {}
            }
        }

        // Blank, separator, header, another title or a subproject marker ends the
        // pending title without content.
        self.abandon_pending();
        self.transition(line_no, self.rest_state());
        if kind != LineKind::Blank {
            self.on_line(line_no, kind);
        }
    }

    fn on_subproject(&mut self, line_no: usize, label: &str) {
        match self.current.as_mut() {
            Some((OpenEntry::Job { job, .. }, _)) => {
                job.subprojects.push(Subproject {
                    label: label.to_string(),
                    bullets: Vec::new(),
                });
                self.transition(line_no, ParserState::InSubproject);
            }
            _ => {
                self.malformed(line_no, format!("subproject '***{label}***' outside of a job"));
                self.record.notes.push(label.to_string());
            }
        }
    }

    fn on_bullet(&mut self, line_no: usize, text: &str) {
        match self.state {
            ParserState::InBulletList | ParserState::InSubproject => self.push_item(text),
            _ => self.unrecognized(
                line_no,
                text,
                WarningKind::UnrecognizedLine,
                "bullet outside of an entry",
            ),
        }
    }

    fn on_text(&mut self, line_no: usize, text: &str) {
        if self.section == Section::Education {
            if let Some((institution, rest)) = split_bold_lead(text) {
                self.close_entry();
                let mut parts = rest.split('|');
                let location = parts.next().map(strip_emphasis).unwrap_or_default();
                let date_range = parts.next().map(strip_emphasis).unwrap_or_default();
                let entry = EducationEntry {
                    institution: institution.to_string(),
                    location: location.to_string(),
                    date_range: date_range.to_string(),
                    details: Vec::new(),
                };
                self.current = Some((OpenEntry::Education(entry), line_no));
                self.transition(line_no, ParserState::InBulletList);
                return;
            }
        }

        if self.state == ParserState::Idle {
            if let Some(name) = text.strip_prefix("# ") {
                if self.record.contact.name.is_empty() {
                    self.record.contact.name = name.trim().to_string();
                    return;
                }
            }
        }

        self.unrecognized(
            line_no,
            text,
            WarningKind::UnrecognizedLine,
            "line matches no known pattern",
        );
    }

    // ── entry bookkeeping ───────────────────────────────────────────────────

    fn open_from_pending(&mut self, company: String, date_range: String) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let entry = match self.section {
            Section::Education => OpenEntry::Education(EducationEntry {
                institution: pending.text,
                location: company,
                date_range,
                details: Vec::new(),
            }),
            section => OpenEntry::Job {
                job: Job {
                    title: pending.text,
                    company,
                    date_range,
                    ..Job::default()
                },
                section,
            },
        };
        self.current = Some((entry, pending.line));
    }

    fn push_item(&mut self, text: &str) {
        let in_subproject = self.state == ParserState::InSubproject;
        match self.current.as_mut() {
            Some((OpenEntry::Job { job, .. }, _)) => match job.subprojects.last_mut() {
                Some(sub) if in_subproject => sub.bullets.push(text.to_string()),
                _ => job.bullets.push(text.to_string()),
            },
            Some((OpenEntry::Education(entry), _)) => entry.details.push(text.to_string()),
            None => self.record.notes.push(text.to_string()),
        }
    }

    /// Joins an indented plain line onto the previous bullet.
    fn append_continuation(&mut self, text: &str) -> bool {
        if !matches!(
            self.state,
            ParserState::InBulletList | ParserState::InSubproject
        ) {
            return false;
        }
        let in_subproject = self.state == ParserState::InSubproject;
        let last = match self.current.as_mut() {
            Some((OpenEntry::Job { job, .. }, _)) => match job.subprojects.last_mut() {
                Some(sub) if in_subproject => sub.bullets.last_mut(),
                _ => job.bullets.last_mut(),
            },
            Some((OpenEntry::Education(entry), _)) => entry.details.last_mut(),
            None => None,
        };
        match last {
            Some(item) => {
                item.push(' ');
                item.push_str(text);
                true
            }
            None => false,
        }
    }

    fn add_skill_terms(&mut self, terms: &str) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.has_terms = true;
        self.record
            .skills
            .entry(pending.text.clone())
            .or_default()
            .extend(split_terms(terms));
    }

    /// Drops a pending title that never received its definition line.
    fn abandon_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.has_terms {
            return;
        }
        let message = if self.section == Section::Skills {
            format!("skill category '**{}**' has no terms", pending.text)
        } else {
            format!(
                "'**{}**' is not followed by a ': ' definition line; kept as a note",
                pending.text
            )
        };
        self.malformed(pending.line, message);
        self.record.notes.push(pending.text);
    }

    fn close_entry(&mut self) {
        let Some((entry, line)) = self.current.take() else {
            return;
        };
        match entry {
            OpenEntry::Job { job, section } => {
                let missing = job.missing_fields();
                if !missing.is_empty() {
                    self.warnings.push(ParseWarning {
                        line,
                        kind: WarningKind::MissingField,
                        message: format!("job '{}' is missing {}", job.title, missing.join(", ")),
                    });
                }
                match section {
                    Section::Work => self.record.work_history.push(job),
                    _ => self.record.unclassified.push(job),
                }
            }
            OpenEntry::Education(entry) => {
                if entry.institution.trim().is_empty() {
                    self.warnings.push(ParseWarning {
                        line,
                        kind: WarningKind::MissingField,
                        message: "education entry is missing its institution".to_string(),
                    });
                }
                self.record.education.push(entry);
            }
        }
    }

    // ── diagnostics ─────────────────────────────────────────────────────────

    fn malformed(&mut self, line: usize, message: String) {
        warn!(line, "{message}");
        self.warnings.push(ParseWarning {
            line,
            kind: WarningKind::MalformedEntry,
            message,
        });
    }

    /// Lines before the first header are skipped quietly; afterwards they are
    /// kept as notes and reported.
    fn unrecognized(&mut self, line: usize, text: &str, kind: WarningKind, reason: &str) {
        if !self.header_seen {
            debug!(line, text, "skipping line before first section header");
            return;
        }
        let message = format!("{reason}: '{text}'");
        warn!(line, "{message}");
        self.warnings.push(ParseWarning {
            line,
            kind,
            message,
        });
        self.record.notes.push(text.to_string());
    }

    fn rest_state(&self) -> ParserState {
        if self.header_seen {
            ParserState::InSection
        } else {
            ParserState::Idle
        }
    }

    fn transition(&mut self, line: usize, to: ParserState) {
        if self.state != to {
            debug!(line, from = ?self.state, to = ?to, "parser transition");
            self.state = to;
        }
    }
}

/// Splits `Company | _Dates_` on the first `|`.
pub fn split_definition(text: &str) -> (String, String) {
    match text.split_once('|') {
        Some((company, dates)) => (
            company.trim().to_string(),
            strip_emphasis(dates).to_string(),
        ),
        None => (text.trim().to_string(), String::new()),
    }
}
