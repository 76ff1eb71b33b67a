//! Reads the plain-text layout produced by [`crate::render`] back into a
//! [`ResumeRecord`].
//!
//! The layout is positional: three contact lines, a blank line, then blocks
//! under upper-case headers. A header only counts at the start of a block,
//! which is unambiguous because every content line carries a `:`, `|`, `* `
//! or `- ` marker.

use tracing::warn;

use crate::models::{
    Contact, EducationEntry, Job, ParseOutcome, ParseWarning, ResumeRecord, Subproject,
    WarningKind,
};
use crate::patterns::{is_email, PHONE};
use crate::render::{
    ADDITIONAL_HEADER, BULLET_PREFIX, EDUCATION_HEADER, FIELD_SEPARATOR, NOTE_PREFIX,
    PROJECT_PREFIX, SECTION_HEADERS, SKILLS_HEADER, WORK_HEADER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Preamble,
    Work,
    Education,
    Skills,
    AdditionalNotes,
    Additional,
}

struct TextReader {
    block: Block,
    at_block_start: bool,
    job: Option<Job>,
    education: Option<EducationEntry>,
    record: ResumeRecord,
    warnings: Vec<ParseWarning>,
}

pub fn read_ats_text(text: &str) -> ParseOutcome {
    let mut lines = text.lines().enumerate();
    let mut reader = TextReader {
        block: Block::Preamble,
        at_block_start: true,
        job: None,
        education: None,
        record: ResumeRecord::default(),
        warnings: Vec::new(),
    };

    let name = lines.next().map(|(_, l)| l).unwrap_or_default();
    let title = lines.next().map(|(_, l)| l).unwrap_or_default();
    let contact = lines.next().map(|(_, l)| l).unwrap_or_default();
    reader.record.contact = read_contact_line(contact);
    reader.record.contact.name = name.to_string();
    reader.record.contact.title = title.to_string();

    for (idx, line) in lines {
        reader.feed(idx + 1, line);
    }
    reader.close();

    ParseOutcome {
        record: reader.record,
        warnings: reader.warnings,
    }
}

impl TextReader {
    fn feed(&mut self, line_no: usize, line: &str) {
        if line.is_empty() {
            self.close();
            if self.block == Block::AdditionalNotes {
                self.block = Block::Additional;
            }
            self.at_block_start = true;
            return;
        }

        if self.at_block_start && SECTION_HEADERS.contains(&line) {
            self.close();
            self.block = match line {
                WORK_HEADER => Block::Work,
                EDUCATION_HEADER => Block::Education,
                SKILLS_HEADER => Block::Skills,
                ADDITIONAL_HEADER => Block::AdditionalNotes,
                _ => Block::Preamble,
            };
            self.at_block_start = true;
            return;
        }

        let at_start = std::mem::replace(&mut self.at_block_start, false);
        match self.block {
            Block::Work | Block::Additional => {
                if at_start {
                    self.job = Some(read_job_line(line));
                } else if let Some(bullet) = line.strip_prefix(BULLET_PREFIX) {
                    self.push_job_bullet(line_no, bullet);
                } else if let Some(label) = line.strip_prefix(PROJECT_PREFIX) {
                    match self.job.as_mut() {
                        Some(job) => job.subprojects.push(Subproject {
                            label: label.to_string(),
                            bullets: Vec::new(),
                        }),
                        None => self.unexpected(line_no, line),
                    }
                } else {
                    self.unexpected(line_no, line);
                }
            }
            Block::Education => {
                if at_start {
                    let mut parts = line.splitn(3, FIELD_SEPARATOR);
                    self.education = Some(EducationEntry {
                        institution: parts.next().unwrap_or_default().to_string(),
                        location: parts.next().unwrap_or_default().to_string(),
                        date_range: parts.next().unwrap_or_default().to_string(),
                        details: Vec::new(),
                    });
                } else {
                    match (line.strip_prefix(BULLET_PREFIX), self.education.as_mut()) {
                        (Some(detail), Some(entry)) => entry.details.push(detail.to_string()),
                        _ => self.unexpected(line_no, line),
                    }
                }
            }
            Block::Skills => match line.split_once(": ") {
                Some((category, terms)) => {
                    let terms = if terms.is_empty() {
                        Vec::new()
                    } else {
                        terms.split(", ").map(String::from).collect()
                    };
                    self.record.skills.insert(category.to_string(), terms);
                }
                None => self.unexpected(line_no, line),
            },
            Block::AdditionalNotes => match line.strip_prefix(NOTE_PREFIX) {
                Some(note) => self.record.notes.push(note.to_string()),
                None => self.unexpected(line_no, line),
            },
            Block::Preamble => self.unexpected(line_no, line),
        }
    }

    fn push_job_bullet(&mut self, line_no: usize, bullet: &str) {
        match self.job.as_mut() {
            Some(job) => match job.subprojects.last_mut() {
                Some(sub) => sub.bullets.push(bullet.to_string()),
                None => job.bullets.push(bullet.to_string()),
            },
            None => self.unexpected(line_no, bullet),
        }
    }

    fn close(&mut self) {
        if let Some(job) = self.job.take() {
            match self.block {
                Block::Work => self.record.work_history.push(job),
                _ => self.record.unclassified.push(job),
            }
        }
        if let Some(entry) = self.education.take() {
            self.record.education.push(entry);
        }
    }

    fn unexpected(&mut self, line: usize, text: &str) {
        let message = format!("unexpected line in ATS text: '{text}'");
        warn!(line, "{message}");
        self.warnings.push(ParseWarning {
            line,
            kind: WarningKind::UnrecognizedLine,
            message,
        });
        self.record.notes.push(text.to_string());
    }
}

/// Splits `Title: Company | Dates` at the first `: ` and the first ` | ` after it.
fn read_job_line(line: &str) -> Job {
    let (title, rest) = line.split_once(": ").unwrap_or((line, ""));
    let (company, date_range) = rest.split_once(FIELD_SEPARATOR).unwrap_or((rest, ""));
    Job {
        title: title.to_string(),
        company: company.to_string(),
        date_range: date_range.to_string(),
        ..Job::default()
    }
}

/// Trailing `Label: value` parts are links; the rest fill the email, phone
/// and location slots in order. A part that fits no remaining slot is joined
/// onto the last filled one so that re-rendering reproduces the line.
fn read_contact_line(line: &str) -> Contact {
    let mut contact = Contact::default();
    if line.is_empty() {
        return contact;
    }

    let mut parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let mut links = Vec::new();
    while let Some(last) = parts.last() {
        match last.split_once(": ") {
            Some((label, value)) if !label.is_empty() && !label.contains(':') => {
                links.push((label.to_string(), value.to_string()));
                parts.pop();
            }
            _ => break,
        }
    }
    links.reverse();
    contact.links.extend(links);

    let mut slots: [Option<String>; 3] = [None, None, None];
    let mut next = 0;
    let mut last_filled: Option<usize> = None;
    for part in parts {
        let fits = |slot: usize| match slot {
            0 => is_email(part),
            1 => PHONE.find(part).is_some_and(|m| m.as_str() == part.trim()),
            _ => !part.is_empty(),
        };
        match (next..3).find(|&slot| fits(slot)) {
            Some(slot) => {
                slots[slot] = Some(part.to_string());
                next = slot + 1;
                last_filled = Some(slot);
            }
            None => {
                if let Some(slot) = last_filled.and_then(|i| slots[i].as_mut()) {
                    slot.push_str(FIELD_SEPARATOR);
                    slot.push_str(part);
                }
            }
        }
    }

    let [email, phone, location] = slots;
    contact.email = email.unwrap_or_default();
    contact.phone = phone.unwrap_or_default();
    contact.location = location.unwrap_or_default();
    contact
}
