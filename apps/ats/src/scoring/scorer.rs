#![allow(dead_code)]

//! ATS scoring: pluggable trait plus the default weighted-rubric backend.
//!
//! `RubricScorer` algorithm:
//! 1. contact      email / phone / location shares of `weights.contact`
//! 2. sections     work / education / skills shares of `weights.sections`
//! 3. work         `weights.work` × parsed / expected entry lines
//! 4. skills       `weights.skills` × parsed / expected category lines
//! 5. formatting   `weights.formatting` minus a fixed penalty per offending class
//!
//! The sum is clamped to [0, 100]. Scoring never fails. Content signals and
//! recommendations ride along in the report without touching the score.

use indexmap::IndexMap;
use tracing::debug;

use crate::models::{Rating, ScoreDetails, ScoreReport, SectionScore};
use crate::scoring::checks::{
    find_contact, locate_sections, skills_parseability, work_parseability, Parseability,
    SectionKind, SectionMap,
};
use crate::scoring::content::{analyze_content, build_recommendations, NO_TEXT_RECOMMENDATION};
use crate::scoring::hygiene::offending_classes;
use crate::scoring::rubric::{share, RubricWeights, CONTACT_SHARES, HYGIENE_PENALTY, SECTION_SHARES};

pub const CONTACT_KEY: &str = "contact_info";
pub const SECTIONS_KEY: &str = "section_presence";
pub const WORK_KEY: &str = "work_experience";
pub const SKILLS_KEY: &str = "skills";
pub const FORMATTING_KEY: &str = "formatting";

pub const NO_TEXT_ISSUE: &str = "no extractable text";

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the CLI.
pub trait AtsScorer: Send + Sync {
    /// Backend name, for transparency in logs.
    fn name(&self) -> &'static str;

    fn score(&self, text: &str) -> ScoreReport;
}

// ────────────────────────────────────────────────────────────────────────────
// RubricScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RubricScorer {
    weights: RubricWeights,
}

impl RubricScorer {
    pub fn new(weights: RubricWeights) -> Self {
        Self { weights }
    }
}

impl AtsScorer for RubricScorer {
    fn name(&self) -> &'static str {
        "rubric"
    }

    fn score(&self, text: &str) -> ScoreReport {
        compute_rubric_score(text, &self.weights)
    }
}

/// Scores `text` with the default rubric.
#[cfg(test)]
pub fn score_text(text: &str) -> ScoreReport {
    RubricScorer::default().score(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Core rubric
// ────────────────────────────────────────────────────────────────────────────

fn compute_rubric_score(text: &str, weights: &RubricWeights) -> ScoreReport {
    let extracted_char_count = text.chars().count();

    if text.trim().is_empty() {
        return empty_report(weights, extracted_char_count);
    }

    let lines: Vec<&str> = text.lines().collect();
    let mut issues = Vec::new();
    let mut details = ScoreDetails::default();
    let mut section_scores = IndexMap::new();

    // 1. Contact
    let contact = find_contact(text);
    let mut contact_fraction = 0.0;
    for (field, fraction) in CONTACT_SHARES {
        let value = match *field {
            "email" => &contact.email,
            "phone" => &contact.phone,
            _ => &contact.location,
        };
        match value {
            Some(_) => contact_fraction += fraction,
            None => issues.push(missing_contact_issue(field)),
        }
    }
    section_scores.insert(
        CONTACT_KEY.to_string(),
        SectionScore {
            found: contact.any(),
            points: share(weights.contact, contact_fraction),
            max: weights.contact,
        },
    );

    // 2. Section presence
    let sections = locate_sections(&lines);
    let kinds = [SectionKind::Work, SectionKind::Education, SectionKind::Skills];
    let mut present_fraction = 0.0;
    let mut any_present = false;
    for (kind, (_, fraction)) in kinds.iter().zip(SECTION_SHARES) {
        if sections.get(*kind).is_some() {
            present_fraction += fraction;
            any_present = true;
        } else {
            issues.push(format!("missing section: {}", kind.label()));
        }
    }
    section_scores.insert(
        SECTIONS_KEY.to_string(),
        SectionScore {
            found: any_present,
            points: share(weights.sections, present_fraction),
            max: weights.sections,
        },
    );

    // 3. Work parseability
    let work = region_parseability(&lines, &sections, SectionKind::Work, work_parseability);
    details.jobs_expected = work.expected;
    details.jobs_parsed = work.parsed;
    section_scores.insert(
        WORK_KEY.to_string(),
        parseability_score(work, weights.work),
    );
    push_parseability_issue(&mut issues, work, "work experience", "work entries");

    // 4. Skills parseability
    let skills = region_parseability(&lines, &sections, SectionKind::Skills, skills_parseability);
    details.skill_lines_expected = skills.expected;
    details.skill_categories_parsed = skills.parsed;
    section_scores.insert(
        SKILLS_KEY.to_string(),
        parseability_score(skills, weights.skills),
    );
    push_parseability_issue(&mut issues, skills, "skills", "skill lines");

    // 5. Formatting hygiene
    let classes = offending_classes(text);
    let penalty = HYGIENE_PENALTY.saturating_mul(classes.len() as u32);
    section_scores.insert(
        FORMATTING_KEY.to_string(),
        SectionScore {
            found: classes.is_empty(),
            points: weights.formatting.saturating_sub(penalty),
            max: weights.formatting,
        },
    );
    for class in &classes {
        issues.push(class.issue().to_string());
    }
    details.offending_classes = classes.iter().map(|c| c.as_str().to_string()).collect();

    details.email = contact.email;
    details.phone = contact.phone;
    details.location = contact.location;
    details.linkedin = contact.linkedin;
    details.content = analyze_content(text);

    let total: u32 = section_scores.values().map(|s| s.points).sum();
    let overall_score = total.min(100);
    let recommendations = build_recommendations(overall_score, &details.content);
    debug!(overall_score, issues = issues.len(), "rubric scored");

    ScoreReport {
        overall_score,
        rating: Rating::from_score(overall_score),
        section_scores,
        issues,
        recommendations,
        extracted_char_count,
        details,
    }
}

fn empty_report(weights: &RubricWeights, extracted_char_count: usize) -> ScoreReport {
    let section_scores = [
        (CONTACT_KEY, weights.contact),
        (SECTIONS_KEY, weights.sections),
        (WORK_KEY, weights.work),
        (SKILLS_KEY, weights.skills),
        (FORMATTING_KEY, weights.formatting),
    ]
    .into_iter()
    .map(|(key, max)| {
        (
            key.to_string(),
            SectionScore {
                found: false,
                points: 0,
                max,
            },
        )
    })
    .collect();

    ScoreReport {
        overall_score: 0,
        rating: Rating::Poor,
        section_scores,
        issues: vec![NO_TEXT_ISSUE.to_string()],
        recommendations: vec![NO_TEXT_RECOMMENDATION.to_string()],
        extracted_char_count,
        details: ScoreDetails::default(),
    }
}

fn region_parseability(
    lines: &[&str],
    sections: &SectionMap,
    kind: SectionKind,
    check: fn(&[&str]) -> Parseability,
) -> Parseability {
    match sections.get(kind) {
        Some(region) => check(&lines[region.lines.clone()]),
        None => Parseability::default(),
    }
}

fn parseability_score(p: Parseability, max: u32) -> SectionScore {
    SectionScore {
        found: p.parsed > 0,
        points: if p.parsed == 0 { 0 } else { share(max, p.fraction()) },
        max,
    }
}

fn push_parseability_issue(issues: &mut Vec<String>, p: Parseability, section: &str, noun: &str) {
    if p.parsed == 0 {
        issues.push(format!("{section} not parseable"));
    } else if p.parsed < p.expected {
        issues.push(format!(
            "{} of {} {noun} could not be parsed",
            p.expected - p.parsed,
            p.expected
        ));
    }
}

fn missing_contact_issue(field: &str) -> String {
    match field {
        "email" => "missing email address".to_string(),
        "phone" => "missing phone number".to_string(),
        other => format!("missing {other}"),
    }
}
