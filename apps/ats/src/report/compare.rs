#![allow(dead_code)]

//! Side-by-side view of two score reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ScoreReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDelta {
    pub name: String,
    /// `None` when the section is absent from that report.
    pub before: Option<u32>,
    pub after: Option<u32>,
    pub max: u32,
}

impl SectionDelta {
    pub fn delta(&self) -> i64 {
        i64::from(self.after.unwrap_or(0)) - i64::from(self.before.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportComparison {
    pub before_label: String,
    pub after_label: String,
    pub before_score: u32,
    pub after_score: u32,
    pub sections: Vec<SectionDelta>,
    /// Issues present before but gone after.
    pub resolved_issues: Vec<String>,
    /// Issues that only show up in the second report.
    pub new_issues: Vec<String>,
}

impl ReportComparison {
    pub fn between(before: &ScoreReport, after: &ScoreReport) -> Self {
        let mut sections: Vec<SectionDelta> = before
            .section_scores
            .iter()
            .map(|(name, score)| SectionDelta {
                name: name.clone(),
                before: Some(score.points),
                after: after.section(name).map(|s| s.points),
                max: score.max,
            })
            .collect();
        sections.extend(
            after
                .section_scores
                .iter()
                .filter(|(name, _)| !before.section_scores.contains_key(*name))
                .map(|(name, score)| SectionDelta {
                    name: name.clone(),
                    before: None,
                    after: Some(score.points),
                    max: score.max,
                }),
        );

        Self {
            before_label: "before".to_string(),
            after_label: "after".to_string(),
            before_score: before.overall_score,
            after_score: after.overall_score,
            sections,
            resolved_issues: difference(&before.issues, &after.issues),
            new_issues: difference(&after.issues, &before.issues),
        }
    }

    pub fn with_labels(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_label = before.into();
        self.after_label = after.into();
        self
    }

    pub fn score_delta(&self) -> i64 {
        i64::from(self.after_score) - i64::from(self.before_score)
    }

    pub fn improved(&self) -> bool {
        self.score_delta() > 0
    }
}

fn difference(left: &[String], right: &[String]) -> Vec<String> {
    left.iter().filter(|i| !right.contains(i)).cloned().collect()
}

fn points(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |p| p.to_string())
}

impl fmt::Display for ReportComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Overall: {} {}/100 -> {} {}/100 ({:+})",
            self.before_label,
            self.before_score,
            self.after_label,
            self.after_score,
            self.score_delta()
        )?;
        for section in &self.sections {
            writeln!(
                f,
                "  {:<18} {:>3} -> {:>3} / {:<3} ({:+})",
                section.name,
                points(section.before),
                points(section.after),
                section.max,
                section.delta()
            )?;
        }
        if !self.resolved_issues.is_empty() {
            writeln!(f, "Resolved issues:")?;
            for issue in &self.resolved_issues {
                writeln!(f, "  - {issue}")?;
            }
        }
        if !self.new_issues.is_empty() {
            writeln!(f, "New issues:")?;
            for issue in &self.new_issues {
                writeln!(f, "  + {issue}")?;
            }
        }
        Ok(())
    }
}
