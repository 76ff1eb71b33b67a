//! Saved score reports: a timestamped envelope around [`ScoreReport`],
//! written as pretty JSON or `key=value` lines and read back from either.

pub mod compare;

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::{Rating, ScoreDetails, ScoreReport, SectionScore};

pub use compare::ReportComparison;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Kv,
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "kv" | "text" => Ok(ReportFormat::Kv),
            other => Err(AppError::Config(format!(
                "unknown report format '{other}' (expected json or kv)"
            ))),
        }
    }
}

/// What gets saved to disk: the report plus where and when it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub scorer: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub report: ScoreReport,
}

impl ReportEnvelope {
    pub fn new(source: impl Into<String>, scorer: &str, report: ScoreReport) -> Self {
        Self {
            source: source.into(),
            scorer: scorer.to_string(),
            generated_at: Some(Utc::now()),
            report,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, AppError> {
        match format {
            ReportFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)?;
                json.push('\n');
                Ok(json)
            }
            ReportFormat::Kv => Ok(to_key_value(self)),
        }
    }

    /// Accepts either format; JSON is recognized by its leading `{`.
    pub fn parse(text: &str) -> Result<Self, String> {
        if text.trim_start().starts_with('{') {
            serde_json::from_str(text).map_err(|e| e.to_string())
        } else {
            from_key_value(text)
        }
    }
}

/// Renders the whole report before touching the file, so a failure never
/// leaves partial output behind.
pub fn write_report(
    path: &Path,
    envelope: &ReportEnvelope,
    format: ReportFormat,
) -> Result<(), AppError> {
    let body = envelope.render(format)?;
    std::fs::write(path, body).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), ?format, "report written");
    Ok(())
}

pub fn read_report(path: &Path) -> Result<ReportEnvelope, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ReportEnvelope::parse(&text).map_err(|message| AppError::InvalidReport {
        path: path.to_path_buf(),
        message,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// key=value format
// ────────────────────────────────────────────────────────────────────────────

pub fn to_key_value(envelope: &ReportEnvelope) -> String {
    let report = &envelope.report;
    let mut out = String::new();

    push_line(&mut out, "source", &envelope.source);
    push_line(&mut out, "scorer", &envelope.scorer);
    if let Some(at) = envelope.generated_at {
        push_line(&mut out, "generated_at", &at.to_rfc3339());
    }
    push_line(&mut out, "overall_score", &report.overall_score);
    push_line(&mut out, "rating", &report.rating.as_str());
    push_line(&mut out, "extracted_char_count", &report.extracted_char_count);

    for (name, score) in &report.section_scores {
        push_line(&mut out, &format!("section.{name}.found"), &score.found);
        push_line(&mut out, &format!("section.{name}.points"), &score.points);
        push_line(&mut out, &format!("section.{name}.max"), &score.max);
    }
    for (idx, issue) in report.issues.iter().enumerate() {
        push_line(&mut out, &format!("issue.{}", idx + 1), issue);
    }
    for (idx, rec) in report.recommendations.iter().enumerate() {
        push_line(&mut out, &format!("recommendation.{}", idx + 1), rec);
    }

    let details = &report.details;
    for (key, value) in [
        ("email", &details.email),
        ("phone", &details.phone),
        ("location", &details.location),
        ("linkedin", &details.linkedin),
    ] {
        if let Some(value) = value {
            push_line(&mut out, &format!("detail.{key}"), value);
        }
    }
    push_line(&mut out, "detail.jobs_expected", &details.jobs_expected);
    push_line(&mut out, "detail.jobs_parsed", &details.jobs_parsed);
    push_line(&mut out, "detail.skill_lines_expected", &details.skill_lines_expected);
    push_line(&mut out, "detail.skill_categories_parsed", &details.skill_categories_parsed);
    for (idx, class) in details.offending_classes.iter().enumerate() {
        push_line(&mut out, &format!("detail.offending_class.{}", idx + 1), class);
    }

    let content = &details.content;
    push_line(
        &mut out,
        "detail.content.quantified_achievements",
        content.quantified_achievements,
    );
    push_line(&mut out, "detail.content.action_verbs", content.action_verbs);
    push_line(&mut out, "detail.content.bullet_points", content.bullet_points);
    push_line(&mut out, "detail.content.keyword_count", content.keyword_count);
    push_line(&mut out, "detail.content.keyword_density", content.keyword_density);
    out
}

pub fn from_key_value(text: &str) -> Result<ReportEnvelope, String> {
    let mut source = String::new();
    let mut scorer = String::new();
    let mut generated_at = None;
    let mut overall_score = None;
    let mut rating = None;
    let mut extracted_char_count: usize = 0;
    let mut section_scores: IndexMap<String, SectionScore> = IndexMap::new();
    let mut issues: Vec<(usize, String)> = Vec::new();
    let mut recommendations: Vec<(usize, String)> = Vec::new();
    let mut classes: Vec<(usize, String)> = Vec::new();
    let mut details = ScoreDetails::default();

    for (idx, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() || raw.starts_with('#') {
            continue;
        }
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("line {}: expected key=value", idx + 1))?;
        let value = unescape(value);
        let bad = |what: &str| format!("line {}: invalid {what} '{value}'", idx + 1);

        match key {
            "source" => source = value.clone(),
            "scorer" => scorer = value.clone(),
            "generated_at" => {
                let at = DateTime::parse_from_rfc3339(&value).map_err(|_| bad("timestamp"))?;
                generated_at = Some(at.with_timezone(&Utc));
            }
            "overall_score" => overall_score = Some(value.parse::<u32>().map_err(|_| bad("score"))?),
            "rating" => {
                rating = Some(match value.as_str() {
                    "excellent" => Rating::Excellent,
                    "good" => Rating::Good,
                    "poor" => Rating::Poor,
                    _ => return Err(bad("rating")),
                })
            }
            "extracted_char_count" => {
                extracted_char_count = value.parse().map_err(|_| bad("count"))?
            }
            "detail.email" => details.email = Some(value.clone()),
            "detail.phone" => details.phone = Some(value.clone()),
            "detail.location" => details.location = Some(value.clone()),
            "detail.linkedin" => details.linkedin = Some(value.clone()),
            "detail.jobs_expected" => details.jobs_expected = value.parse().map_err(|_| bad("count"))?,
            "detail.jobs_parsed" => details.jobs_parsed = value.parse().map_err(|_| bad("count"))?,
            "detail.skill_lines_expected" => {
                details.skill_lines_expected = value.parse().map_err(|_| bad("count"))?
            }
            "detail.skill_categories_parsed" => {
                details.skill_categories_parsed = value.parse().map_err(|_| bad("count"))?
            }
            "detail.content.quantified_achievements" => {
                details.content.quantified_achievements = value.parse().map_err(|_| bad("flag"))?
            }
            "detail.content.action_verbs" => {
                details.content.action_verbs = value.parse().map_err(|_| bad("count"))?
            }
            "detail.content.bullet_points" => {
                details.content.bullet_points = value.parse().map_err(|_| bad("count"))?
            }
            "detail.content.keyword_count" => {
                details.content.keyword_count = value.parse().map_err(|_| bad("count"))?
            }
            "detail.content.keyword_density" => {
                details.content.keyword_density = value.parse().map_err(|_| bad("density"))?
            }
            _ => {
                if let Some(n) = key.strip_prefix("issue.") {
                    issues.push((n.parse().map_err(|_| bad("issue index"))?, value.clone()));
                } else if let Some(n) = key.strip_prefix("recommendation.") {
                    recommendations
                        .push((n.parse().map_err(|_| bad("recommendation index"))?, value.clone()));
                } else if let Some(n) = key.strip_prefix("detail.offending_class.") {
                    classes.push((n.parse().map_err(|_| bad("class index"))?, value.clone()));
                } else if let Some(rest) = key.strip_prefix("section.") {
                    let (name, field) = rest
                        .rsplit_once('.')
                        .ok_or_else(|| format!("line {}: malformed section key '{key}'", idx + 1))?;
                    let entry = section_scores.entry(name.to_string()).or_default();
                    match field {
                        "found" => entry.found = value.parse().map_err(|_| bad("flag"))?,
                        "points" => entry.points = value.parse().map_err(|_| bad("points"))?,
                        "max" => entry.max = value.parse().map_err(|_| bad("max"))?,
                        _ => return Err(format!("line {}: unknown section field '{field}'", idx + 1)),
                    }
                }
                // Unknown top-level keys are ignored so newer reports stay readable.
            }
        }
    }

    let overall_score = overall_score.ok_or("missing overall_score")?;
    issues.sort_by_key(|(n, _)| *n);
    recommendations.sort_by_key(|(n, _)| *n);
    classes.sort_by_key(|(n, _)| *n);
    details.offending_classes = classes.into_iter().map(|(_, c)| c).collect();

    Ok(ReportEnvelope {
        source,
        scorer,
        generated_at,
        report: ScoreReport {
            overall_score,
            rating: rating.unwrap_or_else(|| Rating::from_score(overall_score)),
            section_scores,
            issues: issues.into_iter().map(|(_, i)| i).collect(),
            recommendations: recommendations.into_iter().map(|(_, r)| r).collect(),
            extracted_char_count,
            details,
        },
    })
}

fn push_line(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{key}={}", escape(&value.to_string()));
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\n', "\\n")
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
