#![allow(dead_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of one rubric check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub found: bool,
    pub points: u32,
    pub max: u32,
}

impl SectionScore {
    pub fn is_full(&self) -> bool {
        self.points >= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Poor,
}

impl Rating {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Rating::Excellent,
            s if s >= 60 => Rating::Good,
            _ => Rating::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Poor => "poor",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent ATS compatibility.",
            Rating::Good => "Good ATS compatibility, some improvements needed.",
            Rating::Poor => "Poor ATS compatibility, significant improvements needed.",
        }
    }
}

/// Content signals reported next to the rubric. They never move the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSignals {
    /// Numbers, percentages or dollar amounts appear somewhere.
    pub quantified_achievements: bool,
    pub action_verbs: usize,
    pub bullet_points: usize,
    pub keyword_count: usize,
    /// Keyword hits per 100 words, rounded to two decimals.
    pub keyword_density: f64,
}

/// What the individual checks actually matched, for transparency and report diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub jobs_expected: usize,
    pub jobs_parsed: usize,
    pub skill_lines_expected: usize,
    pub skill_categories_parsed: usize,
    pub offending_classes: Vec<String>,
    #[serde(default)]
    pub content: ContentSignals,
}

/// Heuristic ATS compatibility report. An approximation of how real ATS
/// parsers behave, not a guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall_score: u32,
    pub rating: Rating,
    pub section_scores: IndexMap<String, SectionScore>,
    pub issues: Vec<String>,
    /// Advice on top of the issues; not reflected in `overall_score`.
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub extracted_char_count: usize,
    #[serde(default)]
    pub details: ScoreDetails,
}

impl ScoreReport {
    pub fn section(&self, name: &str) -> Option<&SectionScore> {
        self.section_scores.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Rating::from_score(100), Rating::Excellent);
        assert_eq!(Rating::from_score(80), Rating::Excellent);
        assert_eq!(Rating::from_score(79), Rating::Good);
        assert_eq!(Rating::from_score(60), Rating::Good);
        assert_eq!(Rating::from_score(59), Rating::Poor);
        assert_eq!(Rating::from_score(0), Rating::Poor);
    }

    #[test]
    fn test_section_score_is_full() {
        let s = SectionScore {
            found: true,
            points: 15,
            max: 15,
        };
        assert!(s.is_full());
        assert!(!SectionScore { points: 14, ..s }.is_full());
    }

    #[test]
    fn test_report_without_details_deserializes() {
        let json = r#"{
            "overall_score": 42,
            "rating": "poor",
            "section_scores": {"contact_info": {"found": true, "points": 20, "max": 20}},
            "issues": ["missing section: skills"],
            "extracted_char_count": 120
        }"#;
        let report: ScoreReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.overall_score, 42);
        assert_eq!(report.details, ScoreDetails::default());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.section("contact_info").unwrap().points, 20);
    }
}
