//! Content signals and recommendations reported alongside the rubric.
//! Nothing here feeds `overall_score`.

use crate::models::ContentSignals;
use crate::patterns::{ACTION_VERB, BULLET_LINE, QUANTIFIED};

/// Generic resume vocabulary counted for keyword density.
pub const RESUME_KEYWORDS: &[&str] = &[
    "management",
    "leadership",
    "strategy",
    "analysis",
    "development",
    "project",
    "team",
    "client",
    "business",
    "technical",
    "software",
    "data",
    "marketing",
    "sales",
    "operations",
    "finance",
    "design",
];

pub const RECOMMEND_BELOW_SCORE: u32 = 70;
pub const MIN_BULLET_POINTS: usize = 5;
pub const MIN_ACTION_VERBS: usize = 3;

pub const NO_TEXT_RECOMMENDATION: &str =
    "Export the resume with selectable text; nothing could be extracted";

pub fn analyze_content(text: &str) -> ContentSignals {
    let lower = text.to_lowercase();
    // Substring counts, so "projects" counts as "project".
    let keyword_count: usize = RESUME_KEYWORDS
        .iter()
        .map(|keyword| lower.matches(keyword).count())
        .sum();
    let words = text.split_whitespace().count().max(1);
    let density = keyword_count as f64 / words as f64 * 100.0;

    ContentSignals {
        quantified_achievements: QUANTIFIED.is_match(text),
        action_verbs: ACTION_VERB.find_iter(text).count(),
        bullet_points: text.lines().filter(|line| BULLET_LINE.is_match(line)).count(),
        keyword_count,
        keyword_density: (density * 100.0).round() / 100.0,
    }
}

/// Human-readable advice from the final score and the content signals.
pub fn build_recommendations(overall_score: u32, signals: &ContentSignals) -> Vec<String> {
    let mut recommendations = Vec::new();

    if overall_score < RECOMMEND_BELOW_SCORE {
        recommendations.push(format!(
            "Improve ATS compatibility: the score is below {RECOMMEND_BELOW_SCORE}"
        ));
    }
    if signals.bullet_points < MIN_BULLET_POINTS {
        recommendations.push("Add more bullet points for better readability".to_string());
    }
    if !signals.quantified_achievements {
        recommendations.push(
            "Add quantified achievements (numbers, percentages, dollar amounts)".to_string(),
        );
    }
    if signals.action_verbs < MIN_ACTION_VERBS {
        recommendations
            .push("Open more bullets with action verbs such as led, built or improved".to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULLETS: &str = "\
* Led a team of 5 engineers
* Increased revenue 20%
- Built data pipeline
Managed project budget of $1,200,000
";

    #[test]
    fn test_analyze_content_signals() {
        let signals = analyze_content(BULLETS);
        assert!(signals.quantified_achievements);
        assert_eq!(signals.action_verbs, 4);
        assert_eq!(signals.bullet_points, 3);
        // team, data, project over 20 words
        assert_eq!(signals.keyword_count, 3);
        assert_eq!(signals.keyword_density, 15.0);
    }

    #[test]
    fn test_action_verbs_need_word_boundaries() {
        let signals = analyze_content("Leadership of LED lights, misled nobody");
        assert_eq!(signals.action_verbs, 1);
        assert!(!signals.quantified_achievements);
    }

    #[test]
    fn test_quantified_forms() {
        for text in ["saved $40,000", "cut latency 35%", "10x faster", "50+ services"] {
            assert!(analyze_content(text).quantified_achievements, "{text}");
        }
        assert!(!analyze_content("Engineer: Acme | 2020 - 2022").quantified_achievements);
    }

    #[test]
    fn test_density_rounded_to_two_decimals() {
        let signals = analyze_content("data one two");
        assert_eq!(signals.keyword_density, 33.33);
    }

    #[test]
    fn test_recommendations_for_weak_resume() {
        let recs = build_recommendations(40, &analyze_content("Wrote code"));
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("below 70"));
        assert!(recs.iter().any(|r| r.contains("quantified achievements")));
    }

    #[test]
    fn test_no_recommendations_for_strong_resume() {
        let signals = ContentSignals {
            quantified_achievements: true,
            action_verbs: 6,
            bullet_points: 8,
            keyword_count: 4,
            keyword_density: 2.5,
        };
        assert!(build_recommendations(90, &signals).is_empty());
    }
}
