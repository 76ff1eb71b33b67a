use anyhow::{Context, Result};

use crate::report::ReportFormat;
use crate::scoring::RubricWeights;

/// Application configuration loaded from environment variables.
/// Every variable is optional; CLI flags override what is set here.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub report_format: ReportFormat,
    pub weights: RubricWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let report_format = match lookup("ATS_REPORT_FORMAT") {
            Some(value) => value
                .parse::<ReportFormat>()
                .context("ATS_REPORT_FORMAT must be 'json' or 'kv'")?,
            None => ReportFormat::default(),
        };

        let defaults = RubricWeights::default();
        let weight = |key: &str, default: u32| -> Result<u32> {
            match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("{key} must be a non-negative integer")),
                None => Ok(default),
            }
        };
        let weights = RubricWeights {
            contact: weight("ATS_WEIGHT_CONTACT", defaults.contact)?,
            sections: weight("ATS_WEIGHT_SECTIONS", defaults.sections)?,
            work: weight("ATS_WEIGHT_WORK", defaults.work)?,
            skills: weight("ATS_WEIGHT_SKILLS", defaults.skills)?,
            formatting: weight("ATS_WEIGHT_FORMATTING", defaults.formatting)?,
        }
        .validate()
        .context("Invalid ATS_WEIGHT_* overrides")?;

        Ok(Config {
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            report_format,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.rust_log, "info");
        assert_eq!(cfg.report_format, ReportFormat::Json);
        assert_eq!(cfg.weights, RubricWeights::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("RUST_LOG", "debug"),
            ("ATS_REPORT_FORMAT", "kv"),
            ("ATS_WEIGHT_WORK", "25"),
            ("ATS_WEIGHT_CONTACT", "25"),
        ])
        .unwrap();
        assert_eq!(cfg.rust_log, "debug");
        assert_eq!(cfg.report_format, ReportFormat::Kv);
        assert_eq!(cfg.weights.work, 25);
        assert_eq!(cfg.weights.contact, 25);
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        assert!(config(&[("ATS_WEIGHT_WORK", "50")]).is_err());
        assert!(config(&[("ATS_WEIGHT_SKILLS", "lots")]).is_err());
    }

    #[test]
    fn test_oversized_weight_is_a_config_error() {
        let err = config(&[
            ("ATS_WEIGHT_CONTACT", "4294967295"),
            ("ATS_WEIGHT_SECTIONS", "41"),
        ])
        .unwrap_err();
        assert!(format!("{err:#}").contains("must sum to 100"));
        assert!(config(&[("ATS_WEIGHT_CONTACT", "4294967296")]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(config(&[("ATS_REPORT_FORMAT", "yaml")]).is_err());
    }
}
