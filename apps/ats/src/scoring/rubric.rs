use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const CONTACT_WEIGHT: u32 = 20;
pub const SECTIONS_WEIGHT: u32 = 20;
pub const WORK_WEIGHT: u32 = 30;
pub const SKILLS_WEIGHT: u32 = 15;
pub const FORMATTING_WEIGHT: u32 = 15;

/// Points lost per distinct offending character class.
pub const HYGIENE_PENALTY: u32 = 5;

/// Share of the contact allotment per field.
pub const CONTACT_SHARES: &[(&str, f64)] = &[("email", 0.4), ("phone", 0.3), ("location", 0.3)];

/// Share of the section-presence allotment per section.
pub const SECTION_SHARES: &[(&str, f64)] = &[
    ("work experience", 0.35),
    ("education", 0.35),
    ("skills", 0.30),
];

/// Maximum points per rubric check. Must add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricWeights {
    pub contact: u32,
    pub sections: u32,
    pub work: u32,
    pub skills: u32,
    pub formatting: u32,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            contact: CONTACT_WEIGHT,
            sections: SECTIONS_WEIGHT,
            work: WORK_WEIGHT,
            skills: SKILLS_WEIGHT,
            formatting: FORMATTING_WEIGHT,
        }
    }
}

impl RubricWeights {
    /// Sum of all weights, widened so oversized overrides cannot wrap.
    pub fn total(&self) -> u64 {
        [self.contact, self.sections, self.work, self.skills, self.formatting]
            .iter()
            .map(|w| u64::from(*w))
            .sum()
    }

    pub fn validate(self) -> Result<Self, AppError> {
        match self.total() {
            100 => Ok(self),
            total => Err(AppError::Config(format!(
                "rubric weights must sum to 100, got {total}"
            ))),
        }
    }
}

/// Points for a fraction of `max`, rounded to the nearest integer.
pub fn share(max: u32, fraction: f64) -> u32 {
    (max as f64 * fraction.clamp(0.0, 1.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        assert_eq!(RubricWeights::default().total(), 100);
        assert!(RubricWeights::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let w = RubricWeights {
            work: 40,
            ..RubricWeights::default()
        };
        assert!(matches!(w.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_sum_that_would_wrap() {
        let w = RubricWeights {
            contact: u32::MAX,
            sections: 41,
            ..RubricWeights::default()
        };
        assert_eq!(w.total(), u64::from(u32::MAX) + 41 + 30 + 15 + 15);
        assert!(matches!(w.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_default_contact_shares_are_whole_points() {
        let points: Vec<u32> = CONTACT_SHARES
            .iter()
            .map(|(_, s)| share(CONTACT_WEIGHT, *s))
            .collect();
        assert_eq!(points, vec![8, 6, 6]);
        let points: Vec<u32> = SECTION_SHARES
            .iter()
            .map(|(_, s)| share(SECTIONS_WEIGHT, *s))
            .collect();
        assert_eq!(points, vec![7, 7, 6]);
    }

    #[test]
    fn test_share_clamps() {
        assert_eq!(share(30, 1.5), 30);
        assert_eq!(share(30, 2.0 / 3.0), 20);
        assert_eq!(share(30, 0.0), 0);
    }
}
