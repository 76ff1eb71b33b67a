pub mod checks;
pub mod content;
pub mod hygiene;
pub mod rubric;
pub mod scorer;

pub use hygiene::sanitize_for_ats;
pub use rubric::RubricWeights;
pub use scorer::{AtsScorer, RubricScorer};

#[cfg(test)]
pub use scorer::score_text;
