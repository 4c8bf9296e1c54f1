use super::traits::{check_probability, ConfigSection};
use crate::engines::generation::selector::SelectionMethod;
use crate::error::BitgenesError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Tried in order; see `SelectorPipeline`.
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyConfig {
    pub method: SelectionMethod,
    pub probability: f32,
    /// Only read by `Tournament`.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
}

fn default_tournament_size() -> usize {
    3
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            strategies: vec![StrategyConfig {
                method: SelectionMethod::Roulette,
                probability: 1.0,
                tournament_size: default_tournament_size(),
            }],
        }
    }
}

impl ConfigSection for SelectionConfig {
    fn section_name() -> &'static str {
        "selection"
    }

    fn validate(&self) -> Result<(), BitgenesError> {
        for step in &self.strategies {
            check_probability(Self::section_name(), step.probability)?;
            if step.method == SelectionMethod::Tournament && step.tournament_size == 0 {
                return Err(BitgenesError::Configuration(
                    "Tournament size must be at least 1".to_string(),
                ));
            }
        }
        // a list that can never fire would make selection spin forever
        if !self.strategies.iter().any(|step| step.probability > 0.0) {
            return Err(BitgenesError::Configuration(
                "At least one selection strategy needs a probability above 0".to_string(),
            ));
        }
        Ok(())
    }
}
