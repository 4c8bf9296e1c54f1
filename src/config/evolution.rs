use super::traits::ConfigSection;
use crate::error::BitgenesError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Number of evaluation workers.
    pub parallelism: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pause between generations.
    pub generation_delay_micros: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 600,
            parallelism: 4,
            seed: None,
            generation_delay_micros: 1,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), BitgenesError> {
        if self.parallelism == 0 {
            return Err(BitgenesError::Configuration(
                "Parallelism must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
