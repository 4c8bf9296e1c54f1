use super::traits::{check_probability, ConfigSection};
use crate::engines::generation::operators::GeneticOperator;
use crate::error::BitgenesError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatingConfig {
    /// Applied in order; see `MaterPipeline`.
    pub operators: Vec<OperatorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatorConfig {
    pub operator: GeneticOperator,
    pub probability: f32,
    #[serde(default)]
    pub use_elite: bool,
}

impl Default for MatingConfig {
    fn default() -> Self {
        Self {
            operators: vec![
                OperatorConfig {
                    operator: GeneticOperator::TwoPointCrossover,
                    probability: 1.0,
                    use_elite: false,
                },
                OperatorConfig {
                    operator: GeneticOperator::Mutate,
                    probability: 1.0,
                    use_elite: false,
                },
                OperatorConfig {
                    operator: GeneticOperator::UniformCrossover,
                    probability: 1.0,
                    use_elite: true,
                },
            ],
        }
    }
}

impl ConfigSection for MatingConfig {
    fn section_name() -> &'static str {
        "mating"
    }

    fn validate(&self) -> Result<(), BitgenesError> {
        for step in &self.operators {
            check_probability(Self::section_name(), step.probability)?;
        }
        Ok(())
    }
}
