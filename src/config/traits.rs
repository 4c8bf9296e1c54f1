use crate::error::BitgenesError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), BitgenesError>;
}

pub(crate) fn check_probability(section: &str, probability: f32) -> Result<(), BitgenesError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(BitgenesError::Configuration(format!(
            "{}: probability {} must be between 0 and 1",
            section, probability
        )));
    }
    Ok(())
}
