pub mod evolution;
pub mod manager;
pub mod mating;
pub mod selection;
pub mod traits;

pub use evolution::EvolutionConfig;
pub use manager::{AppConfig, ConfigManager};
pub use mating::{MatingConfig, OperatorConfig};
pub use selection::{SelectionConfig, StrategyConfig};
pub use traits::ConfigSection;
