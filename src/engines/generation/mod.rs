pub mod evolution_engine;
pub mod genome;
pub mod mater;
pub mod operators;
pub mod progress;
pub mod selector;

pub use evolution_engine::GeneticAlgorithm;
pub use genome::Genome;
pub use mater::{Mater, MaterEntry, MaterPipeline, NullMater};
pub use operators::{GeneticOperator, MateOperator};
pub use progress::{
    ChannelEliteConsumer, ConsoleEliteConsumer, EliteConsumer, EliteReport, NullEliteConsumer,
};
pub use selector::{
    NullSelector, Roulette, SelectionMethod, SelectionStrategy, Selector, SelectorEntry,
    SelectorPipeline, Tournament,
};
