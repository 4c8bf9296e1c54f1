//! Bitstring genetic algorithm engine.
//!
//! Callers plug in a [`GenomeFactory`], a [`Simulator`] that scores genomes and
//! optionally an [`EliteConsumer`]; the [`GeneticAlgorithm`] runs the
//! evaluate / select / mate / replace cycle, scoring each generation on a
//! bounded worker pool.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use data::{Bitset, FieldDecoder, GenomeFactory, NullGenomeFactory, RandomGenomeFactory};
pub use engines::evaluation::{NullSimulator, Simulator};
pub use engines::generation::{
    ChannelEliteConsumer, ConsoleEliteConsumer, EliteConsumer, EliteReport, GeneticAlgorithm,
    GeneticOperator, Genome, MateOperator, Mater, MaterEntry, MaterPipeline, NullEliteConsumer,
    NullMater, NullSelector, Roulette, SelectionMethod, SelectionStrategy, Selector,
    SelectorEntry, SelectorPipeline, Tournament,
};
pub use error::{BitgenesError, Result};
pub use types::Fitness;
