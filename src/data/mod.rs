pub mod bitset;
pub mod factory;
pub mod field_decoder;

pub use bitset::Bitset;
pub use factory::{GenomeFactory, NullGenomeFactory, RandomGenomeFactory};
pub use field_decoder::FieldDecoder;
