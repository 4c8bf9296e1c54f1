use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitgenesError {
    #[error("Index {index} out of range for bitset of size {size}")]
    OutOfRange { index: usize, size: usize },

    #[error("Slice [{start}, {end}) exceeds bitset of size {size}")]
    InvalidSlice { start: usize, end: usize, size: usize },

    #[error("Field of {width} bits does not fit in 64 bits")]
    FieldTooWide { width: usize },

    #[error("Input format does not match bitset size: expected {expected} bits, got {actual}")]
    FormatMismatch { expected: usize, actual: usize },

    #[error("Cannot select from an empty population")]
    EmptyPopulation,

    #[error("Total fitness {total_fitness} is larger than the population's fitness sum")]
    FitnessOverflow { total_fitness: i64 },

    #[error("Engine used before init")]
    NotInitialized,

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BitgenesError>;
