use super::bitset::Bitset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the bitsets of the initial population.
///
/// Called once per population slot when the engine is initialised. Every call
/// should produce a bitset in the same format.
pub trait GenomeFactory: Send {
    fn create(&mut self) -> Bitset;
}

/// Default factory: empty bitsets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullGenomeFactory;

impl GenomeFactory for NullGenomeFactory {
    fn create(&mut self) -> Bitset {
        Bitset::new(0)
    }
}

impl<F> GenomeFactory for F
where
    F: FnMut() -> Bitset + Send,
{
    fn create(&mut self) -> Bitset {
        self()
    }
}

/// Bitsets of a fixed size with every bit drawn from a fair coin.
pub struct RandomGenomeFactory {
    size: usize,
    rng: StdRng,
}

impl RandomGenomeFactory {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { size, rng }
    }
}

impl GenomeFactory for RandomGenomeFactory {
    fn create(&mut self) -> Bitset {
        (0..self.size).map(|_| self.rng.gen_bool(0.5)).collect()
    }
}
