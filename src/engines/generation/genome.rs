use crate::data::Bitset;
use crate::types::Fitness;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// One candidate solution.
///
/// A genome owns a [`Bitset`] and carries the integer fitness a simulator
/// assigned to it for the current generation. Fitness starts at 0 and is
/// written once per generation by the evaluation worker the genome was handed
/// to, so it is stored in an atomic and written through a shared reference.
///
/// # Bits are shared, not copied
///
/// [`Genome::bits`] exposes the genome's own bitset. Writing through it changes
/// the genome. Operators that must keep a parent intact allocate fresh bitsets
/// for their children instead of editing the parent's bits in place.
///
/// `Clone` follows the same rule: the clone views the same bits and starts
/// with the same fitness.
pub struct Genome {
    bits: Bitset,
    fitness: AtomicI64,
}

impl Genome {
    pub fn new(bits: Bitset) -> Self {
        Self {
            bits,
            fitness: AtomicI64::new(0),
        }
    }

    pub fn bits(&self) -> &Bitset {
        &self.bits
    }

    pub fn fitness(&self) -> Fitness {
        self.fitness.load(Ordering::Acquire)
    }

    /// Overwrite the fitness.
    pub fn set_fitness(&self, fitness: Fitness) {
        self.fitness.store(fitness, Ordering::Release);
    }

    /// Add `delta` to the current fitness, for simulators that score piecewise.
    pub fn add_fitness(&self, delta: Fitness) {
        self.fitness.fetch_add(delta, Ordering::AcqRel);
    }
}

impl Clone for Genome {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            fitness: AtomicI64::new(self.fitness()),
        }
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genome")
            .field("bits", &self.bits)
            .field("fitness", &self.fitness())
            .finish()
    }
}
