use crate::engines::generation::genome::Genome;

/// Scores genomes.
///
/// `evaluate` runs on the engine's worker pool, so it may be called
/// concurrently for different genomes but never twice at once for the same
/// genome. It must store its score with [`Genome::set_fitness`] (or
/// [`Genome::add_fitness`]). The generation hooks run on the engine thread;
/// implementations that keep per-generation state need interior mutability.
pub trait Simulator: Send + Sync {
    fn on_begin_generation(&self) {}

    fn evaluate(&self, genome: &Genome);

    fn on_end_generation(&self) {}

    /// Checked once per generation against the elite, unless the caller passed
    /// its own predicate to `simulate_until`.
    fn exit_predicate(&self, elite: &Genome) -> bool;
}

/// Default simulator: leaves every fitness untouched and never asks to stop.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSimulator;

impl Simulator for NullSimulator {
    fn evaluate(&self, _genome: &Genome) {}

    fn exit_predicate(&self, _elite: &Genome) -> bool {
        false
    }
}
