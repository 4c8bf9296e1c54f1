use crate::config::mating::MatingConfig;
use crate::config::traits::ConfigSection;
use crate::engines::generation::genome::Genome;
use crate::engines::generation::operators::MateOperator;
use crate::error::Result;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Turns two selected parents into two offspring.
pub trait Mater: Send {
    fn mate(&self, a: &Genome, b: &Genome, rng: &mut dyn RngCore) -> (Genome, Genome);

    /// Called once per generation with the current elite.
    fn on_elite(&mut self, elite: Arc<Genome>);
}

/// Default mater: the offspring are the parents' bits, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMater;

impl Mater for NullMater {
    fn mate(&self, a: &Genome, b: &Genome, _rng: &mut dyn RngCore) -> (Genome, Genome) {
        (Genome::new(a.bits().clone()), Genome::new(b.bits().clone()))
    }

    fn on_elite(&mut self, _elite: Arc<Genome>) {}
}

/// One configured step of a [`MaterPipeline`].
pub struct MaterEntry {
    /// Chance in `[0, 1]` that the step runs for a given pair.
    pub probability: f32,
    pub operator: Box<dyn MateOperator>,
    /// Pair the first genome with the current elite instead of the second genome.
    pub use_elite: bool,
}

impl MaterEntry {
    pub fn new(probability: f32, operator: impl MateOperator + 'static) -> Self {
        Self {
            probability,
            operator: Box::new(operator),
            use_elite: false,
        }
    }

    pub fn with_elite(mut self) -> Self {
        self.use_elite = true;
        self
    }
}

/// Ordered list of operators, each applied with its own probability.
///
/// Every step that fires takes the previous step's two outputs as its
/// inputs, so a crossover followed by several mutation steps stacks
/// naturally. The pipeline starts from genomes that share the parents' bits;
/// the operators themselves allocate the children's storage.
pub struct MaterPipeline {
    entries: Vec<MaterEntry>,
    elite: Option<Arc<Genome>>,
}

impl MaterPipeline {
    pub fn new(entries: Vec<MaterEntry>) -> Self {
        Self {
            entries,
            elite: None,
        }
    }

    pub fn from_config(config: &MatingConfig) -> Result<Self> {
        config.validate()?;

        let entries = config
            .operators
            .iter()
            .map(|step| MaterEntry {
                probability: step.probability,
                operator: Box::new(step.operator),
                use_elite: step.use_elite,
            })
            .collect();
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[MaterEntry] {
        &self.entries
    }

    pub fn elite(&self) -> Option<&Arc<Genome>> {
        self.elite.as_ref()
    }
}

impl Mater for MaterPipeline {
    fn mate(&self, a: &Genome, b: &Genome, rng: &mut dyn RngCore) -> (Genome, Genome) {
        let mut first = Genome::new(a.bits().clone());
        let mut second = Genome::new(b.bits().clone());

        for entry in &self.entries {
            if rng.gen::<f32>() >= entry.probability {
                continue;
            }
            log::trace!("applying {} (p={})", entry.operator.name(), entry.probability);

            let partner = match (&self.elite, entry.use_elite) {
                (Some(elite), true) => elite.as_ref(),
                (None, true) => {
                    log::warn!("{} wants the elite before one exists", entry.operator.name());
                    &second
                }
                (_, false) => &second,
            };
            let (next_first, next_second) = entry.operator.mate(&first, partner, rng);
            first = next_first;
            second = next_second;
        }

        (first, second)
    }

    fn on_elite(&mut self, elite: Arc<Genome>) {
        self.elite = Some(elite);
    }
}
