use crate::config::selection::SelectionConfig;
use crate::config::traits::ConfigSection;
use crate::engines::generation::genome::Genome;
use crate::error::{BitgenesError, Result};
use crate::types::Fitness;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Picks one mating parent from the evaluated population.
pub trait Selector: Send {
    fn select(
        &self,
        population: &[Arc<Genome>],
        total_fitness: Fitness,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<Genome>>;
}

/// Default selector: always the first genome.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSelector;

impl Selector for NullSelector {
    fn select(
        &self,
        population: &[Arc<Genome>],
        _total_fitness: Fitness,
        _rng: &mut dyn RngCore,
    ) -> Result<Arc<Genome>> {
        population.first().cloned().ok_or(BitgenesError::EmptyPopulation)
    }
}

/// A way of picking a genome, biased by fitness.
pub trait SelectionStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn select(
        &self,
        population: &[Arc<Genome>],
        total_fitness: Fitness,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<Genome>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    Roulette,
    Tournament,
}

/// Fitness-proportionate selection; see [`roulette`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Roulette;

impl SelectionStrategy for Roulette {
    fn name(&self) -> &str {
        "roulette"
    }

    fn select(
        &self,
        population: &[Arc<Genome>],
        total_fitness: Fitness,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<Genome>> {
        roulette(population, total_fitness, rng)
    }
}

/// Best of `size` uniform picks; see [`tournament`].
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    pub size: usize,
}

impl SelectionStrategy for Tournament {
    fn name(&self) -> &str {
        "tournament"
    }

    fn select(
        &self,
        population: &[Arc<Genome>],
        _total_fitness: Fitness,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<Genome>> {
        tournament(population, self.size, rng)
    }
}

/// Roulette wheel selection: probability proportional to fitness
///
/// `total_fitness` must be the population's fitness sum. When it is zero or
/// negative there is nothing to be proportional to and the pick is uniform.
/// Otherwise a point is drawn in `0..total_fitness` and fitness is subtracted
/// genome by genome until the point is used up. A total smaller than the real
/// sum still stops inside the population; a larger one runs off the end and
/// fails with [`BitgenesError::FitnessOverflow`].
pub fn roulette<R: Rng + ?Sized>(
    population: &[Arc<Genome>],
    total_fitness: Fitness,
    rng: &mut R,
) -> Result<Arc<Genome>> {
    if population.is_empty() {
        return Err(BitgenesError::EmptyPopulation);
    }

    if total_fitness <= 0 {
        let index = rng.gen_range(0..population.len());
        return Ok(Arc::clone(&population[index]));
    }

    let mut spin = rng.gen_range(0..total_fitness);
    for genome in population {
        spin = spin.saturating_sub(genome.fitness());
        if spin <= 0 {
            return Ok(Arc::clone(genome));
        }
    }

    Err(BitgenesError::FitnessOverflow { total_fitness })
}

/// Tournament selection: pick best of K random candidates
pub fn tournament<R: Rng + ?Sized>(
    population: &[Arc<Genome>],
    size: usize,
    rng: &mut R,
) -> Result<Arc<Genome>> {
    if population.is_empty() {
        return Err(BitgenesError::EmptyPopulation);
    }

    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..size {
        let candidate = &population[rng.gen_range(0..population.len())];
        if candidate.fitness() > best.fitness() {
            best = candidate;
        }
    }
    Ok(Arc::clone(best))
}

pub struct SelectorEntry {
    pub probability: f32,
    pub strategy: Box<dyn SelectionStrategy>,
}

impl SelectorEntry {
    pub fn new(probability: f32, strategy: impl SelectionStrategy + 'static) -> Self {
        Self {
            probability,
            strategy: Box::new(strategy),
        }
    }
}

/// Ordered list of strategies, each tried with its own probability.
///
/// Each call walks the list drawing a fresh number per entry and uses the
/// first strategy that fires. If none fires the walk starts over, which is
/// why construction rejects a list in which no entry can ever fire.
pub struct SelectorPipeline {
    entries: Vec<SelectorEntry>,
}

impl SelectorPipeline {
    pub fn new(entries: Vec<SelectorEntry>) -> Result<Self> {
        if !entries.iter().any(|entry| entry.probability > 0.0) {
            return Err(BitgenesError::Configuration(
                "Selector needs at least one strategy with a probability above 0".to_string(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn from_config(config: &SelectionConfig) -> Result<Self> {
        config.validate()?;

        let entries = config
            .strategies
            .iter()
            .map(|step| match step.method {
                SelectionMethod::Roulette => SelectorEntry::new(step.probability, Roulette),
                SelectionMethod::Tournament => SelectorEntry::new(
                    step.probability,
                    Tournament {
                        size: step.tournament_size,
                    },
                ),
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[SelectorEntry] {
        &self.entries
    }
}

impl Selector for SelectorPipeline {
    fn select(
        &self,
        population: &[Arc<Genome>],
        total_fitness: Fitness,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<Genome>> {
        loop {
            for entry in &self.entries {
                if rng.gen::<f32>() < entry.probability {
                    log::trace!("selecting with {}", entry.strategy.name());
                    return entry.strategy.select(population, total_fitness, rng);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Bitset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(fitness: &[Fitness]) -> Vec<Arc<Genome>> {
        fitness
            .iter()
            .map(|&f| {
                let genome = Genome::new(Bitset::new(0));
                genome.set_fitness(f);
                Arc::new(genome)
            })
            .collect()
    }

    #[test]
    fn test_roulette_empty_population() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(roulette(&[], 10, &mut rng), Err(BitgenesError::EmptyPopulation)));
        assert!(matches!(roulette(&[], 0, &mut rng), Err(BitgenesError::EmptyPopulation)));
    }

    #[test]
    fn test_roulette_never_picks_zero_fitness() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = population(&[5, 0, 5]);
        for _ in 0..1000 {
            let picked = roulette(&pop, 10, &mut rng).unwrap();
            assert!(!Arc::ptr_eq(&picked, &pop[1]));
        }
    }

    #[test]
    fn test_roulette_total_too_large() {
        let mut rng = StdRng::seed_from_u64(2);
        let pop = population(&[1, 1, 1]);
        let overflowed = (0..200)
            .map(|_| roulette(&pop, 1_000, &mut rng))
            .filter(|r| matches!(r, Err(BitgenesError::FitnessOverflow { total_fitness: 1_000 })))
            .count();
        assert!(overflowed > 0);
    }

    #[test]
    fn test_roulette_total_too_small_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let pop = population(&[10, 10, 10]);
        for _ in 0..1000 {
            let picked = roulette(&pop, 5, &mut rng).unwrap();
            assert!(Arc::ptr_eq(&picked, &pop[0]));
        }
    }

    #[test]
    fn test_roulette_extreme_fitness_does_not_overflow() {
        let mut rng = StdRng::seed_from_u64(4);
        let pop = population(&[Fitness::MIN, 1]);
        assert!(matches!(
            roulette(&pop, 1, &mut rng),
            Err(BitgenesError::FitnessOverflow { total_fitness: 1 })
        ));
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let mut rng = StdRng::seed_from_u64(4);
        let pop = population(&[1, 2, 3, 100]);
        let wins = (0..1000)
            .filter(|_| tournament(&pop, 4, &mut rng).unwrap().fitness() == 100)
            .count();
        // P(best seen in 4 picks) = 1 - (3/4)^4 ~ 0.68
        assert!(wins > 600, "best won {} times", wins);

        assert_eq!(tournament(&pop, 1, &mut rng).map(|g| g.bits().size()).ok(), Some(0));
        assert!(tournament(&[], 3, &mut rng).is_err());
    }

    #[test]
    fn test_pipeline_rejects_entries_that_never_fire() {
        assert!(SelectorPipeline::new(vec![]).is_err());
        assert!(SelectorPipeline::new(vec![SelectorEntry::new(0.0, Roulette)]).is_err());
        assert!(SelectorPipeline::new(vec![
            SelectorEntry::new(0.0, Roulette),
            SelectorEntry::new(0.1, Tournament { size: 2 }),
        ])
        .is_ok());
    }

    #[test]
    fn test_pipeline_retries_until_an_entry_fires() {
        let mut rng = StdRng::seed_from_u64(5);
        let pipeline = SelectorPipeline::new(vec![SelectorEntry::new(0.01, Roulette)]).unwrap();
        let pop = population(&[0, 0]);
        for _ in 0..100 {
            assert!(pipeline.select(&pop, 0, &mut rng).is_ok());
        }
    }

    #[test]
    fn test_null_selector() {
        let mut rng = StdRng::seed_from_u64(6);
        let pop = population(&[1, 2]);
        let picked = NullSelector.select(&pop, 3, &mut rng).unwrap();
        assert!(Arc::ptr_eq(&picked, &pop[0]));
        assert!(NullSelector.select(&[], 0, &mut rng).is_err());
    }

    #[test]
    fn test_from_config() {
        let pipeline = SelectorPipeline::from_config(&SelectionConfig::default()).unwrap();
        assert_eq!(pipeline.entries().len(), 1);
        assert_eq!(pipeline.entries()[0].strategy.name(), "roulette");
    }
}
