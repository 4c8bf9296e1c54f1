use crate::config::evolution::EvolutionConfig;
use crate::config::manager::AppConfig;
use crate::config::traits::ConfigSection;
use crate::data::{GenomeFactory, NullGenomeFactory};
use crate::engines::evaluation::{NullSimulator, Simulator};
use crate::engines::generation::{
    genome::Genome,
    mater::{Mater, MaterPipeline, NullMater},
    progress::{EliteConsumer, NullEliteConsumer},
    selector::{NullSelector, Selector, SelectorPipeline},
};
use crate::error::{BitgenesError, Result};
use crate::types::Fitness;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Generational genetic algorithm over bitstring genomes.
///
/// Every collaborator defaults to a null implementation, so an engine is
/// always runnable; swap them in with the `with_*` builders. Call
/// [`GeneticAlgorithm::init`] to create the population and the worker pool,
/// then [`GeneticAlgorithm::simulate`] or
/// [`GeneticAlgorithm::simulate_until`] to run generations until the exit
/// predicate accepts an elite.
pub struct GeneticAlgorithm {
    simulator: Box<dyn Simulator>,
    elite_consumer: Box<dyn EliteConsumer>,
    mater: Box<dyn Mater>,
    selector: Box<dyn Selector>,
    genome_factory: Box<dyn GenomeFactory>,

    population_size: usize,
    population: Vec<Arc<Genome>>,
    total_fitness: Fitness,
    generation: usize,
    generation_delay: Duration,
    pool: Option<Arc<ThreadPool>>,
    rng: StdRng,
}

impl Default for GeneticAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneticAlgorithm {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), Duration::from_micros(1))
    }

    /// Engine seeded and paced from `config`. The population still has to be
    /// created with [`GeneticAlgorithm::init_from_config`] or `init`.
    pub fn from_config(config: &EvolutionConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(
            rng,
            Duration::from_micros(config.generation_delay_micros),
        ))
    }

    /// Engine with mating and selection pipelines built from `config`.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::from_config(&config.evolution)?
            .with_mater(MaterPipeline::from_config(&config.mating)?)
            .with_selector(SelectorPipeline::from_config(&config.selection)?))
    }

    fn with_rng(rng: StdRng, generation_delay: Duration) -> Self {
        Self {
            simulator: Box::new(NullSimulator),
            elite_consumer: Box::new(NullEliteConsumer),
            mater: Box::new(NullMater),
            selector: Box::new(NullSelector),
            genome_factory: Box::new(NullGenomeFactory),
            population_size: 0,
            population: Vec::new(),
            total_fitness: 0,
            generation: 0,
            generation_delay,
            pool: None,
            rng,
        }
    }

    pub fn with_simulator(mut self, simulator: impl Simulator + 'static) -> Self {
        self.simulator = Box::new(simulator);
        self
    }

    pub fn with_elite_consumer(mut self, consumer: impl EliteConsumer + 'static) -> Self {
        self.elite_consumer = Box::new(consumer);
        self
    }

    pub fn with_mater(mut self, mater: impl Mater + 'static) -> Self {
        self.mater = Box::new(mater);
        self
    }

    pub fn with_selector(mut self, selector: impl Selector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_genome_factory(mut self, factory: impl GenomeFactory + 'static) -> Self {
        self.genome_factory = Box::new(factory);
        self
    }

    /// Create `population_size` genomes from the factory and a pool of
    /// `parallelism` evaluation workers.
    pub fn init(&mut self, population_size: usize, parallelism: usize) -> Result<()> {
        if parallelism == 0 {
            return Err(BitgenesError::Configuration(
                "Parallelism must be at least 1".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .thread_name(|i| format!("bitgenes-eval-{}", i))
            .build()
            .map_err(|e| BitgenesError::Evaluation(format!("Failed to build worker pool: {}", e)))?;

        self.population_size = population_size;
        self.population = (0..population_size)
            .map(|_| Arc::new(Genome::new(self.genome_factory.create())))
            .collect();
        self.total_fitness = 0;
        self.generation = 0;
        self.pool = Some(Arc::new(pool));

        log::debug!(
            "initialised population of {} with {} evaluation workers",
            population_size,
            parallelism
        );
        Ok(())
    }

    pub fn init_from_config(&mut self, config: &EvolutionConfig) -> Result<()> {
        config.validate()?;
        self.init(config.population_size, config.parallelism)
    }

    /// Run until the simulator's own exit predicate accepts an elite.
    ///
    /// Returns `Ok(false)` without running anything when the population is
    /// empty, `Ok(true)` once the predicate is satisfied.
    pub fn simulate(&mut self) -> Result<bool> {
        self.run(None)
    }

    /// Run until `exit` accepts an elite. The simulator's exit predicate is
    /// not consulted.
    pub fn simulate_until<F>(&mut self, mut exit: F) -> Result<bool>
    where
        F: FnMut(&Genome) -> bool,
    {
        self.run(Some(&mut exit))
    }

    pub fn population(&self) -> &[Arc<Genome>] {
        &self.population
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Fitness sum of the last evaluated generation.
    pub fn total_fitness(&self) -> Fitness {
        self.total_fitness
    }

    /// Number of generations evaluated since `init`.
    pub fn generation(&self) -> usize {
        self.generation
    }

    fn run(&mut self, mut exit: Option<&mut dyn FnMut(&Genome) -> bool>) -> Result<bool> {
        if self.population_size == 0 {
            log::warn!("simulate called with an empty population");
            return Ok(false);
        }
        let pool = self.pool.clone().ok_or(BitgenesError::NotInitialized)?;

        self.begin_generation();
        let simulator: &dyn Simulator = &*self.simulator;
        pool.in_place_scope(|scope| {
            for genome in &self.population {
                spawn_evaluation(scope, simulator, Arc::clone(genome));
            }
        });

        loop {
            self.end_generation()?;

            let elite = self.elite().ok_or(BitgenesError::EmptyPopulation)?;
            self.mater.on_elite(Arc::clone(&elite));
            self.elite_consumer.on_elite(&elite);

            let done = match exit.as_mut() {
                Some(exit) => exit(elite.as_ref()),
                None => self.simulator.exit_predicate(&elite),
            };
            if done {
                log::debug!(
                    "exit predicate satisfied after {} generations, elite fitness {}",
                    self.generation,
                    elite.fitness()
                );
                return Ok(true);
            }

            thread::sleep(self.generation_delay);

            // parents are drawn from the generation that was just scored
            let parents_fitness = self.total_fitness;
            self.begin_generation();
            self.population = self.breed(&pool, parents_fitness)?;
        }
    }

    fn begin_generation(&mut self) {
        self.generation += 1;
        self.total_fitness = 0;
        self.simulator.on_begin_generation();
        self.elite_consumer.on_generation_start(self.generation);
    }

    /// Runs after every genome of the generation has been evaluated.
    fn end_generation(&mut self) -> Result<()> {
        self.simulator.on_end_generation();
        self.total_fitness = self
            .population
            .iter()
            .try_fold(0 as Fitness, |sum, genome| sum.checked_add(genome.fitness()))
            .ok_or_else(|| {
                BitgenesError::Evaluation(format!(
                    "total fitness of generation {} overflows",
                    self.generation
                ))
            })?;
        log::debug!(
            "generation {} evaluated, total fitness {}",
            self.generation,
            self.total_fitness
        );
        Ok(())
    }

    /// Highest fitness in the population; the earliest genome wins ties.
    fn elite(&self) -> Option<Arc<Genome>> {
        let mut best: Option<&Arc<Genome>> = None;
        for genome in &self.population {
            if best.map_or(true, |b| genome.fitness() > b.fitness()) {
                best = Some(genome);
            }
        }
        best.cloned()
    }

    /// Build the next population pair by pair from the current one, handing
    /// each child to the worker pool as soon as it exists. Returns once every
    /// child has been evaluated.
    ///
    /// `parents_fitness` is the fitness sum of the current population.
    fn breed(
        &mut self,
        pool: &ThreadPool,
        parents_fitness: Fitness,
    ) -> Result<Vec<Arc<Genome>>> {
        let Self {
            simulator,
            mater,
            selector,
            population,
            population_size,
            rng,
            ..
        } = self;
        let simulator: &dyn Simulator = &**simulator;
        let population: &[Arc<Genome>] = population;
        let size = *population_size;
        let mut next = Vec::with_capacity(size);

        pool.in_place_scope(|scope| -> Result<()> {
            for i in (0..size).step_by(2) {
                let a = selector.select(population, parents_fitness, rng)?;
                let b = selector.select(population, parents_fitness, rng)?;
                let (first, second) = mater.mate(&a, &b, rng);

                let mut children = vec![first];
                // odd population: the last pair only fills one slot
                if i + 1 < size {
                    children.push(second);
                }
                for child in children {
                    let child = Arc::new(child);
                    next.push(Arc::clone(&child));
                    spawn_evaluation(scope, simulator, child);
                }
            }
            Ok(())
        })?;

        Ok(next)
    }
}

fn spawn_evaluation<'scope>(
    scope: &Scope<'scope>,
    simulator: &'scope dyn Simulator,
    genome: Arc<Genome>,
) {
    scope.spawn(move |_| simulator.evaluate(&genome));
}
