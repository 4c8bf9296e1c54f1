use anyhow::Context;
use bitgenes::config::ConfigManager;
use bitgenes::{
    ConsoleEliteConsumer, FieldDecoder, Fitness, GeneticAlgorithm, Genome, RandomGenomeFactory,
    Simulator,
};
use std::env;
use std::time::Instant;

const BITS_PER_CHAR: usize = 8;

/// Scores a genome by how many bits of the target string it already matches.
struct StringMatchSimulator {
    target: Vec<u8>,
}

impl StringMatchSimulator {
    fn matching_bits(&self, genome: &Genome) -> bitgenes::Result<usize> {
        let bits = genome.bits();
        let mut matching = 0;
        for (i, &expected) in self.target.iter().enumerate() {
            let evolved = bits.slice(i * BITS_PER_CHAR, BITS_PER_CHAR)?.to_u64()?;
            matching += BITS_PER_CHAR - (evolved ^ u64::from(expected)).count_ones() as usize;
        }
        Ok(matching)
    }
}

impl Simulator for StringMatchSimulator {
    fn evaluate(&self, genome: &Genome) {
        match self.matching_bits(genome) {
            Ok(matching) => genome.set_fitness(matching as Fitness),
            Err(e) => {
                log::error!("cannot score genome: {}", e);
                genome.set_fitness(0);
            }
        }
    }

    fn exit_predicate(&self, elite: &Genome) -> bool {
        elite.fitness() == (self.target.len() * BITS_PER_CHAR) as Fitness
    }
}

fn render(decoder: &FieldDecoder, genome: &Genome) -> String {
    match decoder.decode(genome.bits()) {
        Ok(fields) => {
            let bytes: Vec<u8> = fields.into_iter().map(|c| c as u8).collect();
            String::from_utf8_lossy(&bytes).into_owned()
        }
        Err(e) => format!("<{}>", e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // bitgenes [TARGET] [CONFIG.toml]
    let args: Vec<String> = env::args().collect();
    let target = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "abcdefghijklmnopqrstuvwxyz".to_string());
    let config_path = args.get(2);

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path)
        .context("failed to load configuration")?;
    let config = manager.get();

    println!("Target: {:?}", target);
    println!("Population size: {}", config.evolution.population_size);
    println!("Parallelism: {}", config.evolution.parallelism);
    println!();

    let decoder = FieldDecoder::with_format(&vec![BITS_PER_CHAR; target.len()])?;
    let mut engine = GeneticAlgorithm::from_app_config(&config)?
        .with_simulator(StringMatchSimulator {
            target: target.clone().into_bytes(),
        })
        .with_genome_factory(RandomGenomeFactory::new(
            target.len() * BITS_PER_CHAR,
            config.evolution.seed,
        ))
        .with_elite_consumer(
            ConsoleEliteConsumer::new(1).with_renderer(move |genome| render(&decoder, genome)),
        );
    engine.init_from_config(&config.evolution)?;

    let start = Instant::now();
    if engine.simulate()? {
        println!(
            "Matched {:?} after {} generations in {:.2?}",
            target,
            engine.generation(),
            start.elapsed()
        );
    } else {
        println!("Population is empty, nothing to evolve");
    }
    Ok(())
}
