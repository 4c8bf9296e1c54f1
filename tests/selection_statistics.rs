use bitgenes::engines::generation::selector::roulette;
use bitgenes::{
    BitgenesError, Bitset, Fitness, Genome, Roulette, Selector, SelectorEntry, SelectorPipeline,
    Tournament,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

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

fn index_of(pop: &[Arc<Genome>], picked: &Arc<Genome>) -> usize {
    pop.iter()
        .position(|g| Arc::ptr_eq(g, picked))
        .expect("picked genome is a population member")
}

#[test]
fn test_roulette_zero_total_is_uniform() {
    let mut rng = StdRng::seed_from_u64(42);
    let pop = population(&[3; 10]);
    let draws = 100_000;
    let mut counts = [0usize; 10];

    for _ in 0..draws {
        let picked = roulette(&pop, 0, &mut rng).unwrap();
        counts[index_of(&pop, &picked)] += 1;
    }

    for (i, &count) in counts.iter().enumerate() {
        assert!(
            (9_000..11_000).contains(&count),
            "genome {} picked {} times: {:?}",
            i,
            count,
            counts
        );
    }
}

#[test]
fn test_roulette_is_fitness_proportionate() {
    let mut rng = StdRng::seed_from_u64(7);
    let pop = population(&[100, 200, 300, 400]);
    let draws = 100_000;
    let mut counts = [0usize; 4];

    for _ in 0..draws {
        let picked = roulette(&pop, 1_000, &mut rng).unwrap();
        counts[index_of(&pop, &picked)] += 1;
    }

    for (i, &count) in counts.iter().enumerate() {
        let share = count as f64 / draws as f64;
        let expected = (i + 1) as f64 / 10.0;
        assert!(
            (share - expected).abs() < 0.02,
            "genome {} share {:.3}, expected {:.3}",
            i,
            share,
            expected
        );
    }
}

#[test]
fn test_roulette_with_understated_total_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(8);
    let pop = population(&[4, 4, 4, 4]);
    for _ in 0..10_000 {
        let picked = roulette(&pop, 9, &mut rng).unwrap();
        assert!(index_of(&pop, &picked) < 3);
    }
}

#[test]
fn test_roulette_with_overstated_total_fails() {
    let mut rng = StdRng::seed_from_u64(9);
    let pop = population(&[1, 1]);
    let mut overflowed = false;
    for _ in 0..100 {
        if let Err(BitgenesError::FitnessOverflow { total_fitness }) = roulette(&pop, 50, &mut rng) {
            assert_eq!(total_fitness, 50);
            overflowed = true;
        }
    }
    assert!(overflowed);
}

#[test]
fn test_pipeline_splits_between_strategies() {
    let mut rng = StdRng::seed_from_u64(10);
    // tournament of size 10 over this population almost always returns the last genome,
    // roulette with total 0 is uniform
    let pipeline = SelectorPipeline::new(vec![
        SelectorEntry::new(0.5, Tournament { size: 10 }),
        SelectorEntry::new(1.0, Roulette),
    ])
    .unwrap();
    let pop = population(&[0, 0, 0, 1]);

    let draws = 20_000;
    let last = (0..draws)
        .filter(|_| {
            let picked = pipeline.select(&pop, 0, &mut rng).unwrap();
            index_of(&pop, &picked) == 3
        })
        .count();

    // 0.5 * P(tournament hits the best) + 0.5 * 0.25
    let share = last as f64 / draws as f64;
    assert!((0.55..0.65).contains(&share), "last genome share {:.3}", share);
}
