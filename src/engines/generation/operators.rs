use crate::data::Bitset;
use crate::engines::generation::genome::Genome;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// A mating step: takes two genomes and produces two new ones.
///
/// Implementations must not modify their inputs.
pub trait MateOperator: Send + Sync {
    fn name(&self) -> &str;

    fn mate(&self, a: &Genome, b: &Genome, rng: &mut dyn RngCore) -> (Genome, Genome);
}

/// The built-in operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneticOperator {
    OnePointCrossover,
    TwoPointCrossover,
    UniformCrossover,
    Mutate,
}

impl MateOperator for GeneticOperator {
    fn name(&self) -> &str {
        match self {
            Self::OnePointCrossover => "one_point_crossover",
            Self::TwoPointCrossover => "two_point_crossover",
            Self::UniformCrossover => "uniform_crossover",
            Self::Mutate => "mutate",
        }
    }

    fn mate(&self, a: &Genome, b: &Genome, rng: &mut dyn RngCore) -> (Genome, Genome) {
        match self {
            Self::OnePointCrossover => one_point_crossover(a, b, rng),
            Self::TwoPointCrossover => two_point_crossover(a, b, rng),
            Self::UniformCrossover => uniform_crossover(a, b, rng),
            Self::Mutate => mutate(a, b, rng),
        }
    }
}

/// One-point crossover: `000000` x `111111` -> `000111`, `111000`
///
/// The split point is drawn from `1..common_len`. Parents shorter than two
/// bits cannot be split and are copied.
pub fn one_point_crossover<R: Rng + ?Sized>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    let common = common_len(a, b);
    if common < 2 {
        return recombine(a.bits(), b.bits(), |_| false);
    }

    let point = rng.gen_range(1..common);
    recombine(a.bits(), b.bits(), |i| i >= point)
}

/// Two-point crossover: `000000` x `111111` -> `001100`, `110011`
///
/// Both points are drawn from `1..common_len` and are always distinct, so the
/// common length must be at least three; at two it falls back to one point.
pub fn two_point_crossover<R: Rng + ?Sized>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    let common = common_len(a, b);
    if common < 3 {
        return one_point_crossover(a, b, rng);
    }

    let first = rng.gen_range(1..common);
    let mut second = first;
    while second == first {
        second = rng.gen_range(1..common);
    }
    let (start, end) = (first.min(second), first.max(second));
    recombine(a.bits(), b.bits(), |i| (start..end).contains(&i))
}

/// Uniform crossover: a fair coin per position decides which child gets
/// parent `a`'s bit there.
pub fn uniform_crossover<R: Rng + ?Sized>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    recombine(a.bits(), b.bits(), |_| rng.gen_bool(0.5))
}

/// Flip one random bit of a copy of `a`. `b` is passed through with its bits
/// shared, not copied.
pub fn mutate<R: Rng + ?Sized>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    let bits = a.bits().copy();
    if !bits.is_empty() {
        let index = rng.gen_range(0..bits.size());
        bits.put(index, !bits.bit(index));
    }
    (Genome::new(bits), Genome::new(b.bits().clone()))
}

fn common_len(a: &Genome, b: &Genome) -> usize {
    a.bits().size().min(b.bits().size())
}

/// Build two fresh children over the common length of `a` and `b`.
///
/// At every position where `swap` returns true the first child takes `b`'s
/// bit and the second takes `a`'s; elsewhere each keeps its own parent's bit.
/// Bits past the common length come from the longer parent and always go to
/// the second child, so the first child has the common length and the second
/// the longer one.
fn recombine<F>(a: &Bitset, b: &Bitset, mut swap: F) -> (Genome, Genome)
where
    F: FnMut(usize) -> bool,
{
    let common = a.size().min(b.size());
    let longer = if a.size() >= b.size() { a } else { b };

    let first = Bitset::new(common);
    let second = Bitset::new(longer.size());

    for i in 0..common {
        let (x, y) = (a.bit(i), b.bit(i));
        if swap(i) {
            first.put(i, y);
            second.put(i, x);
        } else {
            first.put(i, x);
            second.put(i, y);
        }
    }
    for i in common..longer.size() {
        second.put(i, longer.bit(i));
    }

    (Genome::new(first), Genome::new(second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn zeros_and_ones(len: usize) -> (Genome, Genome) {
        let a = Bitset::new(len);
        let b = Bitset::new(len);
        b.set_all(true);
        (Genome::new(a), Genome::new(b))
    }

    fn transitions(bits: &Bitset) -> usize {
        let v = bits.to_vec();
        v.windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn test_one_point_crossover_single_transition() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let (a, b) = zeros_and_ones(10);
            let (c1, c2) = one_point_crossover(&a, &b, &mut rng);

            for i in 0..10 {
                assert_ne!(c1.bits().get(i).unwrap(), c2.bits().get(i).unwrap(), "index {}", i);
            }
            assert_eq!(transitions(c1.bits()), 1);
            assert_ne!(c1.bits(), a.bits());
            assert_ne!(c1.bits(), b.bits());
        }
    }

    #[test]
    fn test_two_point_crossover_two_transitions() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let (a, b) = zeros_and_ones(10);
            let (c1, c2) = two_point_crossover(&a, &b, &mut rng);

            assert_eq!(transitions(c1.bits()), 2);
            assert_eq!(transitions(c2.bits()), 2);
            // outer segments come from the child's own parent
            assert!(!c1.bits().get(0).unwrap());
            assert!(!c1.bits().get(9).unwrap());
            assert!(c2.bits().get(0).unwrap());
        }
    }

    #[test]
    fn test_two_point_crossover_on_two_bits_uses_one_point() {
        let mut rng = StdRng::seed_from_u64(3);
        let (a, b) = zeros_and_ones(2);
        let (c1, c2) = two_point_crossover(&a, &b, &mut rng);
        assert_eq!(c1.bits().to_vec(), vec![false, true]);
        assert_eq!(c2.bits().to_vec(), vec![true, false]);
    }

    #[test]
    fn test_crossover_of_tiny_parents_copies() {
        let mut rng = StdRng::seed_from_u64(4);
        let (a, b) = zeros_and_ones(1);
        let (c1, c2) = one_point_crossover(&a, &b, &mut rng);
        assert_eq!(c1.bits(), a.bits());
        assert_eq!(c2.bits(), b.bits());
        assert!(!c1.bits().shares_storage(a.bits()));

        let empty = Genome::new(Bitset::new(0));
        let (c1, c2) = two_point_crossover(&empty, &empty, &mut rng);
        assert!(c1.bits().is_empty());
        assert!(c2.bits().is_empty());
    }

    #[test]
    fn test_uniform_crossover_complementary_children() {
        let mut rng = StdRng::seed_from_u64(5);
        let len = 1000;
        let trials = 50;
        let mut total_transitions = 0;

        for _ in 0..trials {
            let (a, b) = zeros_and_ones(len);
            let (c1, c2) = uniform_crossover(&a, &b, &mut rng);
            for i in 0..len {
                assert_ne!(c1.bits().get(i).unwrap(), c2.bits().get(i).unwrap());
            }
            total_transitions += transitions(c1.bits());
        }

        let mean = total_transitions as f64 / trials as f64;
        assert!((450.0..550.0).contains(&mean), "mean transitions {}", mean);
    }

    #[test]
    fn test_mismatched_lengths_tail_goes_to_second_child() {
        let mut rng = StdRng::seed_from_u64(6);
        let short = Genome::new(Bitset::new(4));
        let long = Genome::new(Bitset::from_bits(&[true; 7]));

        for (x, y) in [(&short, &long), (&long, &short)] {
            for op in [
                GeneticOperator::OnePointCrossover,
                GeneticOperator::TwoPointCrossover,
                GeneticOperator::UniformCrossover,
            ] {
                let (c1, c2) = op.mate(x, y, &mut rng);
                assert_eq!(c1.bits().size(), 4, "{}", op.name());
                assert_eq!(c2.bits().size(), 7, "{}", op.name());
                for i in 4..7 {
                    assert!(c2.bits().get(i).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_crossover_leaves_parents_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let (a, b) = zeros_and_ones(16);
        let (c1, c2) = uniform_crossover(&a, &b, &mut rng);
        c1.bits().set_all(true);
        c2.bits().set_all(false);
        assert_eq!(a.bits().count_ones(), 0);
        assert_eq!(b.bits().count_ones(), 16);
    }

    #[test]
    fn test_mutate_flips_exactly_one_bit_of_first() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let (a, b) = zeros_and_ones(10);
            let (c1, c2) = mutate(&a, &b, &mut rng);

            assert_eq!(c1.bits().count_ones(), 1);
            assert_eq!(a.bits().count_ones(), 0);
            assert_eq!(c2.bits(), b.bits());
            assert!(c2.bits().shares_storage(b.bits()));
        }
    }

    #[test]
    fn test_mutate_empty_genome() {
        let mut rng = StdRng::seed_from_u64(9);
        let empty = Genome::new(Bitset::new(0));
        let (c1, _) = mutate(&empty, &empty, &mut rng);
        assert!(c1.bits().is_empty());
    }

    #[test]
    fn test_operator_names_match_config_names() {
        for op in [
            GeneticOperator::OnePointCrossover,
            GeneticOperator::TwoPointCrossover,
            GeneticOperator::UniformCrossover,
            GeneticOperator::Mutate,
        ] {
            let encoded = toml::Value::try_from(op).unwrap();
            assert_eq!(encoded.as_str(), Some(op.name()));
        }
    }
}
