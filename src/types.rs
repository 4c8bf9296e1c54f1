/// Integer quality score assigned to a genome by a simulator.
///
/// Higher is better. The engine only ever compares and sums fitness values,
/// so negative scores are allowed but make roulette selection fall back to
/// uniform picks. A generation whose fitness sum does not fit in an `i64`
/// stops the run with an evaluation error.
pub type Fitness = i64;
