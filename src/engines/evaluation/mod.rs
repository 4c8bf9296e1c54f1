pub mod simulator;

pub use simulator::{NullSimulator, Simulator};
