use super::genome::Genome;
use crate::types::Fitness;
use std::sync::mpsc::Sender;

/// Receives the elite of every generation, for reporting or rendering.
pub trait EliteConsumer: Send {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_elite(&mut self, elite: &Genome);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullEliteConsumer;

impl EliteConsumer for NullEliteConsumer {
    fn on_elite(&mut self, _elite: &Genome) {}
}

type Renderer = Box<dyn Fn(&Genome) -> String + Send>;

/// Prints the elite to stdout every `report_every` generations.
pub struct ConsoleEliteConsumer {
    report_every: usize,
    generation: usize,
    renderer: Option<Renderer>,
}

impl ConsoleEliteConsumer {
    pub fn new(report_every: usize) -> Self {
        Self {
            report_every: report_every.max(1),
            generation: 0,
            renderer: None,
        }
    }

    /// Print `render(elite)` next to the fitness instead of the raw bits.
    pub fn with_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&Genome) -> String + Send + 'static,
    {
        self.renderer = Some(Box::new(render));
        self
    }
}

impl EliteConsumer for ConsoleEliteConsumer {
    fn on_generation_start(&mut self, generation: usize) {
        self.generation = generation;
    }

    fn on_elite(&mut self, elite: &Genome) {
        if self.generation % self.report_every != 0 && self.generation != 1 {
            return;
        }
        let shown = match &self.renderer {
            Some(render) => render(elite),
            None => format!("{:?}", elite.bits()),
        };
        println!("{}\t{}\t{}", self.generation, shown, elite.fitness());
    }
}

/// Snapshot of one generation's elite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliteReport {
    pub generation: usize,
    pub fitness: Fitness,
    pub bits: Vec<bool>,
}

/// Sends an [`EliteReport`] per generation, for a consumer on another thread.
pub struct ChannelEliteConsumer {
    sender: Sender<EliteReport>,
    generation: usize,
}

impl ChannelEliteConsumer {
    pub fn new(sender: Sender<EliteReport>) -> Self {
        Self {
            sender,
            generation: 0,
        }
    }
}

impl EliteConsumer for ChannelEliteConsumer {
    fn on_generation_start(&mut self, generation: usize) {
        self.generation = generation;
    }

    fn on_elite(&mut self, elite: &Genome) {
        let _ = self.sender.send(EliteReport {
            generation: self.generation,
            fitness: elite.fitness(),
            bits: elite.bits().to_vec(),
        });
    }
}
