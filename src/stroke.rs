use egui::Pos2;
use std::collections::VecDeque;

/// One timestamped position observation within a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in canvas space
    pub position: Pos2,
    /// Capture time in seconds
    pub time: f64,
}

impl Sample {
    pub fn new(position: Pos2, time: f64) -> Self {
        Self { position, time }
    }
}

/// Bounded FIFO over the most recent samples of the in-progress stroke.
///
/// Capacity is fixed at construction. Once full, appending evicts the oldest
/// sample. The window is cleared at every stroke start, so classifiers never
/// see samples belonging to a previous stroke.
#[derive(Debug, Clone)]
pub struct StrokeWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl StrokeWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Empty the window. Called on stroke start.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Add the newest sample, evicting the oldest once at capacity
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in capture order, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Snapshot of the sample positions in capture order.
    /// Classifiers operate on this copy, never on the live buffer.
    pub fn positions(&self) -> Vec<Pos2> {
        self.samples.iter().map(|sample| sample.position).collect()
    }

    /// The most recently appended sample, if any
    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }
}
