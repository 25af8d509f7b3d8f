//! Time-ordered activation queue for the asynchronous spreaders

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::gs_interface::{NodeId, SpreadTime};

/// "This node wakes up and pushes once at `time`"
#[derive(Debug, Clone, Copy)]
pub struct ActivationEvent {
    pub time: SpreadTime,
    pub node: NodeId,

    /// Insertion counter; equal times pop FIFO
    pub sequence: u64,
}

impl PartialEq for ActivationEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ActivationEvent {}

impl PartialOrd for ActivationEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ActivationEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // times are finite, so total_cmp agrees with the numeric order
        match self.time.total_cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }
        self.sequence.cmp(&other.sequence)
    }
}

/// Min-queue of pending activations
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BinaryHeap<Reverse<ActivationEvent>>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, time: SpreadTime, node: NodeId) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(Reverse(ActivationEvent {
            time,
            node,
            sequence,
        }));
    }

    /// Earliest pending event
    pub fn pop(&mut self) -> Option<ActivationEvent> {
        self.events.pop().map(|Reverse(event)| event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
