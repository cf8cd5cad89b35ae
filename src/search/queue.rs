use grid_util::point::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::FrontierEntry;

/// Heap slot ordering entries by lowest priority first, then by insertion
/// order, so the first inserted of several equally good entries wins.
#[derive(Clone, Debug)]
struct SmallestPriorityHolder {
    entry: FrontierEntry,
    sequence: usize,
}

impl Eq for SmallestPriorityHolder {}

impl PartialEq for SmallestPriorityHolder {
    fn eq(&self, other: &Self) -> bool {
        self.entry.priority == other.entry.priority && self.sequence == other.sequence
    }
}

impl PartialOrd for SmallestPriorityHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestPriorityHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both keys are compared in reverse
        match other.entry.priority.cmp(&self.entry.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Min-heap of frontier entries keyed by `(priority, insertion sequence)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct PriorityQueue {
    heap: BinaryHeap<SmallestPriorityHolder>,
    next_sequence: usize,
}

impl PriorityQueue {
    pub(crate) fn push(&mut self, entry: FrontierEntry) {
        self.heap.push(SmallestPriorityHolder {
            entry,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|holder| holder.entry)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn nodes(&self) -> Vec<Point> {
        self.heap.iter().map(|holder| holder.entry.node).collect()
    }
}
