//! Search labels and the priority frontier.
//!
//! A [`Label`] is frozen once pushed: relaxing an edge produces a new label
//! rather than updating an existing one, and stale labels are discarded when
//! popped by the router's settle check.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::Edge;

use super::{RouteLeg, RoutePlan};

/// One leg of a partial route, borrowing from the network.
#[derive(Debug, Clone, Copy)]
struct LegRecord<'a> {
    from: &'a str,
    edge: &'a Edge,
    fuel_used: f64,
    fuel_remaining: f64,
    refueled: bool,
}

/// Search state attached to one frontier entry.
#[derive(Debug, Clone)]
pub(crate) struct Label<'a> {
    pub cost: f64,
    pub node: &'a str,
    pub path: Vec<&'a str>,
    pub distance: f64,
    pub toll: f64,
    pub fuel: f64,
    pub fuel_stops: Vec<&'a str>,
    legs: Vec<LegRecord<'a>>,
}

impl<'a> Label<'a> {
    /// Initial label: at `start` with a full tank.
    pub fn start(node: &'a str, fuel: f64) -> Self {
        Self {
            cost: 0.0,
            node,
            path: vec![node],
            distance: 0.0,
            toll: 0.0,
            fuel,
            fuel_stops: Vec::new(),
            legs: Vec::new(),
        }
    }

    /// Label reached by driving `edge` from this label's node, arriving with
    /// `fuel` in the tank.
    pub fn extend(&self, edge: &'a Edge, fuel_used: f64, fuel: f64, refueled: bool) -> Self {
        let mut path = self.path.clone();
        path.push(edge.to.as_str());

        let mut fuel_stops = self.fuel_stops.clone();
        if refueled {
            fuel_stops.push(self.node);
        }

        let mut legs = self.legs.clone();
        legs.push(LegRecord {
            from: self.node,
            edge,
            fuel_used,
            fuel_remaining: fuel,
            refueled,
        });

        Self {
            cost: self.cost + edge.cost(),
            node: edge.to.as_str(),
            path,
            distance: self.distance + edge.distance,
            toll: self.toll + edge.toll_cost,
            fuel,
            fuel_stops,
            legs,
        }
    }

    /// Convert the goal label into the owned plan handed back to callers.
    pub fn into_plan(self) -> RoutePlan {
        RoutePlan {
            steps: self.path.into_iter().map(str::to_string).collect(),
            total_cost: self.cost,
            distance: self.distance,
            toll: self.toll,
            fuel_stops: self.fuel_stops.into_iter().map(str::to_string).collect(),
            fuel_remaining: self.fuel,
            legs: self
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    from: leg.from.to_string(),
                    to: leg.edge.to.clone(),
                    distance: leg.edge.distance,
                    cost: leg.edge.cost(),
                    toll: leg.edge.toll_cost,
                    fuel_used: leg.fuel_used,
                    fuel_remaining: leg.fuel_remaining,
                    refueled: leg.refueled,
                })
                .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug)]
struct FrontierEntry<'a> {
    cost: FloatOrd,
    seq: u64,
    label: Label<'a>,
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, with
        // earlier pushes winning ties.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of labels keyed by cost, FIFO among equal costs.
#[derive(Debug, Default)]
pub(crate) struct Frontier<'a> {
    heap: BinaryHeap<FrontierEntry<'a>>,
    next_seq: u64,
}

impl<'a> Frontier<'a> {
    pub fn push(&mut self, label: Label<'a>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            cost: FloatOrd(label.cost),
            seq,
            label,
        });
    }

    pub fn pop(&mut self) -> Option<Label<'a>> {
        self.heap.pop().map(|entry| entry.label)
    }
}
