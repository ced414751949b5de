use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a node name to be offered as a
/// suggestion when a lookup misses.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Intersection or city in the road network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: String,
    pub has_fuel_station: bool,
}

/// Directed road owned by its source node's adjacency list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub to: String,
    /// Base distance in km.
    pub distance: f64,
    /// Congestion multiplier applied to the distance, `0.0..=1.0` by convention.
    pub traffic_penalty: f64,
    pub toll_cost: f64,
}

impl Edge {
    /// Scalar cost of traversing this edge.
    ///
    /// `distance + distance * traffic_penalty + toll_cost`. The toll is both
    /// part of this ranking cost and tracked separately against the toll
    /// budget; it is never charged twice.
    pub fn cost(&self) -> f64 {
        self.distance + (self.distance * self.traffic_penalty) + self.toll_cost
    }
}

/// Weighted road network with fuel stations.
///
/// Nodes are referenced by name. Adjacency lists keep insertion order, which
/// the router relies on for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    nodes: HashMap<String, Node>,
    adjacency: HashMap<String, Vec<Edge>>,
    max_fuel_capacity: f64,
}

impl RoadNetwork {
    /// Create an empty network whose fuel stations refill to `max_fuel_capacity`.
    pub fn new(max_fuel_capacity: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            adjacency: HashMap::new(),
            max_fuel_capacity,
        }
    }

    /// Tank capacity every refuel fills up to.
    pub fn max_fuel_capacity(&self) -> f64 {
        self.max_fuel_capacity
    }

    /// Add a node. Adding an existing name is a no-op; the first flag wins.
    pub fn add_node(&mut self, name: impl Into<String>, has_fuel_station: bool) {
        let name = name.into();
        self.nodes.entry(name.clone()).or_insert(Node {
            name,
            has_fuel_station,
        });
    }

    /// Add a road from `from` to `to`, creating missing endpoints without a
    /// fuel station. When `bidirectional` is set an independent reverse edge
    /// with the same weights is added as well.
    ///
    /// Weights are not validated here; see [`RoadNetwork::validate`].
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        distance: f64,
        traffic_penalty: f64,
        toll_cost: f64,
        bidirectional: bool,
    ) {
        self.add_node(from, false);
        self.add_node(to, false);

        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push(Edge {
                to: to.to_string(),
                distance,
                traffic_penalty,
                toll_cost,
            });

        if bidirectional {
            self.adjacency
                .entry(to.to_string())
                .or_default()
                .push(Edge {
                    to: from.to_string(),
                    distance,
                    traffic_penalty,
                    toll_cost,
                });
        }
    }

    /// Bidirectional road with no congestion and no toll.
    pub fn add_road(&mut self, from: &str, to: &str, distance: f64) {
        self.add_edge(from, to, distance, 0.0, 0.0, true);
    }

    /// Outgoing edges of `node`; empty for unknown nodes.
    pub fn neighbors(&self, node: &str) -> &[Edge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `node` has a fuel station; `false` for unknown nodes.
    pub fn has_fuel_station(&self, node: &str) -> bool {
        self.nodes
            .get(node)
            .map(|node| node.has_fuel_station)
            .unwrap_or(false)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Iterate over all nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (a bidirectional road counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Node names similar to `name`, best match first.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Check that every edge has a finite, non-negative cost contribution.
    ///
    /// The router assumes non-negative edge costs for optimality but never
    /// calls this itself; callers loading untrusted data should.
    pub fn validate(&self) -> Result<()> {
        let mut sources: Vec<&String> = self.adjacency.keys().collect();
        sources.sort();

        for from in sources {
            for edge in self.neighbors(from) {
                let problem = if !edge.distance.is_finite() || edge.distance < 0.0 {
                    Some(format!(
                        "distance must be finite and non-negative, got {}",
                        edge.distance
                    ))
                } else if !edge.toll_cost.is_finite() || edge.toll_cost < 0.0 {
                    Some(format!(
                        "toll cost must be finite and non-negative, got {}",
                        edge.toll_cost
                    ))
                } else if !edge.traffic_penalty.is_finite() || edge.traffic_penalty < -1.0 {
                    Some(format!(
                        "traffic penalty {} makes the edge cost negative",
                        edge.traffic_penalty
                    ))
                } else {
                    None
                };

                if let Some(message) = problem {
                    return Err(Error::InvalidEdge {
                        from: from.clone(),
                        to: edge.to.clone(),
                        message,
                    });
                }
            }
        }

        Ok(())
    }
}
