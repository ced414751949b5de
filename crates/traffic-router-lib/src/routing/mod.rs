//! Fuel- and toll-constrained route search.
//!
//! This module provides:
//! - [`TrafficRouter`] - Router bound to a [`RoadNetwork`] and a fuel consumption rate
//! - [`RouteRequest`] - Serializable query (start, goal, optional toll budget)
//! - [`RouteResult`] - Either a [`RoutePlan`] or a [`RouteFailure`]
//!
//! # Algorithm
//!
//! The search is Dijkstra over labels `(cost, distance, toll, fuel, fuel
//! stops, path)` ordered by cost alone. Fuel and toll only decide whether an
//! edge may be relaxed; they never change the order in which nodes settle.
//! A node is settled the first time it is popped, and any later label for it
//! is dropped before its edges are looked at. Equal costs pop in push order.
//!
//! # Example
//!
//! ```
//! use traffic_router_lib::{RoadNetwork, TrafficRouter};
//!
//! let mut network = RoadNetwork::new(20.0);
//! network.add_node("A", true);
//! network.add_edge("A", "B", 8.0, 0.1, 0.0, true);
//! network.add_edge("B", "C", 7.0, 0.1, 0.0, true);
//! network.add_edge("A", "C", 5.0, 0.0, 10.0, true);
//!
//! let router = TrafficRouter::new(&network, 1.0);
//! let result = router.find_optimal_route("A", "C", Some(5.0))?;
//! let plan = result.plan().expect("detour fits the toll budget");
//! assert_eq!(plan.steps, vec!["A", "B", "C"]);
//! # Ok::<(), traffic_router_lib::Error>(())
//! ```

mod search;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{toll_budget_error, RouterConfig};
use crate::error::{Error, Result};
use crate::fuel::{plan_leg_fuel, project_route_fuel, FuelProjection, LegFuel};
use crate::graph::RoadNetwork;

use self::search::{Frontier, Label};

/// Number of fuzzy suggestions attached to unknown-node errors.
const MAX_SUGGESTIONS: usize = 3;

/// Route query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    /// Maximum total toll. `None` defers to the router's configured budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_toll: Option<f64>,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            max_toll: None,
        }
    }

    pub fn with_max_toll(mut self, max_toll: f64) -> Self {
        self.max_toll = Some(max_toll);
        self
    }
}

/// One driven edge of a [`RoutePlan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub cost: f64,
    pub toll: f64,
    pub fuel_used: f64,
    /// Fuel in the tank on arrival at `to`.
    pub fuel_remaining: f64,
    /// Whether the tank was filled at `from` before this leg.
    pub refueled: bool,
}

/// Successful route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Node names from start to goal inclusive.
    pub steps: Vec<String>,
    pub total_cost: f64,
    pub distance: f64,
    /// Total toll paid; already included in `total_cost`.
    pub toll: f64,
    /// Nodes where the tank was filled, in travel order.
    pub fuel_stops: Vec<String>,
    /// Fuel left on arrival at the goal.
    pub fuel_remaining: f64,
    pub legs: Vec<RouteLeg>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Per-leg fuel projection for this route.
    pub fn fuel_projection(&self) -> Vec<FuelProjection> {
        project_route_fuel(&self.legs)
    }
}

/// Query that explored the reachable network without settling the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteFailure {
    pub start: String,
    pub goal: String,
    /// Edges skipped because the fuel range could not cover them.
    pub fuel_rejections: usize,
    /// Edges skipped because they would exceed the toll budget.
    pub toll_rejections: usize,
}

impl RouteFailure {
    /// Human-readable reason naming start and goal.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no valid route from {} to {}", self.start, self.goal)?;
        match (self.fuel_rejections, self.toll_rejections) {
            (0, 0) => Ok(()),
            (fuel, 0) => write!(f, " ({fuel} road(s) beyond fuel range)"),
            (0, toll) => write!(f, " ({toll} road(s) over the toll budget)"),
            (fuel, toll) => write!(
                f,
                " ({fuel} road(s) beyond fuel range, {toll} over the toll budget)"
            ),
        }
    }
}

/// Outcome of a route query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResult {
    Found(RoutePlan),
    Unreachable(RouteFailure),
}

impl RouteResult {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteResult::Found(_))
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteResult::Found(plan) => Some(plan),
            RouteResult::Unreachable(_) => None,
        }
    }

    pub fn into_plan(self) -> Option<RoutePlan> {
        match self {
            RouteResult::Found(plan) => Some(plan),
            RouteResult::Unreachable(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RouteFailure> {
        match self {
            RouteResult::Found(_) => None,
            RouteResult::Unreachable(failure) => Some(failure),
        }
    }
}

/// Router bound to a read-only road network.
///
/// The network is borrowed for the router's lifetime, so it cannot be
/// mutated while any router uses it. Several routers may share one network
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct TrafficRouter<'n> {
    network: &'n RoadNetwork,
    fuel_consumption_rate: f64,
    default_max_toll: Option<f64>,
}

impl<'n> TrafficRouter<'n> {
    /// Create a router burning `fuel_consumption_rate` units per km.
    ///
    /// The rate is trusted as given; use [`TrafficRouter::from_config`] for
    /// validated input.
    pub fn new(network: &'n RoadNetwork, fuel_consumption_rate: f64) -> Self {
        Self {
            network,
            fuel_consumption_rate,
            default_max_toll: None,
        }
    }

    /// Create a router from a validated [`RouterConfig`].
    pub fn from_config(network: &'n RoadNetwork, config: &RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            network,
            fuel_consumption_rate: config.fuel_consumption_rate,
            default_max_toll: config.max_toll,
        })
    }

    pub fn fuel_consumption_rate(&self) -> f64 {
        self.fuel_consumption_rate
    }

    /// Route between two nodes under the configured toll budget.
    pub fn route(&self, start: &str, goal: &str) -> Result<RouteResult> {
        self.find_optimal_route(start, goal, self.default_max_toll)
    }

    /// Route for a request; a request without a toll budget uses the
    /// configured one.
    pub fn plan(&self, request: &RouteRequest) -> Result<RouteResult> {
        let max_toll = request.max_toll.or(self.default_max_toll);
        self.find_optimal_route(&request.start, &request.goal, max_toll)
    }

    /// Find the lowest-cost route from `start` to `end` whose total toll
    /// stays within `max_toll` (`None` means unlimited) and that never runs
    /// the tank dry.
    ///
    /// Unknown node names and a NaN or negative `max_toll` are errors; a
    /// query with no feasible route returns [`RouteResult::Unreachable`].
    pub fn find_optimal_route(
        &self,
        start: &str,
        end: &str,
        max_toll: Option<f64>,
    ) -> Result<RouteResult> {
        let start = self.resolve_node(start)?;
        let goal = self.resolve_node(end)?;
        if let Some(message) = toll_budget_error(max_toll) {
            return Err(Error::InvalidRequest { message });
        }
        let max_toll = max_toll.unwrap_or(f64::INFINITY);
        let capacity = self.network.max_fuel_capacity();

        debug!(start, goal, max_toll, "searching for route");

        let mut settled: HashMap<&'n str, f64> = HashMap::new();
        let mut frontier = Frontier::default();
        let mut fuel_rejections = 0;
        let mut toll_rejections = 0;

        frontier.push(Label::start(start, capacity));

        while let Some(label) = frontier.pop() {
            // Stale labels for settled nodes must not be expanded.
            if settled.contains_key(label.node) {
                continue;
            }
            settled.insert(label.node, label.cost);
            trace!(
                node = label.node,
                cost = label.cost,
                fuel = label.fuel,
                "settled node"
            );

            if label.node == goal {
                debug!(
                    start,
                    goal,
                    cost = label.cost,
                    settled = settled.len(),
                    "route found"
                );
                return Ok(RouteResult::Found(label.into_plan()));
            }

            let departure_has_station = self.network.has_fuel_station(label.node);

            for edge in self.network.neighbors(label.node) {
                let next = edge.to.as_str();
                if settled.contains_key(next) {
                    continue;
                }

                let fuel_needed = edge.distance * self.fuel_consumption_rate;
                let (fuel, refueled) = match plan_leg_fuel(
                    fuel_needed,
                    label.fuel,
                    capacity,
                    departure_has_station,
                ) {
                    LegFuel::Sufficient { remaining } => (remaining, false),
                    LegFuel::Refueled { remaining } => (remaining, true),
                    LegFuel::OutOfRange => {
                        fuel_rejections += 1;
                        trace!(
                            from = label.node,
                            to = next,
                            fuel_needed,
                            fuel = label.fuel,
                            "skipping road beyond fuel range"
                        );
                        continue;
                    }
                };

                let new_toll = label.toll + edge.toll_cost;
                if new_toll > max_toll {
                    toll_rejections += 1;
                    trace!(
                        from = label.node,
                        to = next,
                        toll = new_toll,
                        max_toll,
                        "skipping road over toll budget"
                    );
                    continue;
                }

                frontier.push(label.extend(edge, fuel_needed, fuel, refueled));
            }
        }

        debug!(
            start,
            goal,
            settled = settled.len(),
            fuel_rejections,
            toll_rejections,
            "no route found"
        );

        Ok(RouteResult::Unreachable(RouteFailure {
            start: start.to_string(),
            goal: goal.to_string(),
            fuel_rejections,
            toll_rejections,
        }))
    }

    /// Resolve a name to the network's own copy so labels can borrow it.
    fn resolve_node(&self, name: &str) -> Result<&'n str> {
        self.network
            .node(name)
            .map(|node| node.name.as_str())
            .ok_or_else(|| Error::UnknownNode {
                name: name.to_string(),
                suggestions: self.network.suggest(name, MAX_SUGGESTIONS),
            })
    }
}
