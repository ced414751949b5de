#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use traffic_router_lib::{RoadNetwork, RoutePlan};

const TOLERANCE: f64 = 1e-9;

static TRACING: Once = Once::new();

/// Route library traces into the test harness; set `RUST_LOG=trace` to see
/// every settled node and rejected road.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Five-node network with two competing routes from A to D.
///
/// A-B-C-D carries congestion and tolls; A-E-D is a free detour.
pub fn corridor_network(include_detour: bool) -> RoadNetwork {
    let mut network = RoadNetwork::new(12.0);
    network.add_node("A", true);
    network.add_node("B", false);
    network.add_node("C", true);
    network.add_node("D", true);
    network.add_node("E", false);

    network.add_edge("A", "B", 5.0, 0.3, 0.0, true);
    network.add_edge("B", "C", 10.0, 0.2, 1.0, true);
    network.add_edge("C", "D", 7.0, 0.1, 3.0, true);
    network.add_edge("A", "E", 4.0, 0.5, 0.0, true);
    if include_detour {
        network.add_edge("E", "D", 15.0, 0.0, 0.0, true);
    }
    network
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Check every invariant a returned plan must satisfy on `network`.
pub fn assert_plan_is_drivable(
    network: &RoadNetwork,
    fuel_consumption_rate: f64,
    plan: &RoutePlan,
    max_toll: Option<f64>,
) {
    let capacity = network.max_fuel_capacity();
    assert_eq!(plan.legs.len(), plan.hop_count());

    let mut total_cost = 0.0;
    let mut distance = 0.0;
    let mut toll = 0.0;
    for (index, leg) in plan.legs.iter().enumerate() {
        assert_eq!(leg.from, plan.steps[index]);
        assert_eq!(leg.to, plan.steps[index + 1]);
        assert!(
            network
                .neighbors(&leg.from)
                .iter()
                .any(|edge| edge.to == leg.to && edge.distance == leg.distance),
            "leg {} -> {} is not a road",
            leg.from,
            leg.to
        );
        assert_close(leg.fuel_used, leg.distance * fuel_consumption_rate);
        if leg.refueled {
            assert!(network.has_fuel_station(&leg.from));
        }
        total_cost += leg.cost;
        distance += leg.distance;
        toll += leg.toll;
    }

    assert_close(plan.total_cost, total_cost);
    assert_close(plan.distance, distance);
    assert_close(plan.toll, toll);
    if let Some(limit) = max_toll {
        assert!(plan.toll <= limit, "toll {} over budget {limit}", plan.toll);
    }

    let refuel_points: Vec<&String> = plan
        .legs
        .iter()
        .filter(|leg| leg.refueled)
        .map(|leg| &leg.from)
        .collect();
    assert_eq!(plan.fuel_stops.iter().collect::<Vec<_>>(), refuel_points);
    for stop in &plan.fuel_stops {
        assert!(network.has_fuel_station(stop), "{stop} has no fuel station");
    }

    for projection in plan.fuel_projection() {
        assert!(
            projection.since_refuel <= capacity + TOLERANCE,
            "burned {} since last refuel with a {capacity} tank",
            projection.since_refuel
        );
        assert!(projection.remaining >= -TOLERANCE);
    }
}

/// Deterministic pseudo-random source for generated networks.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(2_862_933_555_777_941_757).wrapping_add(3_037_000_493))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    /// Uniform integer in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Random network of `nodes` intersections named `N0..`.
pub fn random_network(rng: &mut Lcg, nodes: usize, capacity: f64) -> RoadNetwork {
    let mut network = RoadNetwork::new(capacity);
    for index in 0..nodes {
        network.add_node(format!("N{index}"), rng.below(3) == 0);
    }

    for from in 0..nodes {
        for to in (from + 1)..nodes {
            if rng.below(100) >= 45 {
                continue;
            }
            let distance = f64::from(1 + rng.below(20));
            let traffic_penalty = f64::from(rng.below(11)) / 10.0;
            let toll_cost = f64::from(rng.below(4));
            let bidirectional = rng.below(4) != 0;
            network.add_edge(
                &format!("N{from}"),
                &format!("N{to}"),
                distance,
                traffic_penalty,
                toll_cost,
                bidirectional,
            );
        }
    }
    network
}

/// Cheapest simple-path cost by exhaustive enumeration, ignoring fuel and tolls.
pub fn brute_force_min_cost(network: &RoadNetwork, start: &str, goal: &str) -> Option<f64> {
    fn walk<'a>(
        network: &'a RoadNetwork,
        node: &'a str,
        goal: &str,
        cost: f64,
        visited: &mut Vec<&'a str>,
        best: &mut Option<f64>,
    ) {
        if node == goal {
            if best.map_or(true, |current| cost < current) {
                *best = Some(cost);
            }
            return;
        }
        for edge in network.neighbors(node) {
            let next = edge.to.as_str();
            if visited.contains(&next) {
                continue;
            }
            visited.push(next);
            walk(network, next, goal, cost + edge.cost(), visited, best);
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![start];
    walk(network, start, goal, 0.0, &mut visited, &mut best);
    best
}
