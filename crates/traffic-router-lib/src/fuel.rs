//! Fuel feasibility rules and per-leg fuel projection.
//!
//! [`plan_leg_fuel`] is the single place that decides whether a leg can be
//! driven with the fuel on board, refuelling at the departure node when it
//! has a station. The router uses it during search and
//! [`project_route_fuel`] replays a finished route for reporting.

use serde::Serialize;

use crate::routing::RouteLeg;

/// Result of checking one leg against the fuel on board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegFuel {
    /// Enough fuel without stopping; `remaining` is the level on arrival.
    Sufficient { remaining: f64 },
    /// The tank was filled at the departure node first.
    Refueled { remaining: f64 },
    /// The leg cannot be driven from this state.
    OutOfRange,
}

impl LegFuel {
    /// Fuel left on arrival, if the leg is feasible.
    pub fn remaining(self) -> Option<f64> {
        match self {
            LegFuel::Sufficient { remaining } | LegFuel::Refueled { remaining } => Some(remaining),
            LegFuel::OutOfRange => None,
        }
    }
}

/// Decide whether a leg needing `fuel_needed` units is drivable.
///
/// Refuelling only happens when the tank is short and the node being left
/// has a station, and always fills to `capacity`. A leg longer than a full
/// tank is out of range even at a station.
///
/// # Examples
/// ```
/// use traffic_router_lib::fuel::{plan_leg_fuel, LegFuel};
///
/// assert_eq!(
///     plan_leg_fuel(3.0, 5.0, 10.0, false),
///     LegFuel::Sufficient { remaining: 2.0 }
/// );
/// assert_eq!(
///     plan_leg_fuel(6.0, 4.0, 10.0, true),
///     LegFuel::Refueled { remaining: 4.0 }
/// );
/// assert_eq!(plan_leg_fuel(6.0, 4.0, 10.0, false), LegFuel::OutOfRange);
/// assert_eq!(plan_leg_fuel(12.0, 4.0, 10.0, true), LegFuel::OutOfRange);
/// ```
pub fn plan_leg_fuel(
    fuel_needed: f64,
    remaining_fuel: f64,
    capacity: f64,
    departure_has_station: bool,
) -> LegFuel {
    if remaining_fuel >= fuel_needed {
        return LegFuel::Sufficient {
            remaining: remaining_fuel - fuel_needed,
        };
    }

    if !departure_has_station || capacity < fuel_needed {
        return LegFuel::OutOfRange;
    }

    LegFuel::Refueled {
        remaining: capacity - fuel_needed,
    }
}

/// Fuel bookkeeping for a single leg of a finished route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelProjection {
    pub from: String,
    pub to: String,
    /// Fuel burned on this leg.
    pub fuel_used: f64,
    /// Total fuel burned since the start of the route.
    pub cumulative: f64,
    /// Fuel burned since the last refuel (or the start), including this leg.
    pub since_refuel: f64,
    /// Fuel in the tank on arrival.
    pub remaining: f64,
    /// Whether the tank was filled before departing on this leg.
    pub refueled: bool,
}

/// Replay the legs of a route and project fuel use per leg.
pub fn project_route_fuel(legs: &[RouteLeg]) -> Vec<FuelProjection> {
    let mut cumulative = 0.0;
    let mut since_refuel = 0.0;

    legs.iter()
        .map(|leg| {
            if leg.refueled {
                since_refuel = 0.0;
            }
            cumulative += leg.fuel_used;
            since_refuel += leg.fuel_used;

            FuelProjection {
                from: leg.from.clone(),
                to: leg.to.clone(),
                fuel_used: leg.fuel_used,
                cumulative,
                since_refuel,
                remaining: leg.fuel_remaining,
                refueled: leg.refueled,
            }
        })
        .collect()
}
