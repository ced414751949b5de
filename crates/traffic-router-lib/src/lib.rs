//! Traffic router library entry points.
//!
//! This crate models a road network with congestion, tolls and fuel
//! stations, and finds the cheapest route between two intersections that a
//! vehicle with a finite tank can actually drive within a toll budget.
//! Rendering and command-line handling belong to the callers; they should
//! only depend on the items exported here.
//!

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod fuel;
pub mod graph;
pub mod routing;

pub use config::RouterConfig;
pub use error::{Error, Result};
pub use fuel::{FuelProjection, LegFuel};
pub use graph::{Edge, Node, RoadNetwork};
pub use routing::{RouteFailure, RouteLeg, RoutePlan, RouteRequest, RouteResult, TrafficRouter};
