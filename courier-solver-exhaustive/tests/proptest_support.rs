//! Proptest strategies for optimiser property-based tests.
//!
//! Generated networks have between one and four centers, each stocking one
//! item, and a complete distance table. Orders mix positive, zero and
//! negative quantities plus an item missing from the catalog.
//!
//! [`naive_price`] re-prices a route with a plain loop over its stops so the
//! optimiser's minimum can be checked without going through `RoutePricer`.

use std::sync::Arc;

use courier_core::{CostModel, Manifest, Order, Route, Topology};
use proptest::prelude::*;

/// Maximum number of centers in a generated network.
pub const MAX_CENTERS: usize = 4;

/// A generated network together with an order against it.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// The generated network.
    pub topology: Arc<Topology>,
    /// An order over the network's catalog.
    pub order: Order,
}

/// Strategy for a network and an order with at least one candidate center.
pub fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (1..=MAX_CENTERS).prop_flat_map(|centers| {
        let pair_count: usize = (0..centers).sum();
        (
            proptest::collection::vec(0.1_f64..20.0, centers),
            proptest::collection::vec(0.5_f64..10.0, centers),
            proptest::collection::vec(0.5_f64..10.0, pair_count),
            proptest::collection::vec(quantity_strategy(), centers),
            any::<bool>(),
        )
            .prop_filter_map(
                "generated network must be valid",
                |(weights, to_destination, between, quantities, include_unknown)| {
                    let topology = build_topology(&weights, &to_destination, &between)?;
                    let mut order: Order = quantities
                        .iter()
                        .enumerate()
                        .map(|(index, quantity)| (format!("I{index}"), *quantity))
                        .collect();
                    if include_unknown {
                        order.insert("missing", 2.0);
                    }
                    Some(Scenario {
                        topology: Arc::new(topology),
                        order,
                    })
                },
            )
    })
}

fn quantity_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => 0.25_f64..5.0,
        1 => Just(0.0),
        1 => -3.0_f64..-0.1,
    ]
}

fn build_topology(weights: &[f64], to_destination: &[f64], between: &[f64]) -> Option<Topology> {
    let mut builder = Topology::builder("L");
    for (index, (weight, distance)) in weights.iter().zip(to_destination).enumerate() {
        let center = format!("C{index}");
        builder = builder
            .item(format!("I{index}"), center.as_str(), *weight)
            .distance(center.as_str(), "L", *distance);
    }
    let pairs = (0..weights.len()).flat_map(|lhs| ((lhs + 1)..weights.len()).map(move |rhs| (lhs, rhs)));
    for ((lhs, rhs), distance) in pairs.zip(between) {
        builder = builder.distance(format!("C{lhs}"), format!("C{rhs}"), *distance);
    }
    builder.build().ok()
}

/// Price `route` by walking its stops directly.
///
/// The vehicle leaves the first stop with that stop's cargo, pays each hop at
/// its current load, empties at the destination and loads at every center.
/// Only the total is rounded.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "prices are fractional until the final rounding"
)]
pub fn naive_price(
    route: &Route,
    manifest: &Manifest,
    topology: &Topology,
    model: &CostModel,
) -> u64 {
    let stops = route.stops();
    let mut load = stops.first().map_or(0.0, |start| manifest.cargo_at(start));
    let mut total = 0.0;
    for pair in stops.windows(2) {
        let [from, to] = pair else { continue };
        total += model.cost(load, topology.distance(from, to));
        if to.is_destination() {
            load = 0.0;
        } else {
            load += manifest.cargo_at(to);
        }
    }
    total.round() as u64
}
