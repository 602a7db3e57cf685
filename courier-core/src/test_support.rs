//! Fixtures shared by unit tests, behaviour tests and benchmarks.

use std::sync::Arc;

use crate::{Order, Route, Topology, TopologyError};

/// The reference topology behind an `Arc`, ready to hand to an optimiser.
#[must_use]
pub fn reference_topology() -> Arc<Topology> {
    Arc::new(Topology::reference())
}

/// Build an order from `(item, quantity)` pairs.
///
/// # Examples
/// ```rust
/// use courier_core::test_support::order;
///
/// let order = order(&[("A", 1.0), ("D", 1.0)]);
/// assert_eq!(order.len(), 2);
/// ```
#[must_use]
pub fn order(lines: &[(&str, f64)]) -> Order {
    lines.iter().map(|(item, quantity)| (*item, *quantity)).collect()
}

/// Build a route by resolving identifiers against `topology`.
///
/// Returns `None` if any identifier is neither a center nor the destination.
#[must_use]
pub fn route_of(topology: &Topology, ids: &[&str]) -> Option<Route> {
    ids.iter()
        .map(|id| topology.resolve(id))
        .collect::<Option<Vec<_>>>()
        .map(Route::new)
}

/// A generated network with `centers` centers named `S0`, `S1`, … that
/// deliver to `D`.
///
/// Each center stocks two items, `S{n}-light` (`1.5` per unit) and
/// `S{n}-heavy` (`6` per unit). Every center is `1 + 0.5n` from the
/// destination and `1 + 0.75|i-j|` from its peers, so the table is complete.
///
/// # Errors
/// Propagates [`TopologyError`] from the builder; the generated data is valid
/// for every `centers` value.
#[expect(
    clippy::float_arithmetic,
    reason = "synthetic distances are derived from center indices"
)]
pub fn synthetic_topology(centers: u32) -> Result<Topology, TopologyError> {
    let mut builder = Topology::builder("D");
    for index in 0..centers {
        let center = format!("S{index}");
        builder = builder
            .item(format!("{center}-light"), center.as_str(), 1.5)
            .item(format!("{center}-heavy"), center.as_str(), 6.0)
            .distance(center.as_str(), "D", 1.0 + 0.5 * f64::from(index));
        for peer in 0..index {
            let gap = f64::from(index - peer);
            builder = builder.distance(format!("S{peer}"), center.as_str(), 1.0 + 0.75 * gap);
        }
    }
    builder.build()
}
