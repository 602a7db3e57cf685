//! Customer orders and the per-center cargo they imply.
//!
//! An [`Order`] keeps its lines in the order they were written. Aggregating
//! it against a [`Topology`] yields a [`Manifest`]: how much weight waits at
//! each center and which centers must be visited at all.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CenterId, ItemId, Location, Topology};

/// Requested quantities keyed by item, in document order.
///
/// Writing the same item twice keeps its first position and the last
/// quantity, like a JSON object.
///
/// # Examples
/// ```
/// use courier_core::Order;
///
/// let order: Order = serde_json::from_str(r#"{ "D": 1, "A": 2 }"#).expect("valid order");
/// let items: Vec<&str> = order.lines().map(|(item, _)| item.as_str()).collect();
/// assert_eq!(items, vec!["D", "A"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    lines: Vec<(ItemId, f64)>,
}

impl Order {
    /// Create an empty order.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Return the order with `quantity` of `item` added.
    #[must_use]
    pub fn with_line(mut self, item: impl Into<ItemId>, quantity: f64) -> Self {
        self.insert(item, quantity);
        self
    }

    /// Set the quantity for `item`, keeping its original position if present.
    pub fn insert(&mut self, item: impl Into<ItemId>, quantity: f64) {
        let id = item.into();
        match self.lines.iter_mut().find(|(existing, _)| *existing == id) {
            Some(line) => line.1 = quantity,
            None => self.lines.push((id, quantity)),
        }
    }

    /// Iterate over the order lines.
    pub fn lines(&self) -> impl Iterator<Item = (&ItemId, f64)> + '_ {
        self.lines.iter().map(|(item, quantity)| (item, *quantity))
    }

    /// Number of distinct items mentioned.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the order mentions no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<I: Into<ItemId>> FromIterator<(I, f64)> for Order {
    fn from_iter<T: IntoIterator<Item = (I, f64)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |order, (item, quantity)| order.with_line(item, quantity))
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lines.len()))?;
        for (item, quantity) in &self.lines {
            map.serialize_entry(item, quantity)?;
        }
        map.end()
    }
}

struct OrderVisitor;

impl<'de> Visitor<'de> for OrderVisitor {
    type Value = Order;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping item identifiers to numeric quantities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut order = Order::new();
        while let Some((item, quantity)) = access.next_entry::<ItemId, f64>()? {
            order.insert(item, quantity);
        }
        Ok(order)
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderVisitor)
    }
}

/// Cargo waiting at each center for one order.
///
/// # Examples
/// ```
/// use courier_core::{CenterId, Manifest, Order, Topology};
///
/// let topology = Topology::reference();
/// let order = Order::new().with_line("A", 1.0).with_line("D", 1.0);
/// let manifest = Manifest::aggregate(&order, &topology);
///
/// assert_eq!(manifest.cargo(&CenterId::from("C1")), 3.0);
/// assert_eq!(manifest.cargo(&CenterId::from("C2")), 12.0);
/// assert_eq!(manifest.required_centers().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    cargo: HashMap<CenterId, f64>,
    required: Vec<CenterId>,
}

impl Manifest {
    /// Sum the order into per-center weights.
    ///
    /// Lines with a non-positive or non-finite quantity and items missing
    /// from the catalog are skipped. Required centers are listed in the order
    /// their first contributing line appears.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "cargo weights are fractional quantities times unit weights"
    )]
    pub fn aggregate(order: &Order, topology: &Topology) -> Self {
        let mut manifest = Self::default();
        for (item, quantity) in order.lines() {
            if !quantity.is_finite() || quantity <= 0.0 {
                log::debug!("skipping {item}: quantity {quantity} is not positive");
                continue;
            }
            let Some(spec) = topology.item(item) else {
                log::debug!("skipping {item}: not in the catalog");
                continue;
            };
            *manifest.cargo.entry(spec.center.clone()).or_insert(0.0) +=
                spec.unit_weight * quantity;
            if !manifest.required.contains(&spec.center) {
                manifest.required.push(spec.center.clone());
            }
        }
        manifest
    }

    /// Weight waiting at `center`, `0` when nothing was ordered from it.
    #[must_use]
    pub fn cargo(&self, center: &CenterId) -> f64 {
        self.cargo.get(center).copied().unwrap_or(0.0)
    }

    /// Weight picked up on arrival at `location`; the destination has none.
    #[must_use]
    pub fn cargo_at(&self, location: &Location) -> f64 {
        location.center().map_or(0.0, |center| self.cargo(center))
    }

    /// Centers that must be visited, in order of first appearance.
    #[must_use]
    pub const fn required_centers(&self) -> &[CenterId] {
        self.required.as_slice()
    }

    /// Total weight over all centers.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.cargo.values().sum()
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare fractional weights and costs"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn topology() -> Topology {
        Topology::reference()
    }

    fn names(manifest: &Manifest) -> Vec<&str> {
        manifest
            .required_centers()
            .iter()
            .map(CenterId::as_str)
            .collect()
    }

    #[rstest]
    fn empty_order_requires_nothing(topology: Topology) {
        let manifest = Manifest::aggregate(&Order::new(), &topology);
        assert!(manifest.required_centers().is_empty());
        assert!(manifest.total_weight().abs() < f64::EPSILON);
    }

    #[rstest]
    fn weights_accumulate_per_center(topology: Topology) {
        let order = Order::new()
            .with_line("A", 2.0)
            .with_line("B", 1.0)
            .with_line("G", 3.0);
        let manifest = Manifest::aggregate(&order, &topology);
        assert!((manifest.cargo(&CenterId::from("C1")) - 8.0).abs() < f64::EPSILON);
        assert!((manifest.cargo(&CenterId::from("C3")) - 1.5).abs() < f64::EPSILON);
        assert!(manifest.cargo(&CenterId::from("C2")).abs() < f64::EPSILON);
        assert_eq!(names(&manifest), vec!["C1", "C3"]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.0)]
    #[case(f64::NAN)]
    fn non_positive_quantities_are_ignored(topology: Topology, #[case] quantity: f64) {
        let order = Order::new().with_line("A", quantity).with_line("D", 1.0);
        let manifest = Manifest::aggregate(&order, &topology);
        assert_eq!(names(&manifest), vec!["C2"]);
    }

    #[rstest]
    fn unknown_items_are_ignored(topology: Topology) {
        let order = Order::new().with_line("Z", 4.0).with_line("H", 1.0);
        let manifest = Manifest::aggregate(&order, &topology);
        assert_eq!(names(&manifest), vec!["C3"]);
    }

    #[rstest]
    fn required_centers_follow_document_order(topology: Topology) {
        let order: Order =
            serde_json::from_str(r#"{ "G": 1, "D": 1, "A": 1, "H": 2 }"#).expect("valid order");
        let manifest = Manifest::aggregate(&order, &topology);
        assert_eq!(names(&manifest), vec!["C3", "C2", "C1"]);
    }

    #[rstest]
    fn destination_carries_no_cargo(topology: Topology) {
        let order = Order::new().with_line("A", 1.0);
        let manifest = Manifest::aggregate(&order, &topology);
        assert!(manifest.cargo_at(&topology.destination()).abs() < f64::EPSILON);
    }

    #[rstest]
    fn repeated_keys_keep_position_and_last_value() {
        let order: Order =
            serde_json::from_str(r#"{ "A": 1, "D": 2, "A": 5 }"#).expect("valid order");
        let lines: Vec<(&str, f64)> = order.lines().map(|(i, q)| (i.as_str(), q)).collect();
        assert_eq!(lines, vec![("A", 5.0), ("D", 2.0)]);
    }

    #[rstest]
    #[case(r#"{ "A": "two" }"#)]
    #[case(r#"[ "A", 1 ]"#)]
    #[case(r#"{ "A": null }"#)]
    fn malformed_orders_fail_to_decode(#[case] json: &str) {
        let result: Result<Order, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[rstest]
    fn order_serialises_in_document_order() {
        let order = Order::new().with_line("F", 1.0).with_line("B", 0.5);
        let json = serde_json::to_string(&order).expect("serialise order");
        assert_eq!(json, r#"{"F":1.0,"B":0.5}"#);
    }
}
