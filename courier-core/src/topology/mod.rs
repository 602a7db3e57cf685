//! Static delivery network: the item catalog and the distance table.
//!
//! A [`Topology`] is built once, validated, and then shared read-only between
//! any number of concurrent optimisations. Lookups never fail: unknown items
//! resolve to `None` and pairs missing from the distance table resolve to a
//! distance of `0`.

mod error;
mod spec;

use std::collections::HashMap;

use crate::{CenterId, DestinationId, ItemId, Location};

pub use error::TopologyError;
pub use spec::{DistanceEntry, ItemEntry, TopologySpec};

const REFERENCE_DESTINATION: &str = "L1";

const REFERENCE_ITEMS: [(&str, &str, f64); 9] = [
    ("A", "C1", 3.0),
    ("B", "C1", 2.0),
    ("C", "C1", 8.0),
    ("D", "C2", 12.0),
    ("E", "C2", 25.0),
    ("F", "C2", 15.0),
    ("G", "C3", 0.5),
    ("H", "C3", 1.0),
    ("I", "C3", 2.0),
];

const REFERENCE_DISTANCES: [(&str, &str, f64); 6] = [
    ("C1", "L1", 3.0),
    ("C2", "L1", 2.5),
    ("C3", "L1", 2.0),
    ("C1", "C2", 4.0),
    ("C1", "C3", 5.0),
    ("C2", "C3", 3.0),
];

/// Catalog entry for a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    /// Center that stocks the item.
    pub center: CenterId,
    /// Weight of one unit of the item.
    pub unit_weight: f64,
}

/// Distances between pairs of locations.
///
/// Entries are stored as given. Lookups try the requested ordering first and
/// then the reverse one, so a single entry serves both directions.
///
/// # Examples
/// ```
/// use courier_core::{CenterId, DestinationId, DistanceTable, Location};
///
/// let c1 = Location::Center(CenterId::from("C1"));
/// let l1 = Location::Destination(DestinationId::from("L1"));
/// let mut table = DistanceTable::default();
/// table.insert(c1.clone(), l1.clone(), 3.0);
///
/// assert_eq!(table.get(&l1, &c1), Some(3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    rows: HashMap<Location, HashMap<Location, f64>>,
}

impl DistanceTable {
    /// Record the distance from `from` to `to`, returning any value it replaced.
    pub fn insert(&mut self, from: Location, to: Location, distance: f64) -> Option<f64> {
        self.rows.entry(from).or_default().insert(to, distance)
    }

    /// Look up a pair in either ordering.
    #[must_use]
    pub fn get(&self, from: &Location, to: &Location) -> Option<f64> {
        self.directed(from, to).or_else(|| self.directed(to, from))
    }

    fn directed(&self, from: &Location, to: &Location) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over stored entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&Location, &Location, f64)> + '_ {
        self.rows
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(to, distance)| (from, to, *distance)))
    }
}

/// Item catalog and distance table for one delivery network.
///
/// # Examples
/// ```
/// use courier_core::{ItemId, Topology};
///
/// let topology = Topology::reference();
/// let c1 = topology.resolve("C1").expect("reference center");
/// let l1 = topology.destination();
///
/// assert_eq!(topology.distance(&c1, &l1), 3.0);
/// assert_eq!(topology.distance(&l1, &c1), 3.0);
/// assert_eq!(topology.unit_weight(&ItemId::from("G")), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    destination: DestinationId,
    centers: Vec<CenterId>,
    items: HashMap<ItemId, ItemSpec>,
    distances: DistanceTable,
}

impl Topology {
    /// Start building a topology that delivers to `destination`.
    #[must_use]
    pub fn builder(destination: impl Into<DestinationId>) -> TopologyBuilder {
        TopologyBuilder {
            destination: destination.into(),
            items: Vec::new(),
            distances: Vec::new(),
        }
    }

    /// The built-in network: items `A`-`I` spread over centers `C1`-`C3`,
    /// delivering to `L1`.
    #[must_use]
    pub fn reference() -> Self {
        let destination = DestinationId::from(REFERENCE_DESTINATION);
        let mut topology = Self::empty(destination.clone());
        for (item, center, weight) in REFERENCE_ITEMS {
            topology.insert_item(ItemId::from(item), CenterId::from(center), weight);
        }
        let location = |name: &str| {
            if name == REFERENCE_DESTINATION {
                Location::Destination(destination.clone())
            } else {
                Location::Center(CenterId::from(name))
            }
        };
        for (from, to, distance) in REFERENCE_DISTANCES {
            topology
                .distances
                .insert(location(from), location(to), distance);
        }
        topology
    }

    fn empty(destination: DestinationId) -> Self {
        Self {
            destination,
            centers: Vec::new(),
            items: HashMap::new(),
            distances: DistanceTable::default(),
        }
    }

    fn insert_item(&mut self, item: ItemId, center: CenterId, unit_weight: f64) {
        if !self.centers.contains(&center) {
            self.centers.push(center.clone());
        }
        self.items.insert(
            item,
            ItemSpec {
                center,
                unit_weight,
            },
        );
    }

    /// The destination as a route stop.
    #[must_use]
    pub fn destination(&self) -> Location {
        Location::Destination(self.destination.clone())
    }

    /// Identifier of the destination.
    #[must_use]
    pub const fn destination_id(&self) -> &DestinationId {
        &self.destination
    }

    /// Centers in the order they were first declared.
    #[must_use]
    pub const fn centers(&self) -> &[CenterId] {
        self.centers.as_slice()
    }

    /// Catalog entry for `item`.
    #[must_use]
    pub fn item(&self, item: &ItemId) -> Option<&ItemSpec> {
        self.items.get(item)
    }

    /// Iterate over the catalog in no particular order.
    pub fn items(&self) -> impl Iterator<Item = (&ItemId, &ItemSpec)> + '_ {
        self.items.iter()
    }

    /// Center that stocks `item`.
    #[must_use]
    pub fn center_of(&self, item: &ItemId) -> Option<&CenterId> {
        self.item(item).map(|spec| &spec.center)
    }

    /// Weight of one unit of `item`.
    #[must_use]
    pub fn unit_weight(&self, item: &ItemId) -> Option<f64> {
        self.item(item).map(|spec| spec.unit_weight)
    }

    /// Resolve an identifier to the destination or one of the centers.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Location> {
        if name == self.destination.as_str() {
            return Some(self.destination());
        }
        self.centers
            .iter()
            .find(|center| center.as_str() == name)
            .cloned()
            .map(Location::Center)
    }

    /// Distance between two stops.
    ///
    /// A stop is `0` away from itself. Pairs missing from the table are
    /// treated as `0` as well.
    #[must_use]
    pub fn distance(&self, from: &Location, to: &Location) -> f64 {
        if from == to {
            return 0.0;
        }
        self.distances.get(from, to).unwrap_or_else(|| {
            log::warn!("no distance recorded between {from} and {to}; treating the leg as free");
            0.0
        })
    }

    /// The underlying distance table.
    #[must_use]
    pub const fn distance_table(&self) -> &DistanceTable {
        &self.distances
    }
}

/// Validating builder for [`Topology`].
///
/// # Examples
/// ```
/// use courier_core::Topology;
///
/// # fn main() -> Result<(), courier_core::TopologyError> {
/// let topology = Topology::builder("depot")
///     .item("bolt", "north", 0.25)
///     .distance("north", "depot", 7.5)
///     .build()?;
/// assert_eq!(topology.centers().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    destination: DestinationId,
    items: Vec<(ItemId, CenterId, f64)>,
    distances: Vec<(String, String, f64)>,
}

impl TopologyBuilder {
    /// Declare an item stocked at `center`.
    #[must_use]
    pub fn item(
        mut self,
        item: impl Into<ItemId>,
        center: impl Into<CenterId>,
        unit_weight: f64,
    ) -> Self {
        self.items.push((item.into(), center.into(), unit_weight));
        self
    }

    /// Declare the distance between two locations named by identifier.
    #[must_use]
    pub fn distance(mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        self.distances.push((from.into(), to.into(), distance));
        self
    }

    /// Validate the declarations and assemble the topology.
    ///
    /// # Errors
    /// Returns [`TopologyError`] describing the first invalid declaration.
    pub fn build(self) -> Result<Topology, TopologyError> {
        let Self {
            destination,
            items,
            distances,
        } = self;
        if destination.as_str().trim().is_empty() {
            return Err(TopologyError::EmptyDestination);
        }

        let mut topology = Topology::empty(destination);
        for (item, center, unit_weight) in items {
            validate_item(&topology, &item, &center, unit_weight)?;
            topology.insert_item(item, center, unit_weight);
        }

        for (from_name, to_name, distance) in distances {
            if !distance.is_finite() || distance < 0.0 {
                return Err(TopologyError::InvalidDistance {
                    from: from_name,
                    to: to_name,
                    distance,
                });
            }
            let from = topology
                .resolve(&from_name)
                .ok_or_else(|| TopologyError::UnknownLocation(from_name.clone()))?;
            let to = topology
                .resolve(&to_name)
                .ok_or_else(|| TopologyError::UnknownLocation(to_name.clone()))?;
            if from == to {
                if distance > 0.0 {
                    return Err(TopologyError::NonZeroSelfDistance {
                        location: from_name,
                        distance,
                    });
                }
                continue;
            }
            match topology.distances.get(&from, &to) {
                Some(first) if differs(first, distance) => {
                    return Err(TopologyError::ConflictingDistance {
                        from: from_name,
                        to: to_name,
                        first,
                        second: distance,
                    });
                }
                Some(_) => {}
                None => {
                    topology.distances.insert(from, to, distance);
                }
            }
        }
        Ok(topology)
    }
}

fn validate_item(
    topology: &Topology,
    item: &ItemId,
    center: &CenterId,
    unit_weight: f64,
) -> Result<(), TopologyError> {
    if center.as_str().trim().is_empty() {
        return Err(TopologyError::EmptyCenter {
            item: item.to_string(),
        });
    }
    if center.as_str() == topology.destination.as_str() {
        return Err(TopologyError::CenterIsDestination {
            item: item.to_string(),
            destination: topology.destination.to_string(),
        });
    }
    if !unit_weight.is_finite() || unit_weight <= 0.0 {
        return Err(TopologyError::InvalidUnitWeight {
            item: item.to_string(),
            weight: unit_weight,
        });
    }
    Ok(())
}

#[expect(
    clippy::float_arithmetic,
    reason = "duplicate distance entries are compared with a tolerance"
)]
fn differs(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() > f64::EPSILON
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare fractional weights and costs"
)]
