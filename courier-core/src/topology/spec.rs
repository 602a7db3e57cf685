//! Serialisable description of a topology, as read from configuration files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Topology, TopologyError};

/// Catalog entry as written in a topology file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemEntry {
    /// Center stocking the item.
    pub center: String,
    /// Weight of one unit.
    pub unit_weight: f64,
}

/// Distance entry as written in a topology file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistanceEntry {
    /// First endpoint.
    pub from: String,
    /// Second endpoint.
    pub to: String,
    /// Distance between the endpoints, valid in both directions.
    pub distance: f64,
}

/// JSON shape of a topology file.
///
/// # Examples
/// ```
/// use courier_core::{Topology, TopologySpec};
///
/// let json = r#"{
///     "destination": "L1",
///     "items": { "A": { "center": "C1", "unitWeight": 3 } },
///     "distances": [ { "from": "C1", "to": "L1", "distance": 3 } ]
/// }"#;
/// let spec: TopologySpec = serde_json::from_str(json).expect("valid JSON");
/// let topology = Topology::try_from(spec).expect("valid topology");
/// assert_eq!(topology.destination_id().as_str(), "L1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologySpec {
    /// Identifier of the delivery endpoint.
    pub destination: String,
    /// Item catalog keyed by item identifier.
    pub items: BTreeMap<String, ItemEntry>,
    /// Pairwise distances.
    #[serde(default)]
    pub distances: Vec<DistanceEntry>,
}

impl TryFrom<TopologySpec> for Topology {
    type Error = TopologyError;

    fn try_from(spec: TopologySpec) -> Result<Self, Self::Error> {
        let TopologySpec {
            destination,
            items,
            distances,
        } = spec;
        let with_items = items
            .into_iter()
            .fold(Self::builder(destination), |builder, (id, entry)| {
                builder.item(id, entry.center, entry.unit_weight)
            });
        distances
            .into_iter()
            .fold(with_items, |builder, entry| {
                builder.distance(entry.from, entry.to, entry.distance)
            })
            .build()
    }
}

impl From<&Topology> for TopologySpec {
    fn from(topology: &Topology) -> Self {
        let items = topology
            .items()
            .map(|(id, spec)| {
                (
                    id.to_string(),
                    ItemEntry {
                        center: spec.center.to_string(),
                        unit_weight: spec.unit_weight,
                    },
                )
            })
            .collect();
        let mut distances: Vec<DistanceEntry> = topology
            .distance_table()
            .entries()
            .map(|(from, to, distance)| DistanceEntry {
                from: from.to_string(),
                to: to.to_string(),
                distance,
            })
            .collect();
        distances.sort_by(|lhs, rhs| lhs.from.cmp(&rhs.from).then_with(|| lhs.to.cmp(&rhs.to)));
        Self {
            destination: topology.destination_id().to_string(),
            items,
            distances,
        }
    }
}
