//! Core domain types for the courier delivery-cost engine.
//!
//! The crate models a small, static delivery network: a catalog of items
//! stocked at a handful of centers, a single destination, and the distances
//! between them. An [`Order`] is aggregated into a [`Manifest`] of per-center
//! cargo, and an [`Optimizer`] turns it into a [`Quote`]: the cheapest
//! [`Route`] under the weight and distance based [`CostModel`].
//!
//! Nothing here performs I/O. A [`Topology`] is built once, either from the
//! built-in reference data or from a [`TopologySpec`], and then shared
//! read-only.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
pub mod location;
pub mod optimizer;
pub mod order;
pub mod route;
pub mod topology;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost::{CostModel, CostModelError, EmptyLegPolicy};
pub use location::{CenterId, DestinationId, ItemId, Location};
pub use optimizer::{Diagnostics, Optimizer, Quote};
pub use order::{Manifest, Order};
pub use route::Route;
pub use topology::{
    DistanceEntry, DistanceTable, ItemEntry, ItemSpec, Topology, TopologyBuilder, TopologyError,
    TopologySpec,
};
