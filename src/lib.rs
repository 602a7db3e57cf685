//! Facade crate for the courier delivery-cost engine.
//!
//! This crate re-exports the core domain types and, behind the
//! `solver-exhaustive` feature (on by default), the exhaustive optimiser.
//!
//! ```
//! # #[cfg(feature = "solver-exhaustive")]
//! # {
//! use std::sync::Arc;
//!
//! use courier_engine::{ExhaustiveOptimizer, Optimizer, Order, Topology};
//!
//! let optimizer = ExhaustiveOptimizer::new(Arc::new(Topology::reference()));
//! let quote = optimizer.optimize(&Order::new().with_line("A", 1.0).with_line("D", 1.0));
//! assert_eq!(quote.minimum_cost, 105);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use courier_core::{
    CenterId, CostModel, CostModelError, DestinationId, Diagnostics, EmptyLegPolicy, ItemId,
    Location, Manifest, Optimizer, Order, Quote, Route, Topology, TopologyError, TopologySpec,
};

#[cfg(feature = "solver-exhaustive")]
pub use courier_solver_exhaustive::{
    EnumerationStrategy, ExhaustiveConfig, ExhaustiveOptimizer, RoutePricer,
};
