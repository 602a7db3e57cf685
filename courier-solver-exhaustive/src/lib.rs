//! Exhaustive route optimiser for the courier delivery-cost engine.
//!
//! This crate provides [`ExhaustiveOptimizer`], the default implementation of
//! the [`Optimizer`](courier_core::Optimizer) trait. It aggregates an order
//! into per-center cargo, generates every valid route over the required
//! centers with [`enumerate_routes`], prices each with a [`RoutePricer`] and
//! returns the cheapest.
//!
//! The search is exact and deterministic. Its cost grows as
//! `k! × 2^(k-1)` in the number of required centers `k` (see
//! [`candidate_count`]), which suits networks with a handful of centers.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod enumerate;
mod price;
mod solver;

pub use enumerate::{EnumerationStrategy, UnknownStrategyError, candidate_count, enumerate_routes};
pub use price::{Leg, RoutePricer};
pub use solver::{ExhaustiveConfig, ExhaustiveOptimizer};
