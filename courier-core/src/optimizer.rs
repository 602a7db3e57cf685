//! The optimiser boundary and the quote it produces.

use std::time::Duration;

use serde::Serialize;

use crate::{Order, Route};

/// Diagnostic information about an optimisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Time spent optimising.
    pub solve_time: Duration,
    /// Number of candidate routes that were priced.
    pub candidates_evaluated: u64,
}

/// The cheapest way found to deliver an order.
///
/// Serialises as `{ "minimumCost": …, "bestRoute": [...] }`. Diagnostics are
/// kept out of the payload.
///
/// # Examples
/// ```rust
/// use courier_core::Quote;
///
/// let quote = Quote::nothing_to_deliver();
/// let json = serde_json::to_string(&quote).unwrap();
/// assert_eq!(json, r#"{"minimumCost":0,"bestRoute":[]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Total cost of the best route, rounded to the nearest integer.
    pub minimum_cost: u64,
    /// The cheapest route; empty when nothing needs delivering.
    pub best_route: Route,
    /// How the quote was obtained.
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl Quote {
    /// The quote for an order with nothing to pick up.
    #[must_use]
    pub fn nothing_to_deliver() -> Self {
        Self {
            minimum_cost: 0,
            best_route: Route::empty(),
            diagnostics: Diagnostics::default(),
        }
    }
}

/// Find the cheapest delivery route for an order.
///
/// Optimisation is total: unknown items and non-positive quantities are
/// ignored rather than rejected, so every order yields a quote.
/// Optimisers must be `Send + Sync` so one instance can serve concurrent
/// callers.
pub trait Optimizer: Send + Sync {
    /// Quote `order`.
    fn optimize(&self, order: &Order) -> Quote;
}
