//! `ExhaustiveOptimizer`: price every candidate route and keep the cheapest.

use std::sync::Arc;
use std::time::Instant;

use courier_core::{
    CostModel, Diagnostics, Location, Manifest, Optimizer, Order, Quote, Route, Topology,
};

use crate::enumerate::{EnumerationStrategy, enumerate_routes};
use crate::price::RoutePricer;

/// Configuration for [`ExhaustiveOptimizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExhaustiveConfig {
    /// Tariff used to price each leg.
    pub cost_model: CostModel,
    /// How candidate routes are generated.
    pub strategy: EnumerationStrategy,
}

/// Exhaustive search over every valid delivery route.
///
/// The optimiser owns a shared, read-only [`Topology`] and holds no mutable
/// state, so one instance can quote orders from several threads at once.
/// The search is exponential in the number of required centers; it is meant
/// for networks with a handful of centers.
///
/// When several routes share the minimum cost, the first one generated wins.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use courier_core::{Optimizer, Order, Topology};
/// use courier_solver_exhaustive::ExhaustiveOptimizer;
///
/// let optimizer = ExhaustiveOptimizer::new(Arc::new(Topology::reference()));
/// let quote = optimizer.optimize(&Order::new().with_line("A", 1.0).with_line("D", 1.0));
/// assert_eq!(quote.minimum_cost, 105);
/// assert_eq!(quote.best_route.ids(), vec!["C1", "C2", "L1"]);
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveOptimizer {
    topology: Arc<Topology>,
    config: ExhaustiveConfig,
}

impl ExhaustiveOptimizer {
    /// Construct an optimiser using default configuration.
    #[must_use]
    pub fn new(topology: Arc<Topology>) -> Self {
        Self::with_config(topology, ExhaustiveConfig::default())
    }

    /// Construct an optimiser with explicit configuration.
    #[must_use]
    pub const fn with_config(topology: Arc<Topology>, config: ExhaustiveConfig) -> Self {
        Self { topology, config }
    }

    /// The network being served.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ExhaustiveConfig {
        &self.config
    }

    fn search(&self, manifest: &Manifest) -> Option<(Route, u64, u64)> {
        let pricer = RoutePricer::new(&self.topology, self.config.cost_model);
        match manifest.required_centers() {
            [] => None,
            [center] => {
                let route = Route::new(vec![
                    Location::Center(center.clone()),
                    self.topology.destination(),
                ]);
                let cost = pricer.price(&route, manifest);
                Some((route, cost, 1))
            }
            centers => {
                let candidates =
                    enumerate_routes(centers, self.topology.destination_id(), self.config.strategy);
                let evaluated = u64::try_from(candidates.len()).unwrap_or(u64::MAX);
                cheapest(&pricer, manifest, candidates).map(|(route, cost)| (route, cost, evaluated))
            }
        }
    }
}

/// Keep the first candidate with the lowest cost.
fn cheapest(
    pricer: &RoutePricer<'_>,
    manifest: &Manifest,
    candidates: Vec<Route>,
) -> Option<(Route, u64)> {
    let mut best: Option<(Route, u64)> = None;
    for route in candidates {
        let cost = pricer.price(&route, manifest);
        let improves = best
            .as_ref()
            .is_none_or(|(_, best_cost)| cost < *best_cost);
        if improves {
            best = Some((route, cost));
        }
    }
    best
}

impl Optimizer for ExhaustiveOptimizer {
    fn optimize(&self, order: &Order) -> Quote {
        let started_at = Instant::now();
        let manifest = Manifest::aggregate(order, &self.topology);
        let Some((best_route, minimum_cost, candidates_evaluated)) = self.search(&manifest) else {
            log::debug!("order requires no pickups");
            let mut quote = Quote::nothing_to_deliver();
            quote.diagnostics.solve_time = started_at.elapsed();
            return quote;
        };
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            candidates_evaluated,
        };
        log::debug!(
            "best route {best_route} costs {minimum_cost} ({candidates_evaluated} candidates in {:?})",
            diagnostics.solve_time
        );
        Quote {
            minimum_cost,
            best_route,
            diagnostics,
        }
    }
}
