//! Price a candidate route by simulating the vehicle's load along it.

use courier_core::{CostModel, Location, Manifest, Route, Topology};

/// One priced hop of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Where the hop starts.
    pub from: Location,
    /// Where the hop ends.
    pub to: Location,
    /// Distance travelled.
    pub distance: f64,
    /// Weight on board while travelling.
    pub carried_weight: f64,
    /// Unrounded cost of the hop.
    pub cost: f64,
}

/// Prices routes against a topology and cost model.
///
/// The vehicle starts at the first stop holding that center's cargo. Each hop
/// is charged for the weight on board when it departs. Arriving at the
/// destination unloads everything; arriving at a center loads its cargo.
/// Only the route total is rounded, to the nearest integer.
///
/// # Examples
/// ```
/// use courier_core::test_support::{order, route_of};
/// use courier_core::{CostModel, Manifest, Topology};
/// use courier_solver_exhaustive::RoutePricer;
///
/// let topology = Topology::reference();
/// let manifest = Manifest::aggregate(&order(&[("A", 1.0), ("D", 1.0)]), &topology);
/// let route = route_of(&topology, &["C1", "C2", "L1"]).expect("known stops");
///
/// let pricer = RoutePricer::new(&topology, CostModel::default());
/// assert_eq!(pricer.price(&route, &manifest), 105);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RoutePricer<'a> {
    topology: &'a Topology,
    cost_model: CostModel,
}

impl<'a> RoutePricer<'a> {
    /// Create a pricer over `topology`.
    #[must_use]
    pub const fn new(topology: &'a Topology, cost_model: CostModel) -> Self {
        Self {
            topology,
            cost_model,
        }
    }

    /// Total cost of `route`, rounded to the nearest integer.
    ///
    /// An empty route costs nothing.
    #[must_use]
    pub fn price(&self, route: &Route, manifest: &Manifest) -> u64 {
        let mut total = 0.0;
        self.walk(route, manifest, |leg| accumulate(&mut total, leg.cost));
        round_total(total)
    }

    /// The individual hops of `route` with their carried weight and cost.
    #[must_use]
    pub fn price_legs(&self, route: &Route, manifest: &Manifest) -> Vec<Leg> {
        let mut legs = Vec::with_capacity(route.len().saturating_sub(1));
        self.walk(route, manifest, |leg| legs.push(leg));
        legs
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "loads accumulate fractional cargo weights"
    )]
    fn walk(&self, route: &Route, manifest: &Manifest, mut visit: impl FnMut(Leg)) {
        let mut carried = route
            .stops()
            .first()
            .map_or(0.0, |start| manifest.cargo_at(start));
        for (from, to) in route.legs() {
            let distance = self.topology.distance(from, to);
            let cost = self.cost_model.cost(carried, distance);
            log::trace!("{from} → {to}: {distance} carrying {carried} costs {cost}");
            visit(Leg {
                from: from.clone(),
                to: to.clone(),
                distance,
                carried_weight: carried,
                cost,
            });
            carried = if to.is_destination() {
                0.0
            } else {
                carried + manifest.cargo_at(to)
            };
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "summing leg costs")]
fn accumulate(total: &mut f64, cost: f64) {
    *total += cost;
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "leg costs are non-negative and saturate far beyond any realistic route"
)]
const fn round_total(total: f64) -> u64 {
    total.round() as u64
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare fractional weights and costs"
)]
mod tests {
    use super::*;
    use courier_core::EmptyLegPolicy;
    use courier_core::test_support::{order, route_of};
    use rstest::{fixture, rstest};

    #[fixture]
    fn topology() -> Topology {
        Topology::reference()
    }

    fn route(topology: &Topology, ids: &[&str]) -> Route {
        route_of(topology, ids).expect("route stops should resolve")
    }

    #[rstest]
    #[case(&["C1", "C2", "L1"], 105)]
    #[case(&["C1", "L1", "C2", "L1"], 120)]
    #[case(&["C2", "C1", "L1"], 182)]
    #[case(&["C2", "L1", "C1", "L1"], 125)]
    fn prices_reference_candidates(
        topology: Topology,
        #[case] ids: &[&str],
        #[case] expected: u64,
    ) {
        let manifest = Manifest::aggregate(&order(&[("A", 1.0), ("D", 1.0)]), &topology);
        let pricer = RoutePricer::new(&topology, CostModel::default());
        assert_eq!(pricer.price(&route(&topology, ids), &manifest), expected);
    }

    #[rstest]
    fn empty_leg_policy_changes_return_trips(topology: Topology) {
        let manifest = Manifest::aggregate(&order(&[("A", 1.0), ("D", 1.0)]), &topology);
        let candidate = route(&topology, &["C1", "L1", "C2", "L1"]);
        let free = CostModel::default().with_empty_leg_policy(EmptyLegPolicy::Free);
        let pricer = RoutePricer::new(&topology, free);
        assert_eq!(pricer.price(&candidate, &manifest), 95);
    }

    #[rstest]
    fn legs_track_carried_weight(topology: Topology) {
        let manifest = Manifest::aggregate(&order(&[("A", 1.0), ("D", 1.0)]), &topology);
        let pricer = RoutePricer::new(&topology, CostModel::default());
        let legs = pricer.price_legs(&route(&topology, &["C1", "L1", "C2", "L1"]), &manifest);
        let carried: Vec<f64> = legs.iter().map(|leg| leg.carried_weight).collect();
        assert_eq!(carried, vec![3.0, 0.0, 12.0]);
        let total: f64 = legs.iter().map(|leg| leg.cost).sum();
        assert!((total - 120.0).abs() < 1e-9);
    }

    #[rstest]
    fn single_stop_route_is_free(topology: Topology) {
        let manifest = Manifest::aggregate(&order(&[("A", 1.0)]), &topology);
        let pricer = RoutePricer::new(&topology, CostModel::default());
        let candidate = route(&topology, &["C1"]);
        assert_eq!(pricer.price(&candidate, &manifest), 0);
        assert!(pricer.price_legs(&candidate, &manifest).is_empty());
    }

    #[rstest]
    fn empty_route_is_free(topology: Topology) {
        let manifest = Manifest::aggregate(&order(&[]), &topology);
        let pricer = RoutePricer::new(&topology, CostModel::default());
        assert_eq!(pricer.price(&Route::empty(), &manifest), 0);
    }

    #[rstest]
    #[case(0.4, 0)]
    #[case(0.5, 1)]
    #[case(104.5, 105)]
    #[case(104.49, 104)]
    fn totals_round_to_nearest(#[case] total: f64, #[case] expected: u64) {
        assert_eq!(round_total(total), expected);
    }
}
