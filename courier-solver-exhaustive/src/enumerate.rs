//! Enumerate every candidate delivery route over a set of centers.
//!
//! A candidate visits each required center exactly once, may return to the
//! destination between two consecutive centers, and always finishes at the
//! destination. For `k` centers there are `k! × 2^(k-1)` candidates.
//!
//! Two generators are provided. They produce the same set of routes in a
//! different order; [`EnumerationStrategy::PermutationMask`] is the default
//! and its order decides which of several equally cheap routes is reported.

use std::str::FromStr;

use courier_core::{CenterId, DestinationId, Location, Route};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How candidate routes are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumerationStrategy {
    /// Every ordering of the centers, in lexicographic index order, combined
    /// with every bitmask of destination stops between them.
    #[default]
    PermutationMask,
    /// Depth-first extension of partial routes, choosing each next center
    /// either directly or via one destination stop.
    RecursiveInsertion,
}

impl EnumerationStrategy {
    /// Return the strategy as its configuration keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PermutationMask => "permutation-mask",
            Self::RecursiveInsertion => "recursive-insertion",
        }
    }
}

impl std::fmt::Display for EnumerationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enumeration strategy keyword was not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown enumeration strategy '{0}' (expected 'permutation-mask' or 'recursive-insertion')"
)]
pub struct UnknownStrategyError(pub String);

impl FromStr for EnumerationStrategy {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permutation-mask" => Ok(Self::PermutationMask),
            "recursive-insertion" => Ok(Self::RecursiveInsertion),
            _ => Err(UnknownStrategyError(s.to_owned())),
        }
    }
}

/// Number of candidates generated for `centers` required centers.
///
/// Saturates at `u64::MAX`; returns `0` when there are no centers.
///
/// # Examples
/// ```
/// use courier_solver_exhaustive::candidate_count;
///
/// assert_eq!(candidate_count(1), 1);
/// assert_eq!(candidate_count(2), 4);
/// assert_eq!(candidate_count(3), 24);
/// ```
#[must_use]
pub fn candidate_count(centers: usize) -> u64 {
    if centers == 0 {
        return 0;
    }
    let Ok(k) = u64::try_from(centers) else {
        return u64::MAX;
    };
    let orderings = (2..=k).try_fold(1_u64, u64::checked_mul);
    let masks = u32::try_from(k - 1)
        .ok()
        .and_then(|exponent| 1_u64.checked_shl(exponent));
    orderings
        .zip(masks)
        .and_then(|(orderings_count, mask_count)| orderings_count.checked_mul(mask_count))
        .unwrap_or(u64::MAX)
}

/// Generate every candidate route over `centers` ending at `destination`.
///
/// An empty `centers` slice yields no routes.
///
/// # Examples
/// ```
/// use courier_core::{CenterId, DestinationId};
/// use courier_solver_exhaustive::{EnumerationStrategy, enumerate_routes};
///
/// let centers = [CenterId::from("C1"), CenterId::from("C2")];
/// let routes = enumerate_routes(
///     &centers,
///     &DestinationId::from("L1"),
///     EnumerationStrategy::PermutationMask,
/// );
/// let rendered: Vec<String> = routes.iter().map(ToString::to_string).collect();
/// assert_eq!(
///     rendered,
///     vec![
///         "C1 → C2 → L1",
///         "C1 → L1 → C2 → L1",
///         "C2 → C1 → L1",
///         "C2 → L1 → C1 → L1",
///     ]
/// );
/// ```
#[must_use]
pub fn enumerate_routes(
    centers: &[CenterId],
    destination: &DestinationId,
    strategy: EnumerationStrategy,
) -> Vec<Route> {
    if centers.is_empty() {
        return Vec::new();
    }
    match strategy {
        EnumerationStrategy::PermutationMask => permutation_mask(centers, destination),
        EnumerationStrategy::RecursiveInsertion => recursive_insertion(centers, destination),
    }
}

fn permutation_mask(centers: &[CenterId], destination: &DestinationId) -> Vec<Route> {
    let gaps = centers.len().saturating_sub(1);
    let Some(mask_count) = u32::try_from(gaps)
        .ok()
        .and_then(|exponent| 1_u64.checked_shl(exponent))
    else {
        log::warn!("{} centers exceed the enumerable range", centers.len());
        return Vec::new();
    };

    let mut routes = Vec::new();
    let mut order: Vec<usize> = (0..centers.len()).collect();
    loop {
        let ordering: Vec<&CenterId> = order.iter().filter_map(|&idx| centers.get(idx)).collect();
        for mask in 0..mask_count {
            routes.push(insert_stops(&ordering, destination, mask));
        }
        if !next_permutation(&mut order) {
            break;
        }
    }
    routes
}

/// Lay out `ordering`, stopping at the destination before the `i`-th center
/// whenever bit `i - 1` of `mask` is set.
fn insert_stops(ordering: &[&CenterId], destination: &DestinationId, mask: u64) -> Route {
    let mut stops = Vec::with_capacity(ordering.len() * 2);
    for (position, center) in ordering.iter().enumerate() {
        let gap_selected = position
            .checked_sub(1)
            .and_then(|bit| u32::try_from(bit).ok())
            .and_then(|bit| 1_u64.checked_shl(bit))
            .is_some_and(|flag| mask & flag != 0);
        if gap_selected {
            stops.push(Location::Destination(destination.clone()));
        }
        stops.push(Location::Center((*center).clone()));
    }
    stops.push(Location::Destination(destination.clone()));
    Route::new(stops)
}

/// Advance `order` to the next permutation in lexicographic order.
///
/// Returns `false` once the last permutation has been reached.
fn next_permutation(order: &mut [usize]) -> bool {
    let Some(pivot) = order
        .windows(2)
        .rposition(|pair| matches!(pair, [lhs, rhs] if lhs < rhs))
    else {
        return false;
    };
    let Some(&pivot_value) = order.get(pivot) else {
        return false;
    };
    let Some(successor) = order.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };
    order.swap(pivot, successor);
    if let Some(tail) = order.get_mut(pivot + 1..) {
        tail.reverse();
    }
    true
}

struct Partial<'a> {
    stops: Vec<Location>,
    remaining: Vec<&'a CenterId>,
}

fn recursive_insertion(centers: &[CenterId], destination: &DestinationId) -> Vec<Route> {
    let mut routes = Vec::new();
    let mut stack: Vec<Partial<'_>> = centers
        .iter()
        .rev()
        .map(|first| Partial {
            stops: vec![Location::Center(first.clone())],
            remaining: centers.iter().filter(|center| *center != first).collect(),
        })
        .collect();

    while let Some(Partial { stops, remaining }) = stack.pop() {
        if remaining.is_empty() {
            let mut complete = stops;
            if !complete.last().is_some_and(Location::is_destination) {
                complete.push(Location::Destination(destination.clone()));
            }
            routes.push(Route::new(complete));
            continue;
        }
        let via_destination_allowed = !stops.last().is_some_and(Location::is_destination);
        for next in remaining.iter().rev() {
            let rest: Vec<&CenterId> = remaining
                .iter()
                .copied()
                .filter(|center| center != next)
                .collect();
            if via_destination_allowed {
                let mut via = stops.clone();
                via.push(Location::Destination(destination.clone()));
                via.push(Location::Center((*next).clone()));
                stack.push(Partial {
                    stops: via,
                    remaining: rest.clone(),
                });
            }
            let mut direct = stops.clone();
            direct.push(Location::Center((*next).clone()));
            stack.push(Partial {
                stops: direct,
                remaining: rest,
            });
        }
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn centers(count: usize) -> Vec<CenterId> {
        (1..=count).map(|n| CenterId::new(format!("C{n}"))).collect()
    }

    fn destination() -> DestinationId {
        DestinationId::from("L1")
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 4)]
    #[case(3, 24)]
    #[case(4, 192)]
    #[case(5, 1920)]
    fn candidate_count_matches_formula(#[case] k: usize, #[case] expected: u64) {
        assert_eq!(candidate_count(k), expected);
    }

    #[rstest]
    fn candidate_count_saturates() {
        assert_eq!(candidate_count(40), u64::MAX);
    }

    #[rstest]
    #[case(EnumerationStrategy::PermutationMask, 1)]
    #[case(EnumerationStrategy::PermutationMask, 2)]
    #[case(EnumerationStrategy::PermutationMask, 3)]
    #[case(EnumerationStrategy::PermutationMask, 4)]
    #[case(EnumerationStrategy::RecursiveInsertion, 1)]
    #[case(EnumerationStrategy::RecursiveInsertion, 2)]
    #[case(EnumerationStrategy::RecursiveInsertion, 3)]
    #[case(EnumerationStrategy::RecursiveInsertion, 4)]
    fn strategies_generate_expected_number_of_routes(
        #[case] strategy: EnumerationStrategy,
        #[case] k: usize,
    ) {
        let routes = enumerate_routes(&centers(k), &destination(), strategy);
        let expected = usize::try_from(candidate_count(k)).expect("small count");
        assert_eq!(routes.len(), expected);
        let unique: HashSet<&Route> = routes.iter().collect();
        assert_eq!(unique.len(), expected, "routes must be distinct");
    }

    #[rstest]
    fn strategies_generate_the_same_set() {
        let required = centers(4);
        let masks: HashSet<Route> =
            enumerate_routes(&required, &destination(), EnumerationStrategy::PermutationMask)
                .into_iter()
                .collect();
        let inserts: HashSet<Route> = enumerate_routes(
            &required,
            &destination(),
            EnumerationStrategy::RecursiveInsertion,
        )
        .into_iter()
        .collect();
        assert_eq!(masks, inserts);
    }

    #[rstest]
    #[case(EnumerationStrategy::PermutationMask)]
    #[case(EnumerationStrategy::RecursiveInsertion)]
    fn routes_are_structurally_valid(#[case] strategy: EnumerationStrategy) {
        let required = centers(3);
        for route in enumerate_routes(&required, &destination(), strategy) {
            let stops = route.stops();
            assert!(
                stops.last().is_some_and(Location::is_destination),
                "{route} must end at the destination"
            );
            assert!(
                stops.first().is_some_and(|stop| !stop.is_destination()),
                "{route} must start at a center"
            );
            for center in &required {
                let visits = stops
                    .iter()
                    .filter(|stop| stop.center() == Some(center))
                    .count();
                assert_eq!(visits, 1, "{route} must visit {center} once");
            }
            let consecutive = route
                .legs()
                .any(|(from, to)| from.is_destination() && to.is_destination());
            assert!(!consecutive, "{route} repeats the destination");
        }
    }

    #[rstest]
    fn first_candidate_visits_centers_in_given_order() {
        let required = centers(3);
        let routes = enumerate_routes(&required, &destination(), EnumerationStrategy::default());
        let first = routes.first().expect("at least one route");
        assert_eq!(first.ids(), vec!["C1", "C2", "C3", "L1"]);
    }

    #[rstest]
    fn mask_order_follows_gap_bits() {
        let required = centers(3);
        let routes = enumerate_routes(&required, &destination(), EnumerationStrategy::default());
        let rendered: Vec<Vec<&str>> = routes.iter().take(4).map(Route::ids).collect();
        assert_eq!(
            rendered,
            vec![
                vec!["C1", "C2", "C3", "L1"],
                vec!["C1", "L1", "C2", "C3", "L1"],
                vec!["C1", "C2", "L1", "C3", "L1"],
                vec!["C1", "L1", "C2", "L1", "C3", "L1"],
            ]
        );
    }

    #[rstest]
    fn permutations_follow_lexicographic_index_order() {
        let required = centers(3);
        let routes = enumerate_routes(&required, &destination(), EnumerationStrategy::default());
        let leading: Vec<Vec<&str>> = routes.iter().step_by(4).map(Route::ids).collect();
        assert_eq!(
            leading,
            vec![
                vec!["C1", "C2", "C3", "L1"],
                vec!["C1", "C3", "C2", "L1"],
                vec!["C2", "C1", "C3", "L1"],
                vec!["C2", "C3", "C1", "L1"],
                vec!["C3", "C1", "C2", "L1"],
                vec!["C3", "C2", "C1", "L1"],
            ]
        );
    }

    #[rstest]
    fn empty_center_list_yields_nothing() {
        let routes = enumerate_routes(&[], &destination(), EnumerationStrategy::default());
        assert!(routes.is_empty());
    }

    #[rstest]
    #[case("permutation-mask", EnumerationStrategy::PermutationMask)]
    #[case("Recursive-Insertion", EnumerationStrategy::RecursiveInsertion)]
    fn strategy_parses_keywords(#[case] text: &str, #[case] expected: EnumerationStrategy) {
        assert_eq!(text.parse::<EnumerationStrategy>(), Ok(expected));
    }

    #[rstest]
    fn strategy_rejects_unknown_keyword() {
        let err = "greedy"
            .parse::<EnumerationStrategy>()
            .expect_err("unknown keyword");
        assert_eq!(err, UnknownStrategyError("greedy".to_owned()));
    }
}
