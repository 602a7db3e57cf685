#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden quote regression tests for the exhaustive optimiser.
//!
//! Each test loads an order (and optionally a custom network) from JSON,
//! quotes it, and compares the cost, route and candidate count against the
//! recorded expectation. Routes are compared exactly, which pins down the
//! tie-breaking order of the default enumeration strategy.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use courier_core::{CostModel, EmptyLegPolicy, Optimizer, Order, Topology, TopologySpec};
use courier_solver_exhaustive::{EnumerationStrategy, ExhaustiveConfig, ExhaustiveOptimizer};
use rstest::rstest;
use serde::Deserialize;

/// Deserialised golden quote test case.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoldenQuote {
    name: String,
    #[expect(dead_code, reason = "kept for documentation in JSON files")]
    description: String,
    #[serde(default)]
    topology: Option<TopologySpec>,
    order: Order,
    #[serde(default)]
    empty_leg_policy: EmptyLegPolicy,
    expected: ExpectedQuote,
}

/// Expected result from JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedQuote {
    minimum_cost: u64,
    best_route: Vec<String>,
    candidates_evaluated: u64,
}

/// Load a golden quote from the data directory.
fn load_golden_quote(filename: &str) -> GoldenQuote {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_quotes/data")
        .join(filename);
    let contents = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    serde_json::from_str(&contents)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

fn optimizer_for(golden: &GoldenQuote, strategy: EnumerationStrategy) -> ExhaustiveOptimizer {
    let topology = golden.topology.clone().map_or_else(Topology::reference, |spec| {
        Topology::try_from(spec).expect("golden topology should be valid")
    });
    ExhaustiveOptimizer::with_config(
        Arc::new(topology),
        ExhaustiveConfig {
            cost_model: CostModel::default().with_empty_leg_policy(golden.empty_leg_policy),
            strategy,
        },
    )
}

#[rstest]
#[case("two_center_reference.json")]
#[case("three_center_reference.json")]
#[case("full_catalog_reference.json")]
#[case("free_empty_legs.json")]
#[case("nothing_to_deliver.json")]
#[case("symmetric_tie.json")]
fn golden_quote_matches(#[case] filename: &str) {
    let golden = load_golden_quote(filename);
    let quote = optimizer_for(&golden, EnumerationStrategy::PermutationMask).optimize(&golden.order);

    assert_eq!(
        quote.minimum_cost, golden.expected.minimum_cost,
        "{}: minimum cost",
        golden.name
    );
    assert_eq!(
        quote.best_route.ids(),
        golden.expected.best_route,
        "{}: best route",
        golden.name
    );
    assert_eq!(
        quote.diagnostics.candidates_evaluated, golden.expected.candidates_evaluated,
        "{}: candidates evaluated",
        golden.name
    );
}

#[rstest]
#[case("two_center_reference.json")]
#[case("three_center_reference.json")]
#[case("full_catalog_reference.json")]
#[case("free_empty_legs.json")]
#[case("symmetric_tie.json")]
fn recursive_insertion_reaches_golden_cost(#[case] filename: &str) {
    let golden = load_golden_quote(filename);
    let quote =
        optimizer_for(&golden, EnumerationStrategy::RecursiveInsertion).optimize(&golden.order);
    assert_eq!(
        quote.minimum_cost, golden.expected.minimum_cost,
        "{}: minimum cost",
        golden.name
    );
}

#[rstest]
fn golden_quote_serialises_as_payload() {
    let golden = load_golden_quote("two_center_reference.json");
    let quote = optimizer_for(&golden, EnumerationStrategy::default()).optimize(&golden.order);
    let payload = serde_json::to_value(&quote).expect("serialise quote");
    assert_eq!(
        payload,
        serde_json::json!({ "minimumCost": 105, "bestRoute": ["C1", "C2", "L1"] })
    );
}
