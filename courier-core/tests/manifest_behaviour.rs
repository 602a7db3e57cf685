//! Behavioural tests for order aggregation using rstest-bdd.
#![expect(
    clippy::float_arithmetic,
    reason = "assertions compare fractional weights"
)]

use std::cell::RefCell;

use courier_core::{CenterId, Manifest, Order, Topology};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct ManifestWorld {
    topology: RefCell<Option<Topology>>,
    order: RefCell<Order>,
    manifest: RefCell<Option<Manifest>>,
}

impl ManifestWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn manifest(&self) -> Manifest {
        self.manifest
            .borrow()
            .clone()
            .expect("order should be aggregated before assertions")
    }
}

#[fixture]
fn world() -> ManifestWorld {
    ManifestWorld::default()
}

fn required(manifest: &Manifest) -> Vec<String> {
    manifest
        .required_centers()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[given("the reference topology")]
fn given_reference(world: &ManifestWorld) {
    world.topology.replace(Some(Topology::reference()));
}

#[given("an order for one A and one D")]
fn given_mixed_order(world: &ManifestWorld) {
    world
        .order
        .replace(Order::new().with_line("A", 1.0).with_line("D", 1.0));
}

#[given("an order with an unknown item and no A")]
fn given_ignored_lines(world: &ManifestWorld) {
    world
        .order
        .replace(Order::new().with_line("Q", 4.0).with_line("A", 0.0));
}

#[given("an order for half a G and three H")]
fn given_fractional_order(world: &ManifestWorld) {
    world
        .order
        .replace(Order::new().with_line("G", 0.5).with_line("H", 3.0));
}

#[when("the order is aggregated")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_aggregated(world: &ManifestWorld) {
    let borrowed = world.topology.borrow();
    let topology = borrowed.as_ref().expect("topology should be loaded");
    let manifest = Manifest::aggregate(&world.order.borrow(), topology);
    world.manifest.replace(Some(manifest));
}

#[then("centers C1 and C2 are required in that order")]
fn then_two_centers(world: &ManifestWorld) {
    assert_eq!(required(&world.manifest()), vec!["C1", "C2"]);
}

#[then("C1 holds 3 and C2 holds 12")]
fn then_weights(world: &ManifestWorld) {
    let manifest = world.manifest();
    assert!((manifest.cargo(&CenterId::from("C1")) - 3.0).abs() < 1e-9);
    assert!((manifest.cargo(&CenterId::from("C2")) - 12.0).abs() < 1e-9);
}

#[then("no center is required")]
fn then_nothing_required(world: &ManifestWorld) {
    assert!(world.manifest().required_centers().is_empty());
}

#[then("only C3 is required holding 3.25")]
fn then_only_c3(world: &ManifestWorld) {
    let manifest = world.manifest();
    assert_eq!(required(&manifest), vec!["C3"]);
    assert!((manifest.cargo(&CenterId::from("C3")) - 3.25).abs() < 1e-9);
}

#[scenario(path = "tests/features/manifest.feature", index = 0)]
fn mixed_order(world: ManifestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/manifest.feature", index = 1)]
fn ignored_lines(world: ManifestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/manifest.feature", index = 2)]
fn fractional_quantities(world: ManifestWorld) {
    let _ = world;
}
