//! Runs the bundled village scenario end to end.

use hamlet_core::prelude::*;
use hamlet_headless::{render_ascii, AsciiConfig, Scenario, ScenarioRunner};
use hamlet_test_utils::fixtures::px;

const VILLAGE: &str = include_str!("../scenarios/village.ron");

fn run_village() -> (ScenarioRunner, hamlet_headless::RunReport) {
    let scenario = Scenario::from_ron_str(VILLAGE).expect("bundled scenario parses");
    let mut runner = ScenarioRunner::new(scenario).expect("bundled config is valid");
    let report = runner.run().expect("bundled scenario runs");
    (runner, report)
}

#[test]
fn village_builds_within_budget() {
    let (runner, report) = run_village();

    // 60 wood: sawmill (10), cottage (20), cottage (20), then 10 left.
    assert_eq!(runner.stockpile().amount(Resource::Wood), 10);
    assert_eq!(runner.stockpile().amount(Resource::Stone), 0);
    assert_eq!(report.unaffordable, 1);
    assert_eq!(runner.orders().count_of(OrderKind::Build), 3);
    assert_eq!(report.destroyed, 1);
    assert_eq!(report.frames, 60);
}

#[test]
fn village_layout() {
    let (runner, _) = run_village();
    let registry = runner.registry();

    let sawmill = registry.cell_at(px(40, 10)).expect("sawmill layout");
    assert_eq!(sawmill.tag(), CellTag::Layout);
    assert_eq!(sawmill.type_id().as_str(), "sawmill");

    let cottage = registry.cell_at(px(150, 40)).expect("cottage layout");
    assert_eq!(cottage.footprint(), Footprint::square(2));
    assert!(registry.cell_at(px(390, 290)).is_none(), "well was destroyed");

    let planted = registry.cells_of_kind(CellTag::Farmland).len();
    assert_eq!(runner.orders().count_of(OrderKind::Plant), planted);
    assert!(planted >= 2);
}

#[test]
fn village_is_reproducible() {
    let (first, first_report) = run_village();
    let (second, second_report) = run_village();

    assert_eq!(first_report, second_report);
    let plain = AsciiConfig {
        show_legend: true,
        use_color: false,
    };
    assert_eq!(
        render_ascii(first.registry(), &plain),
        render_ascii(second.registry(), &plain)
    );
}
