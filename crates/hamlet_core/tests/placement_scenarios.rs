//! End-to-end placement scenarios on the standard 800×600, 32px registry.

use std::cell::RefCell;
use std::rc::Rc;

use hamlet_core::prelude::*;
use hamlet_test_utils::fixtures::{building, house, px, sawmill, standard_registry, wheat};

fn recorder(registry: &mut CellRegistry) -> Rc<RefCell<Vec<Vec<CellId>>>> {
    let seen: Rc<RefCell<Vec<Vec<CellId>>>> = Rc::default();
    let sink = Rc::clone(&seen);
    registry.subscribe(move |cells| sink.borrow_mut().push(cells.iter().map(Cell::id).collect()));
    seen
}

#[test]
fn two_by_one_cell_at_origin() {
    let mut registry = standard_registry();
    let id = registry
        .place_cell(Cell::from_blueprint(&building("shed", 2, 1)), Some(px(0, 0)))
        .expect("placement at origin succeeds");

    assert!(!registry.is_empty_at(px(0, 0), Footprint::new(2, 1)));
    assert!(registry.is_empty_at(px(64, 0), Footprint::new(1, 1)));
    assert_eq!(registry.cell_at_grid(px(32, 0)).map(Cell::id), Some(id));
    assert!(registry.cell_at_grid(px(96, 0)).is_none());
}

#[test]
fn placement_past_right_edge_is_rejected_silently() {
    let mut registry = standard_registry();
    let seen = recorder(&mut registry);

    let result = registry.place_cell(Cell::from_blueprint(&building("shed", 2, 1)), Some(px(790, 0)));

    assert!(result.is_none());
    assert!(registry.is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn origin_on_boundary_is_out_of_bounds() {
    let registry = standard_registry();
    assert!(!registry.is_empty_at(px(800, 0), Footprint::default()));
    assert!(!registry.is_empty_at(px(0, 600), Footprint::default()));
    assert!(registry.is_empty_at(px(736, 568), Footprint::new(2, 1)));
}

#[test]
fn repeated_placement_leaves_collection_unchanged() {
    let mut registry = standard_registry();
    let seen = recorder(&mut registry);
    let blueprint = building("hall", 3, 3);

    let first = registry.place_cell(Cell::from_blueprint(&blueprint), Some(px(96, 96)));
    let before: Vec<CellId> = registry.cells().iter().map(Cell::id).collect();
    let second = registry.place_cell(Cell::from_blueprint(&blueprint), Some(px(96, 96)));
    let after: Vec<CellId> = registry.cells().iter().map(Cell::id).collect();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(before, after);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn notification_carries_live_sequence() {
    let mut registry = standard_registry();
    let seen = recorder(&mut registry);

    let a = registry
        .place_cell(Cell::from_blueprint(&building("a", 1, 1)), Some(px(0, 0)))
        .expect("placed");
    let b = registry
        .place_cell(Cell::from_blueprint(&building("b", 1, 1)), Some(px(32, 0)))
        .expect("placed");
    registry.destroy_cell(a).expect("destroyed");

    assert_eq!(*seen.borrow(), vec![vec![a], vec![a, b], vec![b]]);
    assert_eq!(
        seen.borrow().last().cloned(),
        Some(registry.cells().iter().map(Cell::id).collect::<Vec<_>>())
    );

    registry.destroy();
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn subscribers_see_post_mutation_state() {
    let mut registry = standard_registry();
    let positions: Rc<RefCell<Vec<Vec2Fixed>>> = Rc::default();
    let sink = Rc::clone(&positions);
    registry.subscribe(move |cells| {
        let mut sink = sink.borrow_mut();
        sink.clear();
        sink.extend(cells.iter().map(Cell::position));
    });

    registry
        .place_cell(Cell::from_blueprint(&building("a", 1, 1)), Some(px(45, 70)))
        .expect("placed");

    assert_eq!(*positions.borrow(), vec![px(32, 64)]);
}

#[test]
fn build_and_plant_couple_orders_to_placement() {
    let mut registry = standard_registry();
    let mut orders = OrderBook::new();

    let layout = registry
        .build_cell(&sawmill(), Some(px(0, 0)), &mut orders)
        .expect("layout placed");
    assert!(registry.build_cell(&sawmill(), Some(px(32, 0)), &mut orders).is_none());
    let plot = registry
        .plant_cell(&wheat(), Some(px(0, 32)), &mut orders)
        .expect("farmland placed");
    assert!(registry.plant_cell(&wheat(), Some(px(0, 32)), &mut orders).is_none());

    assert_eq!(orders.count_of(OrderKind::Build), 1);
    assert_eq!(orders.count_of(OrderKind::Plant), 1);

    let queued: Vec<Order> = orders.iter().copied().collect();
    assert_eq!(
        queued,
        vec![
            Order::new(OrderKind::Build, layout, OrderCategory::Construction),
            Order::new(OrderKind::Plant, plot, OrderCategory::Agriculture),
        ]
    );

    match registry.cell(layout).map(Cell::kind) {
        Some(CellKind::Layout(pending)) => assert_eq!(pending.target().id.as_str(), "sawmill"),
        other => panic!("Expected layout cell, got {other:?}"),
    }
}

#[test]
fn can_build_gates_on_cost_then_space() {
    let mut registry = standard_registry();
    let broke = Stockpile::new();
    let stocked = Stockpile::new().with(Resource::Wood, 25);

    assert!(!registry.can_build_cell(&sawmill(), Some(px(0, 0)), &broke, false));
    assert!(registry.can_build_cell(&sawmill(), Some(px(0, 0)), &broke, true));
    assert!(registry.can_build_cell(&sawmill(), Some(px(0, 0)), &stocked, false));
    assert!(registry.is_empty());

    registry.set_cursor(px(64, 64));
    let mut orders = OrderBook::new();
    registry
        .build_cell(&sawmill(), None, &mut orders)
        .expect("placed at cursor");
    assert!(!registry.can_build_cell(&sawmill(), None, &stocked, false));
}

#[test]
fn houses_prefer_level_over_distance() {
    let mut registry = standard_registry();
    let close = registry
        .place_cell(Cell::from_blueprint(&house(1, 4)), Some(px(32, 32)))
        .expect("placed");
    let far = registry
        .place_cell(Cell::from_blueprint(&house(2, 4)), Some(px(704, 512)))
        .expect("placed");
    let also_close = registry
        .place_cell(Cell::from_blueprint(&house(1, 4)), Some(px(96, 32)))
        .expect("placed");

    let ranked: Vec<CellId> = registry
        .nearest_houses_to(px(0, 0), None)
        .into_iter()
        .map(Cell::id)
        .collect();

    assert_eq!(ranked, vec![far, close, also_close]);
}

#[test]
fn empty_position_scans_generator_output() {
    let mut registry = standard_registry();
    registry
        .place_cell(Cell::from_blueprint(&building("block", 4, 1)), Some(px(0, 0)))
        .expect("placed");

    let mut next_x = 0;
    let found = registry.empty_position(
        || {
            let x = Fixed::from_num(next_x);
            next_x += 32;
            x
        },
        || Fixed::ZERO,
    );

    assert_eq!(found, Some(px(128, 0)));
}

#[test]
fn teardown_then_restart() {
    let mut registry = standard_registry();
    registry
        .place_cell(Cell::from_blueprint(&building("a", 1, 1)), Some(px(0, 0)))
        .expect("placed");

    registry.destroy();
    assert!(!registry.is_started());
    assert!(registry.cells().is_empty());

    registry.start();
    assert!(registry.is_started());
    assert!(registry
        .place_cell(Cell::from_blueprint(&building("a", 1, 1)), Some(px(0, 0)))
        .is_some());
}
