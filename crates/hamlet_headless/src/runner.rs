//! Headless scenario runner implementation.

use std::cell::Cell as Counter;
use std::rc::Rc;

use hamlet_core::prelude::*;

use crate::scenario::{Scenario, ScenarioError, ScatterRng, Step};
use std::result::Result;

/// Seed offset for the y generator.
const Y_STREAM: u64 = 0x2545_F491_4F6C_DD1D;

/// Outcome counters for one scenario run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Cells that made it into the registry.
    pub placed: u32,
    /// Placements refused for space or bounds.
    pub rejected: u32,
    /// Builds skipped because the stockpile could not cover them.
    pub unaffordable: u32,
    /// Cells removed by `Destroy` steps.
    pub destroyed: u32,
    /// `Destroy` steps that hit nothing.
    pub missed: u32,
    /// Frames advanced.
    pub frames: u64,
    /// Change notifications observed.
    pub notifications: u32,
}

/// Drives a registry through a [`Scenario`].
pub struct ScenarioRunner {
    scenario: Scenario,
    registry: CellRegistry,
    catalog: BlueprintCatalog,
    stockpile: Stockpile,
    orders: OrderBook,
    notifications: Rc<Counter<u32>>,
}

impl ScenarioRunner {
    /// Set up a started registry for `scenario`.
    ///
    /// Fails when the scenario's config does not validate.
    pub fn new(scenario: Scenario) -> Result<Self, ScenarioError> {
        let mut registry = CellRegistry::new(scenario.config)?;
        let notifications = Rc::new(Counter::new(0));
        let counter = Rc::clone(&notifications);
        registry.subscribe(move |_| counter.set(counter.get() + 1));
        registry.start();

        Ok(Self {
            catalog: scenario.blueprint_catalog(),
            stockpile: scenario.starting_stockpile(),
            orders: OrderBook::new(),
            registry,
            notifications,
            scenario,
        })
    }

    /// Replay every step in order.
    ///
    /// Placement failures are counted, not returned; only unknown blueprint
    /// ids abort the run.
    pub fn run(&mut self) -> Result<RunReport, ScenarioError> {
        tracing::info!(
            scenario = %self.scenario.name,
            steps = self.scenario.steps.len(),
            "Running scenario"
        );

        let mut report = RunReport::default();
        let steps = self.scenario.steps.clone();
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!(index, ?step, "Step");
            self.apply(step, &mut report)?;
        }
        report.notifications = self.notifications.get();

        tracing::info!(
            placed = report.placed,
            rejected = report.rejected,
            live = self.registry.len(),
            orders = self.orders.len(),
            "Scenario finished"
        );
        Ok(report)
    }

    fn apply(&mut self, step: &Step, report: &mut RunReport) -> Result<(), ScenarioError> {
        match step {
            Step::Cursor { x, y } => self.registry.set_cursor(Vec2Fixed::from_pixels(*x, *y)),
            Step::Place { cell, at } => {
                let blueprint = self.catalog.get(cell)?;
                let placed = self
                    .registry
                    .place_cell(Cell::from_blueprint(blueprint), pixel(*at));
                tally(report, placed);
            }
            Step::Build { cell, at } => {
                let blueprint = self.catalog.get(cell)?;
                let at = pixel(*at);
                if !self
                    .registry
                    .can_build_cell(blueprint, at, &self.stockpile, false)
                {
                    if self.stockpile.can_afford(&blueprint.cost) {
                        report.rejected += 1;
                    } else {
                        tracing::warn!(cell = %cell, "Cannot afford build");
                        report.unaffordable += 1;
                    }
                    return Ok(());
                }
                let placed = self.registry.build_cell(blueprint, at, &mut self.orders);
                if placed.is_some() {
                    self.stockpile.spend(&blueprint.cost);
                }
                tally(report, placed);
            }
            Step::Plant { crop, at } => {
                let blueprint = self.catalog.get(crop)?;
                let placed = self
                    .registry
                    .plant_cell(blueprint, pixel(*at), &mut self.orders);
                tally(report, placed);
            }
            Step::Destroy { at } => {
                let point = Vec2Fixed::from_pixels(at.0, at.1);
                match self.registry.cell_at(point).map(Cell::id) {
                    Some(id) => {
                        self.registry.destroy_cell(id)?;
                        report.destroyed += 1;
                    }
                    None => {
                        tracing::warn!(x = at.0, y = at.1, "Nothing to destroy");
                        report.missed += 1;
                    }
                }
            }
            Step::Tick { frames } => {
                for _ in 0..*frames {
                    self.registry.update();
                }
                report.frames += u64::from(*frames);
            }
            Step::ScatterFarmland { crop, count, seed } => {
                let blueprint = self.catalog.get(crop)?.clone();
                self.scatter(&blueprint, *count, *seed, report);
            }
        }
        Ok(())
    }

    fn scatter(&mut self, crop: &CellBlueprint, count: u32, seed: u64, report: &mut RunReport) {
        let viewport = *self.registry.viewport();
        let mut x_rng = ScatterRng::new(seed);
        let mut y_rng = ScatterRng::new(seed ^ Y_STREAM);

        for _ in 0..count {
            let found = self.registry.empty_position(
                || Fixed::from_num(x_rng.next_range(0, viewport.width as i32)),
                || Fixed::from_num(y_rng.next_range(0, viewport.height as i32)),
            );
            let Some(position) = found else {
                tracing::debug!(crop = %crop.id.as_str(), "No empty position found");
                report.rejected += 1;
                continue;
            };
            let placed = self
                .registry
                .plant_cell(crop, Some(position), &mut self.orders);
            tally(report, placed);
        }
    }

    /// The registry being driven.
    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    /// Orders queued so far.
    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    /// Remaining resources.
    pub fn stockpile(&self) -> &Stockpile {
        &self.stockpile
    }

    /// Tear the registry down.
    pub fn finish(mut self) -> CellRegistry {
        self.registry.destroy();
        self.registry
    }
}

fn pixel(at: Option<(i32, i32)>) -> Option<Vec2Fixed> {
    at.map(|(x, y)| Vec2Fixed::from_pixels(x, y))
}

fn tally(report: &mut RunReport, placed: Option<CellId>) {
    if placed.is_some() {
        report.placed += 1;
    } else {
        report.rejected += 1;
    }
}
