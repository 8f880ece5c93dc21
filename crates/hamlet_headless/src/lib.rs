//! Headless scenario runner for the Hamlet cell registry.
//!
//! Loads a RON scenario, drives a [`hamlet_core::registry::CellRegistry`]
//! through its steps and reports what happened:
//!
//! - **CI verification**: scripted placement sessions without a renderer
//! - **Layout review**: ASCII grid map of the final settlement
//!
//! # Example
//!
//! ```bash
//! cargo run -p hamlet_headless -- run --scenario crates/hamlet_headless/scenarios/village.ron
//! ```

pub mod ascii_visualizer;
pub mod runner;
pub mod scenario;

pub use ascii_visualizer::{render_ascii, AsciiConfig};
pub use runner::{RunReport, ScenarioRunner};
pub use scenario::{Scenario, ScenarioError, ScatterRng, Step};
