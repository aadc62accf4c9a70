//! Terminal user interface for the simulator.
//!
//! A small ratatui front end: program listing with the PC marked,
//! registers, the output port drawn as four LEDs, raw memory and a
//! status line. Execution can be single stepped or run continuously at
//! an adjustable rate.

mod app;
mod ui;

pub use app::{run_simulator, SimulatorApp};
