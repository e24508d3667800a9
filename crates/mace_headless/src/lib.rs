//! Headless scenario runner for the mace rules.
//!
//! Plays scripted host events against the in-memory sandbox host and
//! reports every mutation the core asked for. This enables:
//!
//! - **CI verification**: Scenario files pin down gameplay numbers
//! - **Tuning checks**: Try a tuning file against known scenarios
//! - **Debugging**: See exactly which sounds, particles and pushes a hit produces
//!
//! # Output
//!
//! - **stdout**: Scenario reports (JSON)
//! - **stderr**: Logs (human-readable)
//!
//! # Example
//!
//! ```bash
//! # Run one scenario
//! cargo run -p mace_headless -- run --scenario crates/mace_headless/scenarios/basic_smash.ron
//!
//! # Run every scenario in a directory
//! cargo run -p mace_headless -- batch --dir crates/mace_headless/scenarios
//! ```

pub mod batch;
pub mod config_loader;
pub mod runner;
pub mod scenario;
