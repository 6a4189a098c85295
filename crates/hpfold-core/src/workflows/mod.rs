//! # Workflows Module
//!
//! Complete procedures built on the core types and the engine.
//!
//! ## Architecture
//!
//! - **Simulation** ([`simulate`]) - Seeded runs: initial population, single steps, bulk runs with
//!   cooperative cancellation, record tracking, and leaderboard records
//! - **Lab** ([`lab`]) - A single chain mutated one bounded pivot move at a time, with full history

pub mod lab;
pub mod simulate;
