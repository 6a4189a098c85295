//! # Engine Module
//!
//! The evolutionary machinery that moves a population of folds from one generation to the next.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Population and tournament sizes, survivorship parameters, and their validation
//! - **Selection** ([`selection`]) - Clone pruning, age-based culling, immigration, and tournament selection
//! - **Generations** ([`generation`]) - The single step that ages parents and appends their offspring
//! - **Statistics** ([`stats`]) - Energy summaries, death logs, and record tracking
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - Engine errors wrapping configuration, model, and walk failures
//!
//! ## Parallelism
//!
//! With the `parallel` feature, immigrants and offspring are built on the rayon pool. Every
//! work item draws from its own generator seeded in order from the caller's stream, so a
//! seeded run produces the same populations with or without the feature.

pub mod config;
pub mod error;
pub mod generation;
pub mod progress;
pub mod selection;
pub mod stats;
