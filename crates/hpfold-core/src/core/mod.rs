//! # Core Module
//!
//! Stateless building blocks of the HP lattice model.
//!
//! ## Architecture
//!
//! - **Lattice Geometry** ([`lattice`]) - Lattice points and the dihedral symmetry group used by pivot moves
//! - **Models** ([`models`]) - Label sequences, the shared folding model, and polymers
//! - **Self-Avoiding Walks** ([`saw`]) - Initial chain generation and Madras-Sokal pivot mutation
//! - **Energy** ([`energy`]) - Non-backbone H-H contact scoring
//! - **Benchmarks** ([`benchmarks`]) - Standard 2D HP benchmark sequences and their optimal scores
//! - **File I/O** ([`io`]) - Leaderboard records and energy history export
//! - **Utilities** ([`utils`]) - Deterministic random number streams

pub mod benchmarks;
pub mod energy;
pub mod io;
pub mod lattice;
pub mod models;
pub mod saw;
pub mod utils;
