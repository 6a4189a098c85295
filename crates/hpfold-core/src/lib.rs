//! # HP Fold Core Library
//!
//! An evolutionary search engine for stable conformations of the two-dimensional HP lattice
//! protein model. A chain of hydrophobic (H) and polar (P) monomers folds on a square lattice,
//! and a genetic algorithm searches for the conformation with the most non-backbone H-H contacts.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a clear separation of concerns:
//!
//! - **[`core`]: The Foundation.** Lattice geometry and its symmetry group, label sequences,
//!   polymers, the self-avoiding-walk generator and pivot mutator, the contact energy
//!   evaluator, benchmark sequences, and record I/O.
//!
//! - **[`engine`]: The Evolutionary Machinery.** Run configuration, survivorship pruning,
//!   tournament selection, generation advancement, and the statistics gathered along the way.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on the two layers above:
//!   seeded simulations with bulk runs and record tracking, and the single-polymer mutation lab.

pub mod core;
pub mod engine;
pub mod workflows;
