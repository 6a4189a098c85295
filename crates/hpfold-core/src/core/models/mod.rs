//! # Core Models Module
//!
//! Data structures that describe one run of the HP model.
//!
//! ## Key Components
//!
//! - [`sequence`] - The immutable H/P label sequence of a run
//! - [`folding`] - The shared, read-only run configuration every polymer refers to
//! - [`polymer`] - A chain conformation with its cached energy, age, and mutation intensity
//! - [`population`] - An even-sized collection of polymers
//! - [`error`] - Validation errors for the types above
//!
//! ## Usage
//!
//! ```ignore
//! use hpfold::core::models::{folding::FoldingModel, polymer::Polymer, sequence::Sequence};
//!
//! let sequence: Sequence = "HPHPPHHPHH".parse()?;
//! let model = FoldingModel::new(sequence).into_shared();
//! let polymer = Polymer::random(model, &mut rng)?;
//! ```

pub mod error;
pub mod folding;
pub mod polymer;
pub mod population;
pub mod sequence;
