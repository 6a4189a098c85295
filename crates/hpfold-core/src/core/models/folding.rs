use super::error::ModelError;
use super::sequence::Sequence;
use crate::core::energy::{Neighborhood, calculate_energy};
use crate::core::lattice::LatticePoint;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct MutationParams {
    /// Chance that a mega-mode polymer performs a mega mutation.
    pub mega_rate: f64,
    /// Pivot moves applied by one mega mutation.
    pub mega_count: usize,
    /// Parent age from which offspring are born in mega mode.
    pub mega_age_threshold: u32,
    /// Optional cap on pivot rejection attempts; `None` retries until a move is accepted.
    pub max_pivot_attempts: Option<usize>,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            mega_rate: 0.01,
            mega_count: 10,
            mega_age_threshold: 10,
            max_pivot_attempts: None,
        }
    }
}

impl MutationParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(0.0..=1.0).contains(&self.mega_rate) {
            return Err(ModelError::InvalidProbability {
                name: "mega_rate",
                value: self.mega_rate,
            });
        }
        Ok(())
    }
}

/// Immutable configuration shared by every polymer of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldingModel {
    sequence: Sequence,
    neighborhood: Neighborhood,
    mutation: MutationParams,
}

impl FoldingModel {
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            neighborhood: Neighborhood::default(),
            mutation: MutationParams::default(),
        }
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_mutation(mut self, mutation: MutationParams) -> Result<Self, ModelError> {
        mutation.validate()?;
        self.mutation = mutation;
        Ok(self)
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn mutation(&self) -> &MutationParams {
        &self.mutation
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn energy_of(&self, coords: &[LatticePoint]) -> u32 {
        calculate_energy(coords, &self.sequence, self.neighborhood)
    }
}
