use crate::core::lattice::{LatticePoint, straight_line};
use crate::core::models::folding::FoldingModel;
use crate::core::models::sequence::Sequence;
use crate::core::saw::{DEFAULT_BOUNDED_ATTEMPTS, mutate_until_changed};
use crate::core::utils::rng::{SimRng, Stream, derive_rng};
use crate::engine::error::EngineError;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Single-chain mutation explorer.
///
/// Starts from a straight chain and applies one bounded pivot mutation per step, keeping every
/// conformation so that any step can be compared with the one before it.
#[derive(Debug)]
pub struct Lab {
    model: Arc<FoldingModel>,
    history: Vec<Vec<LatticePoint>>,
    rng: SimRng,
    max_attempts: usize,
}

/// Energies of one history entry and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepScores {
    pub current: u32,
    pub previous: Option<u32>,
}

impl Lab {
    /// A lab on the random sequence of `length` associated with `seed`.
    pub fn new(length: usize, seed: u64) -> Result<Self, EngineError> {
        let sequence = Sequence::from_seed(length, seed)?;
        Ok(Self::with_model(
            FoldingModel::new(sequence).into_shared(),
            seed,
        ))
    }

    pub fn with_model(model: Arc<FoldingModel>, seed: u64) -> Self {
        let start = straight_line(model.length());
        Self {
            model,
            history: vec![start],
            rng: derive_rng(seed, Stream::Lab),
            max_attempts: DEFAULT_BOUNDED_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Applies one bounded mutation to the latest conformation and records the result.
    ///
    /// Returns `false` when no change was found within the attempt cap; the unchanged
    /// conformation is still appended.
    #[instrument(skip_all, name = "lab_mutate", fields(step = self.history.len()))]
    pub fn mutate(&mut self) -> bool {
        let mut next = self.current().to_vec();
        let changed = mutate_until_changed(&mut next, &mut self.rng, self.max_attempts);
        debug!(changed, energy = self.model.energy_of(&next), "Lab step recorded.");
        self.history.push(next);
        changed
    }

    pub fn current(&self) -> &[LatticePoint] {
        // History always holds the starting conformation.
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[Vec<LatticePoint>] {
        &self.history
    }

    pub fn sequence(&self) -> &Sequence {
        self.model.sequence()
    }

    pub fn energy_at(&self, index: usize) -> Option<u32> {
        self.history
            .get(index)
            .map(|coords| self.model.energy_of(coords))
    }

    pub fn scores_at(&self, index: usize) -> Option<StepScores> {
        let current = self.energy_at(index)?;
        let previous = index.checked_sub(1).and_then(|i| self.energy_at(i));
        Some(StepScores { current, previous })
    }

    pub fn reset(&mut self) {
        self.history.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::saw::is_valid_walk;

    #[test]
    fn lab_starts_from_a_straight_chain() {
        let lab = Lab::new(12, 0).unwrap();
        assert_eq!(lab.history().len(), 1);
        assert_eq!(lab.current(), straight_line(12).as_slice());
        assert_eq!(lab.energy_at(0), Some(0));
        assert_eq!(
            lab.scores_at(0),
            Some(StepScores {
                current: 0,
                previous: None
            })
        );
    }

    #[test]
    fn every_mutation_extends_history_with_a_valid_changed_walk() {
        let mut lab = Lab::new(20, 3).unwrap();
        for step in 1..=25 {
            assert!(lab.mutate());
            assert_eq!(lab.history().len(), step + 1);
            assert!(is_valid_walk(lab.current()));
            assert_ne!(lab.history()[step], lab.history()[step - 1]);
        }
        let scores = lab.scores_at(25).unwrap();
        assert_eq!(scores.previous, lab.energy_at(24));
    }

    #[test]
    fn zero_attempt_cap_records_an_unchanged_step() {
        let mut lab = Lab::new(8, 1).unwrap().with_max_attempts(0);
        assert!(!lab.mutate());
        assert_eq!(lab.history()[0], lab.history()[1]);
    }

    #[test]
    fn same_seed_gives_the_same_lab_session() {
        let run = || {
            let mut lab = Lab::new(15, 42).unwrap();
            for _ in 0..10 {
                lab.mutate();
            }
            lab.history().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn reset_keeps_only_the_starting_chain() {
        let mut lab = Lab::new(10, 5).unwrap();
        lab.mutate();
        lab.mutate();
        lab.reset();
        assert_eq!(lab.history().len(), 1);
        assert_eq!(lab.scores_at(1), None);
    }
}
