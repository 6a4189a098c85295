//! Self-avoiding walks on the square lattice and the Madras-Sokal pivot move.
//!
//! A pivot move picks an interior monomer, takes the shorter of the two segments on either
//! side of it, and maps that segment through a non-identity lattice symmetry about the pivot.
//! The move is accepted only when no transformed point lands on the fixed part of the chain,
//! so an accepted move always leaves a valid walk behind. Collisions are rejected and the
//! move is resampled from scratch.

use crate::core::lattice::{LatticePoint, Symmetry, manhattan_distance, straight_line};
use rand::Rng;
use std::collections::HashSet;
use std::ops::Range;
use thiserror::Error;
use tracing::{trace, warn};

/// Attempt cap of the bounded mutator used by the lab.
pub const DEFAULT_BOUNDED_ATTEMPTS: usize = 100;

const MIN_PIVOT_LENGTH: usize = 3;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SawError {
    #[error("Chain of length {length} has no interior monomer to pivot on")]
    ChainTooShort { length: usize },

    #[error("No collision-free pivot move found after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

/// Which side of the pivot was transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailSide {
    /// Monomers before the pivot.
    Head,
    /// Monomers after the pivot.
    End,
}

/// An accepted pivot move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotMove {
    pub pivot: usize,
    pub symmetry: Symmetry,
    pub side: TailSide,
    pub attempts: usize,
}

/// The straight line of `length` monomers, randomized by `length` pivot moves.
pub fn initial_walk(
    length: usize,
    rng: &mut impl Rng,
    max_attempts: Option<usize>,
) -> Result<Vec<LatticePoint>, SawError> {
    let mut coords = straight_line(length);
    for _ in 0..length {
        pivot_mutate(&mut coords, rng, max_attempts)?;
    }
    Ok(coords)
}

/// Applies one accepted pivot move to `coords` in place.
///
/// With `max_attempts` set to `None` the rejection loop is unbounded; ergodicity of the pivot
/// algorithm guarantees eventual acceptance but not a bound on the number of tries. With a cap,
/// `coords` is left untouched and [`SawError::AttemptsExhausted`] is returned once it is hit.
pub fn pivot_mutate(
    coords: &mut [LatticePoint],
    rng: &mut impl Rng,
    max_attempts: Option<usize>,
) -> Result<PivotMove, SawError> {
    let length = coords.len();
    if length < MIN_PIVOT_LENGTH {
        return Err(SawError::ChainTooShort { length });
    }
    let midpoint = length / 2;
    let mut new_tail = Vec::with_capacity(length / 2 + 1);
    let mut attempts = 0;

    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(SawError::AttemptsExhausted { attempts });
        }
        attempts += 1;

        let pivot = rng.gen_range(1..=length - 2);
        let symmetry = Symmetry::ALL[rng.gen_range(0..Symmetry::ALL.len())];
        let origin = coords[pivot];

        let (side, tail, body) = split_at_pivot(length, pivot, midpoint);

        new_tail.clear();
        new_tail.extend(
            coords[tail.clone()]
                .iter()
                .map(|p| symmetry.apply_about(p, &origin)),
        );

        let fixed = &coords[body];
        let collides = new_tail.iter().any(|p| fixed.contains(p));

        if collides {
            trace!(pivot, ?symmetry, attempts, "Pivot move rejected.");
            continue;
        }

        coords[tail].copy_from_slice(&new_tail);
        return Ok(PivotMove {
            pivot,
            symmetry,
            side,
            attempts,
        });
    }
}

/// Repeats pivot moves until the chain differs from its starting state, giving up after
/// `max_attempts` moves. Returns whether the chain changed.
pub fn mutate_until_changed(
    coords: &mut [LatticePoint],
    rng: &mut impl Rng,
    max_attempts: usize,
) -> bool {
    let before = coords.to_vec();

    for _ in 0..max_attempts {
        if let Err(e) = pivot_mutate(coords, rng, Some(max_attempts)) {
            warn!("Could not apply a pivot move: {}", e);
            return false;
        }
        if coords != before.as_slice() {
            return true;
        }
    }

    warn!(
        "Could not find valid mutation after {} attempts.",
        max_attempts
    );
    false
}

pub fn is_self_avoiding(coords: &[LatticePoint]) -> bool {
    let mut seen = HashSet::with_capacity(coords.len());
    coords.iter().all(|p| seen.insert(*p))
}

pub fn is_connected(coords: &[LatticePoint]) -> bool {
    coords
        .windows(2)
        .all(|pair| manhattan_distance(&pair[0], &pair[1]) == 1)
}

pub fn is_valid_walk(coords: &[LatticePoint]) -> bool {
    is_self_avoiding(coords) && is_connected(coords)
}

fn split_at_pivot(
    length: usize,
    pivot: usize,
    midpoint: usize,
) -> (TailSide, Range<usize>, Range<usize>) {
    if pivot >= midpoint {
        (TailSide::End, pivot + 1..length, 0..pivot + 1)
    } else {
        (TailSide::Head, 0..pivot, pivot..length)
    }
}
