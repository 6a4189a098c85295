//! Contact energy of a conformation.
//!
//! The score counts unordered pairs of H monomers that touch on the lattice without being
//! consecutive along the backbone. Higher is more stable.

use crate::core::lattice::{LatticePoint, chebyshev_distance, manhattan_distance};
use crate::core::models::sequence::Sequence;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EnergyError {
    #[error("Invalid neighbor type: '{0}'. Please choose 'vn' or 'moore'")]
    UnknownNeighborhood(String),
}

/// Which lattice sites count as touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Neighborhood {
    /// The four axis-aligned neighbors.
    #[default]
    VonNeumann,
    /// All eight surrounding sites, diagonals included.
    Moore,
}

impl Neighborhood {
    #[inline]
    pub fn touches(&self, a: &LatticePoint, b: &LatticePoint) -> bool {
        match self {
            Neighborhood::VonNeumann => manhattan_distance(a, b) == 1,
            Neighborhood::Moore => chebyshev_distance(a, b) == 1,
        }
    }
}

impl FromStr for Neighborhood {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vn" | "von-neumann" | "von_neumann" | "vonneumann" => Ok(Neighborhood::VonNeumann),
            "moore" => Ok(Neighborhood::Moore),
            _ => Err(EnergyError::UnknownNeighborhood(s.to_string())),
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Neighborhood::VonNeumann => "vn",
                Neighborhood::Moore => "moore",
            }
        )
    }
}

pub fn calculate_energy(
    coords: &[LatticePoint],
    sequence: &Sequence,
    neighborhood: Neighborhood,
) -> u32 {
    let hydrophobic: Vec<(usize, &LatticePoint)> = coords
        .iter()
        .zip(sequence.labels())
        .enumerate()
        .filter(|(_, (_, label))| label.is_hydrophobic())
        .map(|(i, (point, _))| (i, point))
        .collect();

    hydrophobic
        .iter()
        .tuple_combinations()
        .filter(|((i, a), (j, b))| j - i > 1 && neighborhood.touches(a, b))
        .count() as u32
}
