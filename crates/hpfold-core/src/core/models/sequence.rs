use super::error::ModelError;
use crate::core::utils::rng::{Stream, derive_rng};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Hydrophobic, // H
    Polar,       // P
}

impl Label {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'H' => Some(Label::Hydrophobic),
            'P' => Some(Label::Polar),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Label::Hydrophobic => 'H',
            Label::Polar => 'P',
        }
    }

    #[inline]
    pub fn is_hydrophobic(self) -> bool {
        self == Label::Hydrophobic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Composition {
    pub hydrophobic: usize,
    pub polar: usize,
}

impl Composition {
    /// H/P ratio, or `None` for an all-H sequence.
    pub fn ratio(&self) -> Option<f64> {
        if self.polar == 0 {
            None
        } else {
            Some(self.hydrophobic as f64 / self.polar as f64)
        }
    }
}

/// The label sequence of a run. Its length never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    labels: Vec<Label>,
}

impl Sequence {
    pub const MIN_LENGTH: usize = 3;

    pub fn new(labels: Vec<Label>) -> Result<Self, ModelError> {
        if labels.len() < Self::MIN_LENGTH {
            return Err(ModelError::ChainTooShort {
                length: labels.len(),
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self { labels })
    }

    /// Builds the sequence of a run from its declared length and label string.
    pub fn establish(length: usize, labels: &str) -> Result<Self, ModelError> {
        let sequence: Sequence = labels.parse()?;
        if sequence.len() != length {
            return Err(ModelError::LengthMismatch {
                expected: length,
                found: sequence.len(),
            });
        }
        Ok(sequence)
    }

    pub fn random(length: usize, rng: &mut impl Rng) -> Result<Self, ModelError> {
        let labels = (0..length)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    Label::Hydrophobic
                } else {
                    Label::Polar
                }
            })
            .collect();
        Self::new(labels)
    }

    /// The random sequence deterministically associated with `seed`.
    pub fn from_seed(length: usize, seed: u64) -> Result<Self, ModelError> {
        Self::random(length, &mut derive_rng(seed, Stream::Sequence))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn hydrophobic_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_hydrophobic())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn composition(&self) -> Composition {
        let hydrophobic = self.labels.iter().filter(|l| l.is_hydrophobic()).count();
        Composition {
            hydrophobic,
            polar: self.labels.len() - hydrophobic,
        }
    }
}

impl FromStr for Sequence {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let labels = s
            .trim()
            .chars()
            .map(|c| Label::from_char(c).ok_or(ModelError::InvalidLabel(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(labels)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            write!(f, "{}", label.to_char())?;
        }
        Ok(())
    }
}
