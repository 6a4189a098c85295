use super::error::ModelError;
use super::polymer::Polymer;

/// An even-sized, non-empty collection of polymers sharing one folding model.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Polymer>,
}

impl Population {
    pub fn new(members: Vec<Polymer>) -> Result<Self, ModelError> {
        if members.is_empty() || members.len() % 2 != 0 {
            return Err(ModelError::InvalidPopulationSize(members.len()));
        }
        Ok(Self { members })
    }

    pub(crate) fn from_members_unchecked(members: Vec<Polymer>) -> Self {
        Self { members }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polymer> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Polymer] {
        &self.members
    }

    pub fn into_inner(self) -> Vec<Polymer> {
        self.members
    }

    pub fn energies(&self) -> Vec<u32> {
        self.members.iter().map(Polymer::energy).collect()
    }

    /// The polymer with the highest energy; the first one encountered wins ties.
    pub fn best(&self) -> Option<&Polymer> {
        self.members.iter().fold(None, |best: Option<&Polymer>, p| match best {
            Some(b) if b.energy() >= p.energy() => Some(b),
            _ => Some(p),
        })
    }

    /// The polymer with the lowest energy; the first one encountered wins ties.
    pub fn worst(&self) -> Option<&Polymer> {
        self.members.iter().fold(None, |worst: Option<&Polymer>, p| match worst {
            Some(w) if w.energy() <= p.energy() => Some(w),
            _ => Some(p),
        })
    }

    pub fn mean_energy(&self) -> f64 {
        mean_energy(&self.members)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Polymer;
    type IntoIter = std::slice::Iter<'a, Polymer>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

pub(crate) fn mean_energy(polymers: &[Polymer]) -> f64 {
    if polymers.is_empty() {
        return 0.0;
    }
    let total: u64 = polymers.iter().map(|p| u64::from(p.energy())).sum();
    total as f64 / polymers.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::LatticePoint;
    use crate::core::models::folding::FoldingModel;
    use std::sync::Arc;

    fn square(model: &Arc<FoldingModel>, offset: i32) -> Polymer {
        Polymer::from_coords(
            Arc::clone(model),
            vec![
                LatticePoint::new(offset, 0),
                LatticePoint::new(offset, 1),
                LatticePoint::new(offset + 1, 1),
                LatticePoint::new(offset + 1, 0),
            ],
        )
        .unwrap()
    }

    fn line(model: &Arc<FoldingModel>, offset: i32) -> Polymer {
        Polymer::from_coords(
            Arc::clone(model),
            (0..4).map(|y| LatticePoint::new(offset, y)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_odd_and_empty_populations() {
        let model = FoldingModel::new("HHHH".parse().unwrap()).into_shared();
        assert_eq!(
            Population::new(vec![]).unwrap_err(),
            ModelError::InvalidPopulationSize(0)
        );
        assert_eq!(
            Population::new(vec![line(&model, 0)]).unwrap_err(),
            ModelError::InvalidPopulationSize(1)
        );
        assert!(Population::new(vec![line(&model, 0), square(&model, 0)]).is_ok());
    }

    #[test]
    fn best_and_worst_prefer_first_on_ties() {
        let model = FoldingModel::new("HHHH".parse().unwrap()).into_shared();
        let population = Population::new(vec![
            line(&model, 0),
            square(&model, 10),
            square(&model, 20),
            line(&model, 30),
        ])
        .unwrap();

        assert_eq!(population.best().unwrap().coords()[0].x, 10);
        assert_eq!(population.worst().unwrap().coords()[0].x, 0);
        assert_eq!(population.energies(), vec![0, 1, 1, 0]);
        assert_eq!(population.mean_energy(), 0.5);
    }
}
