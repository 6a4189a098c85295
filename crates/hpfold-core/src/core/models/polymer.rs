use super::error::ModelError;
use super::folding::FoldingModel;
use crate::core::lattice::{LatticePoint, normalize_translation};
use crate::core::saw::{self, SawError};
use rand::Rng;
use std::sync::Arc;

/// One conformation of the run's chain.
///
/// The energy is recomputed every time the coordinates change, so it is never stale.
#[derive(Debug, Clone)]
pub struct Polymer {
    model: Arc<FoldingModel>,
    coords: Vec<LatticePoint>,
    energy: u32,
    age: u32,
    mega_mode: bool,
}

impl Polymer {
    /// A fresh random self-avoiding conformation.
    pub fn random(model: Arc<FoldingModel>, rng: &mut impl Rng) -> Result<Self, SawError> {
        let coords = saw::initial_walk(
            model.length(),
            rng,
            model.mutation().max_pivot_attempts,
        )?;
        Ok(Self::from_valid_coords(model, coords))
    }

    /// A polymer with the given conformation, checked for length, self-avoidance and connectivity.
    pub fn from_coords(
        model: Arc<FoldingModel>,
        coords: Vec<LatticePoint>,
    ) -> Result<Self, ModelError> {
        if coords.len() != model.length() {
            return Err(ModelError::LengthMismatch {
                expected: model.length(),
                found: coords.len(),
            });
        }
        if !saw::is_self_avoiding(&coords) {
            return Err(ModelError::InvalidConformation(
                "two monomers occupy the same lattice site".to_string(),
            ));
        }
        if !saw::is_connected(&coords) {
            return Err(ModelError::InvalidConformation(
                "consecutive monomers are not lattice neighbors".to_string(),
            ));
        }
        Ok(Self::from_valid_coords(model, coords))
    }

    pub(crate) fn from_valid_coords(model: Arc<FoldingModel>, coords: Vec<LatticePoint>) -> Self {
        debug_assert!(saw::is_valid_walk(&coords));
        let energy = model.energy_of(&coords);
        Self {
            model,
            coords,
            energy,
            age: 0,
            mega_mode: false,
        }
    }

    pub fn coords(&self) -> &[LatticePoint] {
        &self.coords
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn mega_mode(&self) -> bool {
        self.mega_mode
    }

    pub fn model(&self) -> &Arc<FoldingModel> {
        &self.model
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Applies one pivot move, or a mega mutation when in mega mode and the dice allow it.
    ///
    /// On error the conformation and its energy are left as they were.
    pub fn mutate(&mut self, rng: &mut impl Rng) -> Result<(), SawError> {
        let params = self.model.mutation();
        let moves = if self.mega_mode && rng.gen_bool(params.mega_rate) {
            params.mega_count
        } else {
            1
        };
        if moves == 1 {
            saw::pivot_mutate(&mut self.coords, rng, params.max_pivot_attempts)?;
        } else {
            let mut scratch = self.coords.clone();
            for _ in 0..moves {
                saw::pivot_mutate(&mut scratch, rng, params.max_pivot_attempts)?;
            }
            self.coords = scratch;
        }
        self.energy = self.model.energy_of(&self.coords);
        Ok(())
    }

    /// A mutated copy of this polymer with age zero. Offspring of old parents are born in mega mode.
    pub fn reproduce(&self, rng: &mut impl Rng) -> Result<Polymer, SawError> {
        let mut child = Polymer {
            model: Arc::clone(&self.model),
            coords: self.coords.clone(),
            energy: self.energy,
            age: 0,
            mega_mode: self.age >= self.model.mutation().mega_age_threshold,
        };
        child.mutate(rng)?;
        Ok(child)
    }

    pub(crate) fn increment_age(&mut self) {
        self.age += 1;
    }

    #[cfg(test)]
    pub(crate) fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    #[cfg(test)]
    pub(crate) fn set_mega_mode(&mut self, mega_mode: bool) {
        self.mega_mode = mega_mode;
    }

    /// The conformation with its first monomer moved to the origin.
    pub fn shape_key(&self) -> Vec<(i32, i32)> {
        normalize_translation(&self.coords)
    }

    /// Coordinates as `[x, y]` pairs.
    pub fn coord_pairs(&self) -> Vec<[i32; 2]> {
        self.coords.iter().map(|p| [p.x, p.y]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::folding::MutationParams;
    use crate::core::saw::is_valid_walk;
    use crate::core::utils::rng::create_rng;

    fn model(seq: &str) -> Arc<FoldingModel> {
        FoldingModel::new(seq.parse().unwrap()).into_shared()
    }

    #[test]
    fn random_polymer_starts_young_and_valid() {
        let mut rng = create_rng(1);
        let polymer = Polymer::random(model("HPHPPHHPHH"), &mut rng).unwrap();
        assert_eq!(polymer.len(), 10);
        assert_eq!(polymer.age(), 0);
        assert!(!polymer.mega_mode());
        assert!(is_valid_walk(polymer.coords()));
        assert_eq!(polymer.energy(), polymer.model().energy_of(polymer.coords()));
    }

    #[test]
    fn from_coords_validates_the_conformation() {
        let m = model("HHHH");
        let square = vec![
            LatticePoint::new(0, 0),
            LatticePoint::new(0, 1),
            LatticePoint::new(1, 1),
            LatticePoint::new(1, 0),
        ];
        let polymer = Polymer::from_coords(Arc::clone(&m), square).unwrap();
        assert_eq!(polymer.energy(), 1);

        let short = vec![LatticePoint::new(0, 0), LatticePoint::new(0, 1)];
        assert!(matches!(
            Polymer::from_coords(Arc::clone(&m), short),
            Err(ModelError::LengthMismatch { expected: 4, found: 2 })
        ));

        let gap = vec![
            LatticePoint::new(0, 0),
            LatticePoint::new(0, 1),
            LatticePoint::new(0, 3),
            LatticePoint::new(0, 4),
        ];
        assert!(matches!(
            Polymer::from_coords(Arc::clone(&m), gap),
            Err(ModelError::InvalidConformation(_))
        ));

        let overlap = vec![
            LatticePoint::new(0, 0),
            LatticePoint::new(0, 1),
            LatticePoint::new(0, 0),
            LatticePoint::new(0, 1),
        ];
        assert!(matches!(
            Polymer::from_coords(m, overlap),
            Err(ModelError::InvalidConformation(_))
        ));
    }

    #[test]
    fn mutate_keeps_energy_in_sync() {
        let mut rng = create_rng(2);
        let mut polymer = Polymer::random(model("HHPHHPHHPHHPHH"), &mut rng).unwrap();
        for _ in 0..100 {
            polymer.mutate(&mut rng).unwrap();
            assert!(is_valid_walk(polymer.coords()));
            assert_eq!(polymer.energy(), polymer.model().energy_of(polymer.coords()));
        }
    }

    #[test]
    fn reproduce_leaves_parent_untouched_and_resets_age() {
        let mut rng = create_rng(3);
        let mut parent = Polymer::random(model("HPHPHPHPHPHP"), &mut rng).unwrap();
        parent.set_age(4);
        let before = parent.coords().to_vec();

        let child = parent.reproduce(&mut rng).unwrap();

        assert_eq!(parent.coords(), before.as_slice());
        assert_eq!(parent.age(), 4);
        assert_eq!(child.age(), 0);
        assert!(!child.mega_mode());
        assert!(is_valid_walk(child.coords()));
    }

    #[test]
    fn offspring_of_old_parents_are_born_in_mega_mode() {
        let mut rng = create_rng(4);
        let mut parent = Polymer::random(model("HPHPHPHPHPHP"), &mut rng).unwrap();
        parent.set_age(10);
        let child = parent.reproduce(&mut rng).unwrap();
        assert!(child.mega_mode());
        assert_eq!(child.age(), 0);
    }

    #[test]
    fn certain_mega_mutation_still_yields_valid_walk() {
        let params = MutationParams {
            mega_rate: 1.0,
            ..Default::default()
        };
        let m = FoldingModel::new("HPPHHPHPPHHPHH".parse().unwrap())
            .with_mutation(params)
            .unwrap()
            .into_shared();
        let mut rng = create_rng(6);
        let mut parent = Polymer::random(m, &mut rng).unwrap();
        parent.set_age(50);
        let child = parent.reproduce(&mut rng).unwrap();
        assert!(child.mega_mode());
        assert!(is_valid_walk(child.coords()));
    }

    #[test]
    fn failed_mega_mutation_leaves_conformation_and_energy_intact() {
        let params = MutationParams {
            mega_rate: 1.0,
            max_pivot_attempts: Some(1),
            ..Default::default()
        };
        let m = FoldingModel::new("HHHHHHHHHHHHHHHHHHHH".parse().unwrap())
            .with_mutation(params)
            .unwrap()
            .into_shared();

        let mut failures = 0;
        for seed in 0..200 {
            let mut rng = create_rng(seed);
            let coords = saw::initial_walk(20, &mut rng, None).unwrap();
            let mut polymer = Polymer::from_coords(Arc::clone(&m), coords).unwrap();
            polymer.set_mega_mode(true);
            let before = polymer.coords().to_vec();
            let energy_before = polymer.energy();

            if polymer.mutate(&mut rng).is_err() {
                failures += 1;
                assert_eq!(polymer.coords(), before.as_slice());
                assert_eq!(polymer.energy(), energy_before);
            }
            assert_eq!(polymer.energy(), polymer.model().energy_of(polymer.coords()));
        }
        assert!(failures > 0);
    }

    #[test]
    fn shape_key_ignores_translation() {
        let m = model("HPPH");
        let a = Polymer::from_coords(
            Arc::clone(&m),
            vec![
                LatticePoint::new(0, 0),
                LatticePoint::new(1, 0),
                LatticePoint::new(1, 1),
                LatticePoint::new(2, 1),
            ],
        )
        .unwrap();
        let b = Polymer::from_coords(
            m,
            vec![
                LatticePoint::new(5, 5),
                LatticePoint::new(6, 5),
                LatticePoint::new(6, 6),
                LatticePoint::new(7, 6),
            ],
        )
        .unwrap();
        assert_eq!(a.shape_key(), b.shape_key());
        assert_eq!(a.coord_pairs()[3], [2, 1]);
    }
}
