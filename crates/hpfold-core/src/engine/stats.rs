use crate::core::io::history::EnergyHistoryRow;
use crate::core::lattice::LatticePoint;
use crate::core::models::polymer::Polymer;
use crate::core::models::population::Population;
use std::collections::BTreeMap;

/// Five-number summary of one generation's energies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyStatistics {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl EnergyStatistics {
    /// Quartiles use linear interpolation between closest ranks; `None` for an empty input.
    pub fn from_energies(energies: &[u32]) -> Option<Self> {
        if energies.is_empty() {
            return None;
        }
        let mut sorted = energies.to_vec();
        sorted.sort_unstable();
        Some(Self {
            min: f64::from(sorted[0]),
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: f64::from(sorted[sorted.len() - 1]),
        })
    }

    pub fn of_population(population: &Population) -> Option<Self> {
        Self::from_energies(&population.energies())
    }

    pub fn to_row(&self, generation: usize) -> EnergyHistoryRow {
        EnergyHistoryRow {
            generation,
            min: self.min,
            q1: self.q1,
            median: self.median,
            q3: self.q3,
            max: self.max,
        }
    }
}

fn percentile(sorted: &[u32], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low = f64::from(sorted[lower]);
    let high = f64::from(sorted[upper]);
    low + (high - low) * (rank - lower as f64)
}

/// Histogram of deaths keyed by age. Counts only ever accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathLog {
    counts: BTreeMap<u32, u64>,
}

impl DeathLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, age: u32) {
        *self.counts.entry(age).or_insert(0) += 1;
    }

    pub fn record_all<'a>(&mut self, polymers: impl IntoIterator<Item = &'a Polymer>) {
        for polymer in polymers {
            self.record(polymer.age());
        }
    }

    /// Adds every count of `other` into this log.
    pub fn merge(&mut self, other: &DeathLog) {
        for (age, count) in other.iter() {
            *self.counts.entry(age).or_insert(0) += count;
        }
    }

    pub fn count_at(&self, age: u32) -> u64 {
        self.counts.get(&age).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(age, count)` pairs in ascending age order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(&age, &count)| (age, count))
    }
}

/// Everything a run records across generations.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    pub age_deaths: DeathLog,
    pub fitness_deaths: DeathLog,
    pub selection_differentials: Vec<f64>,
    pub energy_history: Vec<EnergyStatistics>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_generation(&mut self, population: &Population) {
        if let Some(stats) = EnergyStatistics::of_population(population) {
            self.energy_history.push(stats);
        }
    }

    /// Appends the deaths, differentials and history gathered in `other`.
    pub fn absorb(&mut self, other: Telemetry) {
        self.age_deaths.merge(&other.age_deaths);
        self.fitness_deaths.merge(&other.fitness_deaths);
        self.selection_differentials.extend(other.selection_differentials);
        self.energy_history.extend(other.energy_history);
    }

    pub fn history_rows(&self) -> Vec<EnergyHistoryRow> {
        self.energy_history
            .iter()
            .enumerate()
            .map(|(generation, stats)| stats.to_row(generation))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestRecord {
    pub score: u32,
    pub generation: usize,
    pub coords: Vec<LatticePoint>,
}

/// Remembers the earliest generation at which the highest score appeared.
#[derive(Debug, Clone, Default)]
pub struct RecordTracker {
    best: Option<BestRecord>,
}

impl RecordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the population best strictly beats every score seen so far.
    pub fn observe(&mut self, population: &Population, generation: usize) -> bool {
        let Some(candidate) = population.best() else {
            return false;
        };
        if candidate.energy() <= self.best_score() {
            return false;
        }
        self.best = Some(BestRecord {
            score: candidate.energy(),
            generation,
            coords: candidate.coords().to_vec(),
        });
        true
    }

    pub fn best_score(&self) -> u32 {
        self.best.as_ref().map_or(0, |record| record.score)
    }

    pub fn best(&self) -> Option<&BestRecord> {
        self.best.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::folding::FoldingModel;
    use std::sync::Arc;

    #[test]
    fn quartiles_interpolate_linearly() {
        let stats = EnergyStatistics::from_energies(&[1, 2, 3, 4]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn odd_counts_take_the_middle_value() {
        let stats = EnergyStatistics::from_energies(&[5, 1, 3]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
    }

    #[test]
    fn single_value_collapses_the_summary() {
        let stats = EnergyStatistics::from_energies(&[7]).unwrap();
        assert_eq!(
            stats,
            EnergyStatistics { min: 7.0, q1: 7.0, median: 7.0, q3: 7.0, max: 7.0 }
        );
        assert!(EnergyStatistics::from_energies(&[]).is_none());
    }

    #[test]
    fn death_log_accumulates_counts() {
        let mut log = DeathLog::new();
        log.record(3);
        log.record(0);
        log.record(3);
        assert_eq!(log.count_at(3), 2);
        assert_eq!(log.count_at(1), 0);
        assert_eq!(log.total(), 3);
        assert_eq!(log.iter().collect::<Vec<_>>(), vec![(0, 1), (3, 2)]);
    }

    fn population_with_energies(model: &Arc<FoldingModel>, squares: &[bool]) -> Population {
        let members = squares
            .iter()
            .enumerate()
            .map(|(i, &square)| {
                let x = 10 * i as i32;
                let coords = if square {
                    vec![
                        LatticePoint::new(x, 0),
                        LatticePoint::new(x, 1),
                        LatticePoint::new(x + 1, 1),
                        LatticePoint::new(x + 1, 0),
                    ]
                } else {
                    (0..4).map(|y| LatticePoint::new(x, y)).collect()
                };
                Polymer::from_coords(Arc::clone(model), coords).unwrap()
            })
            .collect();
        Population::new(members).unwrap()
    }

    #[test]
    fn record_tracker_keeps_earliest_strict_improvement() {
        let model = FoldingModel::new("HHHH".parse().unwrap()).into_shared();
        let mut tracker = RecordTracker::new();

        let flat = population_with_energies(&model, &[false, false]);
        assert!(!tracker.observe(&flat, 0));
        assert!(tracker.best().is_none());

        let folded = population_with_energies(&model, &[false, true]);
        assert!(tracker.observe(&folded, 1));
        assert!(!tracker.observe(&folded, 2));

        let record = tracker.best().unwrap();
        assert_eq!(record.score, 1);
        assert_eq!(record.generation, 1);
        assert_eq!(record.coords[0], LatticePoint::new(10, 0));
    }

    #[test]
    fn telemetry_history_rows_are_numbered_by_generation() {
        let model = FoldingModel::new("HHHH".parse().unwrap()).into_shared();
        let mut telemetry = Telemetry::new();
        telemetry.record_generation(&population_with_energies(&model, &[false, true]));
        telemetry.record_generation(&population_with_energies(&model, &[true, true]));
        let rows = telemetry.history_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].generation, 1);
        assert_eq!(rows[0].median, 0.5);
        assert_eq!(rows[1].min, 1.0);
    }
}
