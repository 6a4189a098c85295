use crate::core::energy::Neighborhood;
use crate::core::io::leaderboard::LeaderboardRecord;
use crate::core::models::folding::{FoldingModel, MutationParams};
use crate::core::models::polymer::Polymer;
use crate::core::models::population::Population;
use crate::core::models::sequence::Sequence;
use crate::core::utils::rng::{SimRng, Stream, child_seeds, create_rng, derive_rng, random_seed};
use crate::engine::config::{EvolutionConfig, validate_population_size};
use crate::engine::error::EngineError;
use crate::engine::generation::advance_generation;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stats::{EnergyStatistics, RecordTracker, Telemetry};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Where the label sequence of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SequenceSource {
    /// An explicit H/P string, which must match the run length.
    Labels(String),
    /// The random sequence associated with this seed.
    Seed(u64),
    /// The random sequence associated with the run seed itself.
    #[default]
    RunSeed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSetup {
    pub length: usize,
    pub sequence: SequenceSource,
    pub neighborhood: Neighborhood,
    pub mutation: MutationParams,
    pub evolution: EvolutionConfig,
    /// Seed of the run. A random one is drawn and logged when absent.
    pub seed: Option<u64>,
}

/// Resolves the sequence for a run of `length` monomers.
pub fn establish_sequence(
    length: usize,
    source: &SequenceSource,
    run_seed: u64,
) -> Result<Sequence, EngineError> {
    let sequence = match source {
        SequenceSource::Labels(labels) => Sequence::establish(length, labels)?,
        SequenceSource::Seed(seed) => Sequence::from_seed(length, *seed)?,
        SequenceSource::RunSeed => Sequence::from_seed(length, run_seed)?,
    };
    Ok(sequence)
}

/// Builds `size` random polymers for `model`.
pub fn populate(
    model: &Arc<FoldingModel>,
    size: usize,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
) -> Result<Population, EngineError> {
    validate_population_size(size)?;
    reporter.report(Progress::TaskStart {
        total_steps: size as u64,
    });
    let seeds = child_seeds(rng, size);

    #[cfg(not(feature = "parallel"))]
    let iterator = seeds.iter();

    #[cfg(feature = "parallel")]
    let iterator = seeds.par_iter();

    let members = iterator
        .map(|&seed| {
            let polymer = Polymer::random(Arc::clone(model), &mut create_rng(seed));
            reporter.report(Progress::TaskIncrement);
            polymer
        })
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::TaskFinish);
    Ok(Population::new(members)?)
}

/// Builds an initial population with default folding parameters.
pub fn generate_population(
    size: usize,
    length: usize,
    source: &SequenceSource,
    rng: &mut impl Rng,
) -> Result<(Population, Sequence), EngineError> {
    validate_population_size(size)?;
    let run_seed = match source {
        SequenceSource::RunSeed => rng.r#gen(),
        _ => 0,
    };
    let sequence = establish_sequence(length, source, run_seed)?;
    let model = FoldingModel::new(sequence.clone()).into_shared();
    let population = populate(&model, size, rng, &ProgressReporter::new())?;
    Ok((population, sequence))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generations_run: usize,
    pub cancelled: bool,
    pub best_score: u32,
}

/// A seeded evolutionary run and everything it has recorded.
#[derive(Debug)]
pub struct Simulation {
    seed: u64,
    config: EvolutionConfig,
    model: Arc<FoldingModel>,
    population: Population,
    generation: usize,
    rng: SimRng,
    telemetry: Telemetry,
    records: RecordTracker,
}

impl Simulation {
    #[instrument(skip_all, name = "simulation_start")]
    pub fn start(setup: SimulationSetup, reporter: &ProgressReporter) -> Result<Self, EngineError> {
        let seed = match setup.seed {
            Some(seed) => seed,
            None => {
                let seed = random_seed();
                info!(seed, "No seed supplied; drew a random one.");
                seed
            }
        };

        reporter.report(Progress::PhaseStart {
            name: "Initial Population",
        });
        let sequence = establish_sequence(setup.length, &setup.sequence, seed)?;
        let model = FoldingModel::new(sequence)
            .with_neighborhood(setup.neighborhood)
            .with_mutation(setup.mutation)?
            .into_shared();

        let mut rng = derive_rng(seed, Stream::Evolution);
        let population = populate(&model, setup.evolution.population_size, &mut rng, reporter)?;
        reporter.report(Progress::PhaseFinish);

        let mut telemetry = Telemetry::new();
        telemetry.record_generation(&population);
        let mut records = RecordTracker::new();
        records.observe(&population, 0);

        info!(
            seed,
            sequence = %model.sequence(),
            population = population.len(),
            tournament = setup.evolution.tournament_size,
            "Simulation started."
        );

        Ok(Self {
            seed,
            config: setup.evolution,
            model,
            population,
            generation: 0,
            rng,
            telemetry,
            records,
        })
    }

    /// Advances one generation. A failed step leaves the population, telemetry and random
    /// state unchanged.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let mut rng = self.rng.clone();
        let mut gathered = Telemetry::new();
        let next = advance_generation(
            self.population.clone(),
            &self.config,
            &mut rng,
            &mut gathered,
        )?;
        self.rng = rng;
        self.telemetry.absorb(gathered);
        self.population = next;
        self.generation += 1;
        self.telemetry.record_generation(&self.population);
        if self.records.observe(&self.population, self.generation) {
            info!(
                generation = self.generation,
                score = self.records.best_score(),
                "New best score."
            );
        }
        Ok(())
    }

    /// Runs up to `generations` steps, checking `cancel` between generations.
    #[instrument(skip_all, name = "simulation_run", fields(generations = generations))]
    pub fn run(
        &mut self,
        generations: usize,
        cancel: &AtomicBool,
        reporter: &ProgressReporter,
    ) -> Result<RunSummary, EngineError> {
        reporter.report(Progress::PhaseStart { name: "Evolution" });
        reporter.report(Progress::TaskStart {
            total_steps: generations as u64,
        });

        let mut generations_run = 0;
        let mut cancelled = false;
        for _ in 0..generations {
            if cancel.load(Ordering::Relaxed) {
                warn!(
                    completed = generations_run,
                    requested = generations,
                    "Run cancelled between generations."
                );
                cancelled = true;
                break;
            }
            self.step()?;
            generations_run += 1;
            reporter.report(Progress::GenerationComplete {
                generation: self.generation,
                best_energy: self.best().map_or(0, Polymer::energy),
            });
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        info!(
            generations_run,
            generation = self.generation,
            best_score = self.records.best_score(),
            "Bulk run finished."
        );
        Ok(RunSummary {
            generations_run,
            cancelled,
            best_score: self.records.best_score(),
        })
    }

    /// The leaderboard entry for the best fold seen so far, if any fold has scored.
    pub fn leaderboard_record(
        &self,
        player_name: &str,
        date: &str,
    ) -> Result<Option<LeaderboardRecord>, EngineError> {
        let Some(best) = self.records.best() else {
            return Ok(None);
        };
        let record = LeaderboardRecord::new(
            player_name,
            best.score,
            best.generation,
            self.config.population_size,
            &best.coords,
            date,
        )?;
        Ok(Some(record))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn generation(&self) -> usize {
        self.generation
    }
    pub fn population(&self) -> &Population {
        &self.population
    }
    pub fn model(&self) -> &Arc<FoldingModel> {
        &self.model
    }
    pub fn sequence(&self) -> &Sequence {
        self.model.sequence()
    }
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }
    pub fn records(&self) -> &RecordTracker {
        &self.records
    }

    pub fn best(&self) -> Option<&Polymer> {
        self.population.best()
    }

    pub fn worst(&self) -> Option<&Polymer> {
        self.population.worst()
    }

    pub fn energy_statistics(&self) -> Option<EnergyStatistics> {
        EnergyStatistics::of_population(&self.population)
    }
}
