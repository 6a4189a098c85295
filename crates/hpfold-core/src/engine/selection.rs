use super::config::{EvolutionConfig, SurvivorshipParams, validate_tournament_size};
use super::error::EngineError;
use super::stats::{DeathLog, Telemetry};
use crate::core::models::folding::FoldingModel;
use crate::core::models::polymer::Polymer;
use crate::core::models::population::{Population, mean_energy};
use crate::core::saw::SawError;
use crate::core::utils::rng::{child_seeds, create_rng};
use rand::Rng;
use rand::seq::index;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Keeps the first polymer of every distinct shape, where shapes equal up to translation collide.
pub fn remove_clones(polymers: Vec<Polymer>) -> Vec<Polymer> {
    let mut seen = HashSet::with_capacity(polymers.len());
    polymers
        .into_iter()
        .filter(|polymer| seen.insert(polymer.shape_key()))
        .collect()
}

/// Kills each polymer with its age-dependent probability and logs the ages of the dead.
pub fn remove_elderly(
    polymers: Vec<Polymer>,
    params: &SurvivorshipParams,
    rng: &mut impl Rng,
    deaths: &mut DeathLog,
) -> Vec<Polymer> {
    let mut alive = Vec::with_capacity(polymers.len());
    for polymer in polymers {
        let roll: f64 = rng.r#gen();
        if roll < params.death_probability(polymer.age()) {
            deaths.record(polymer.age());
        } else {
            alive.push(polymer);
        }
    }
    alive
}

/// Tops the pool up with fresh random polymers until it holds `target` members.
pub fn immigrate(
    pool: &mut Vec<Polymer>,
    target: usize,
    model: &Arc<FoldingModel>,
    rng: &mut impl Rng,
) -> Result<(), SawError> {
    let missing = target.saturating_sub(pool.len());
    if missing == 0 {
        return Ok(());
    }
    let seeds = child_seeds(rng, missing);

    #[cfg(not(feature = "parallel"))]
    let iterator = seeds.iter();

    #[cfg(feature = "parallel")]
    let iterator = seeds.par_iter();

    let immigrants = iterator
        .map(|&seed| Polymer::random(Arc::clone(model), &mut create_rng(seed)))
        .collect::<Result<Vec<_>, _>>()?;
    pool.extend(immigrants);
    Ok(())
}

/// Runs `winners` tournaments without replacement over `pool`.
///
/// Each tournament draws `tournament_size` distinct members; the first one with the highest
/// energy wins and is swap-removed from the pool. Members left over are logged as fitness deaths.
pub fn tournament_select(
    mut pool: Vec<Polymer>,
    winners: usize,
    tournament_size: usize,
    rng: &mut impl Rng,
    deaths: &mut DeathLog,
) -> Result<Vec<Polymer>, EngineError> {
    let mut parents = Vec::with_capacity(winners);
    for _ in 0..winners {
        if pool.len() < tournament_size {
            return Err(EngineError::Internal(format!(
                "selection pool of {} cannot serve a tournament of {}",
                pool.len(),
                tournament_size
            )));
        }
        let mut best: Option<usize> = None;
        for candidate in index::sample(rng, pool.len(), tournament_size).iter() {
            match best {
                Some(b) if pool[b].energy() >= pool[candidate].energy() => {}
                _ => best = Some(candidate),
            }
        }
        let winner = best.ok_or_else(|| EngineError::Internal("empty tournament".to_string()))?;
        parents.push(pool.swap_remove(winner));
    }
    deaths.record_all(&pool);
    Ok(parents)
}

/// Produces half of `population` as parents of the next generation.
///
/// Clones are pruned, the elderly culled, the pool refilled with immigrants, and the parents
/// drawn by tournament. The selection differential is appended to `telemetry`.
#[instrument(skip_all, name = "select_parents")]
pub fn select_parents(
    population: Population,
    config: &EvolutionConfig,
    rng: &mut impl Rng,
    telemetry: &mut Telemetry,
) -> Result<Vec<Polymer>, EngineError> {
    let original_size = population.len();
    validate_tournament_size(original_size, config.tournament_size)?;
    let original_mean = population.mean_energy();
    let model = population
        .iter()
        .next()
        .map(|p| Arc::clone(p.model()))
        .ok_or_else(|| EngineError::Internal("cannot select from an empty population".to_string()))?;

    let unique = remove_clones(population.into_inner());
    let clones = original_size - unique.len();
    let mut pool = remove_elderly(
        unique,
        &config.survivorship,
        rng,
        &mut telemetry.age_deaths,
    );
    let elderly = original_size - clones - pool.len();
    immigrate(&mut pool, original_size, &model, rng)?;
    debug!(clones, elderly, "Pruned population and refilled with immigrants.");

    let parents = tournament_select(
        pool,
        original_size / 2,
        config.tournament_size,
        rng,
        &mut telemetry.fitness_deaths,
    )?;

    let differential = mean_energy(&parents) - original_mean;
    telemetry.selection_differentials.push(differential);
    Ok(parents)
}
