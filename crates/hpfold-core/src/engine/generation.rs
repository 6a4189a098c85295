use super::config::EvolutionConfig;
use super::error::EngineError;
use super::selection::select_parents;
use super::stats::Telemetry;
use crate::core::models::polymer::Polymer;
use crate::core::models::population::Population;
use crate::core::utils::rng::{child_seeds, create_rng};
use rand::Rng;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Advances `population` by one generation.
///
/// Selection halves the population, every parent ages by one, and each parent contributes one
/// child; the result is the parents followed by their children, so the size is unchanged.
#[instrument(skip_all, name = "advance_generation", fields(size = population.len()))]
pub fn advance_generation(
    population: Population,
    config: &EvolutionConfig,
    rng: &mut impl Rng,
    telemetry: &mut Telemetry,
) -> Result<Population, EngineError> {
    let size = population.len();
    let mut parents = select_parents(population, config, rng, telemetry)?;
    for parent in &mut parents {
        parent.increment_age();
    }

    let children = reproduce_all(&parents, rng)?;
    debug!(
        parents = parents.len(),
        children = children.len(),
        "Generated offspring."
    );

    let mut next = parents;
    next.extend(children);
    if next.len() != size {
        return Err(EngineError::Internal(format!(
            "generation size changed from {} to {}",
            size,
            next.len()
        )));
    }
    Ok(Population::from_members_unchecked(next))
}

fn reproduce_all(parents: &[Polymer], rng: &mut impl Rng) -> Result<Vec<Polymer>, EngineError> {
    let seeds = child_seeds(rng, parents.len());

    #[cfg(not(feature = "parallel"))]
    let iterator = parents.iter().zip(seeds.iter());

    #[cfg(feature = "parallel")]
    let iterator = parents.par_iter().zip(seeds.par_iter());

    let children = iterator
        .map(|(parent, &seed)| parent.reproduce(&mut create_rng(seed)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(children)
}
