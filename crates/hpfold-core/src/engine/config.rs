use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Population size {0} must be a positive even integer")]
    InvalidPopulationSize(usize),

    #[error("Tournament size must be at least 1")]
    EmptyTournament,

    #[error(
        "Tournament size {tournament_size} is too large for a population of {population_size}; \
         at most {max} is allowed"
    )]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
        max: usize,
    },

    #[error("Invalid value for '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Age-dependent death risk: `base_risk * exp(aging_rate * age)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivorshipParams {
    pub base_risk: f64,
    pub aging_rate: f64,
}

impl Default for SurvivorshipParams {
    fn default() -> Self {
        Self {
            base_risk: 0.005,
            aging_rate: 0.04,
        }
    }
}

impl SurvivorshipParams {
    #[inline]
    pub fn death_probability(&self, age: u32) -> f64 {
        self.base_risk * (self.aging_rate * f64::from(age)).exp()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.base_risk) {
            return Err(ConfigError::InvalidParameter {
                name: "base_risk",
                value: self.base_risk,
            });
        }
        if !self.aging_rate.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "aging_rate",
                value: self.aging_rate,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub tournament_size: usize,
    pub survivorship: SurvivorshipParams,
}

/// Largest tournament the selection pool can always serve for `population_size`.
///
/// The pool shrinks by one per winner, so the last of the `population_size / 2` draws sees
/// `population_size / 2 + 1` candidates.
#[inline]
pub fn max_tournament_size(population_size: usize) -> usize {
    population_size / 2 + 1
}

pub fn validate_population_size(population_size: usize) -> Result<(), ConfigError> {
    if population_size == 0 || population_size % 2 != 0 {
        return Err(ConfigError::InvalidPopulationSize(population_size));
    }
    Ok(())
}

pub fn validate_tournament_size(
    population_size: usize,
    tournament_size: usize,
) -> Result<(), ConfigError> {
    if tournament_size == 0 {
        return Err(ConfigError::EmptyTournament);
    }
    let max = max_tournament_size(population_size);
    if tournament_size > max {
        return Err(ConfigError::TournamentTooLarge {
            tournament_size,
            population_size,
            max,
        });
    }
    Ok(())
}

#[derive(Default)]
pub struct EvolutionConfigBuilder {
    population_size: Option<usize>,
    tournament_size: Option<usize>,
    base_risk: Option<f64>,
    aging_rate: Option<f64>,
}

impl EvolutionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }
    pub fn tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = Some(size);
        self
    }
    pub fn base_risk(mut self, risk: f64) -> Self {
        self.base_risk = Some(risk);
        self
    }
    pub fn aging_rate(mut self, rate: f64) -> Self {
        self.aging_rate = Some(rate);
        self
    }

    pub fn build(self) -> Result<EvolutionConfig, ConfigError> {
        let defaults = SurvivorshipParams::default();
        let population_size = self
            .population_size
            .ok_or(ConfigError::MissingParameter("population_size"))?;
        let tournament_size = self
            .tournament_size
            .ok_or(ConfigError::MissingParameter("tournament_size"))?;
        let survivorship = SurvivorshipParams {
            base_risk: self.base_risk.unwrap_or(defaults.base_risk),
            aging_rate: self.aging_rate.unwrap_or(defaults.aging_rate),
        };

        validate_population_size(population_size)?;
        validate_tournament_size(population_size, tournament_size)?;
        survivorship.validate()?;

        Ok(EvolutionConfig {
            population_size,
            tournament_size,
            survivorship,
        })
    }
}
