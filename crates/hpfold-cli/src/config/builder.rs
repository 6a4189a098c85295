use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, BenchmarkChoice};
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use hpfold::core::benchmarks::{self, Benchmark};
use hpfold::core::energy::Neighborhood;
use hpfold::core::models::folding::MutationParams;
use hpfold::engine::config::EvolutionConfigBuilder;
use hpfold::workflows::simulate::{SequenceSource, SimulationSetup};
use std::str::FromStr;
use tracing::debug;

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let run_file = file_config.run.take().unwrap_or_default();
    let evolution_file = file_config.evolution.take().unwrap_or_default();
    let mutation_file = file_config.mutation.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let seed = args.seed.or(run_file.seed);
    let generations = args
        .generations
        .or(run_file.generations)
        .unwrap_or(defaults.generations);

    // A flag on the command line overrides either choice made in the file.
    let (sequence_arg, benchmark_arg) = match (&args.sequence, &args.benchmark) {
        (None, None) => (run_file.sequence.clone(), run_file.benchmark.clone()),
        (sequence, benchmark) => (sequence.clone(), benchmark.clone()),
    };
    if sequence_arg.is_some() && benchmark_arg.is_some() {
        return Err(CliError::Config(
            "A run cannot use both an explicit sequence and a benchmark.".to_string(),
        ));
    }
    let requested_length = args.length.or(run_file.length);

    let benchmark = benchmark_arg.as_deref().map(resolve_benchmark).transpose()?;
    let (length, sequence) = match (&benchmark, sequence_arg) {
        (Some((choice, bench)), _) => {
            if let Some(length) = requested_length.filter(|&l| l != bench.length()) {
                debug!(
                    requested = length,
                    benchmark = choice.name,
                    "Ignoring requested length for benchmark run."
                );
            }
            (
                bench.length(),
                SequenceSource::Labels(bench.sequence.to_string()),
            )
        }
        (None, Some(labels)) => {
            let labels = labels.trim().to_string();
            let length = requested_length.unwrap_or(labels.chars().count());
            (length, SequenceSource::Labels(labels))
        }
        (None, None) => (
            requested_length.unwrap_or(defaults.length),
            SequenceSource::RunSeed,
        ),
    };

    let neighborhood_name = args
        .neighborhood
        .clone()
        .or(run_file.neighborhood)
        .unwrap_or(defaults.neighborhood);
    let neighborhood =
        Neighborhood::from_str(&neighborhood_name).map_err(|e| CliError::Config(e.to_string()))?;

    let evolution = EvolutionConfigBuilder::new()
        .population_size(
            args.population_size
                .or(evolution_file.population_size)
                .unwrap_or(defaults.population_size),
        )
        .tournament_size(
            args.tournament_size
                .or(evolution_file.tournament_size)
                .unwrap_or(defaults.tournament_size),
        )
        .base_risk(evolution_file.base_risk.unwrap_or(defaults.base_risk))
        .aging_rate(evolution_file.aging_rate.unwrap_or(defaults.aging_rate))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mutation = MutationParams {
        mega_rate: mutation_file.mega_rate.unwrap_or(defaults.mega_rate),
        mega_count: mutation_file.mega_count.unwrap_or(defaults.mega_count),
        mega_age_threshold: mutation_file
            .mega_age_threshold
            .unwrap_or(defaults.mega_age_threshold),
        max_pivot_attempts: mutation_file.max_pivot_attempts,
    };
    mutation
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        setup: SimulationSetup {
            length,
            sequence,
            neighborhood,
            mutation,
            evolution,
            seed,
        },
        generations,
        benchmark: benchmark.map(|(choice, _)| choice),
        stats_output: args.stats_output.clone().or(output_file.stats_output),
        leaderboard: args.leaderboard.clone().or(output_file.leaderboard),
        player_name: args
            .player_name
            .clone()
            .or(output_file.player_name)
            .unwrap_or(defaults.player_name),
    })
}

/// Accepts a benchmark name (`hp20`) or a bare length (`20`).
fn resolve_benchmark(name: &str) -> Result<(BenchmarkChoice, &'static Benchmark)> {
    let (key, bench) = benchmarks::lookup(name).ok_or_else(|| {
        CliError::Config(format!(
            "Unknown benchmark '{}'. Run `hpfold benchmarks` to list them.",
            name
        ))
    })?;
    Ok((
        BenchmarkChoice {
            name: key,
            optimal_score: bench.optimal_score,
        },
        bench,
    ))
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0].trim();
        let value_str = parts[1].trim();

        match key {
            "run.length" => {
                config.run.get_or_insert_with(Default::default).length =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.seed" => {
                config.run.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.generations" => {
                config.run.get_or_insert_with(Default::default).generations =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.neighborhood" => {
                config.run.get_or_insert_with(Default::default).neighborhood =
                    Some(value_str.to_string());
            }
            "evolution.population-size" => {
                config
                    .evolution
                    .get_or_insert_with(Default::default)
                    .population_size = Some(parse_value(key, value_str, "integer")?);
            }
            "evolution.tournament-size" => {
                config
                    .evolution
                    .get_or_insert_with(Default::default)
                    .tournament_size = Some(parse_value(key, value_str, "integer")?);
            }
            "evolution.base-risk" => {
                config.evolution.get_or_insert_with(Default::default).base_risk =
                    Some(parse_value(key, value_str, "float")?);
            }
            "evolution.aging-rate" => {
                config.evolution.get_or_insert_with(Default::default).aging_rate =
                    Some(parse_value(key, value_str, "float")?);
            }
            "mutation.mega-rate" => {
                config.mutation.get_or_insert_with(Default::default).mega_rate =
                    Some(parse_value(key, value_str, "float")?);
            }
            "mutation.mega-count" => {
                config.mutation.get_or_insert_with(Default::default).mega_count =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "mutation.mega-age-threshold" => {
                config
                    .mutation
                    .get_or_insert_with(Default::default)
                    .mega_age_threshold = Some(parse_value(key, value_str, "integer")?);
            }
            "mutation.max-pivot-attempts" => {
                config
                    .mutation
                    .get_or_insert_with(Default::default)
                    .max_pivot_attempts = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
