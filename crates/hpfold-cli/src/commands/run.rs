use crate::cli::RunArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chrono::Local;
use hpfold::core::io::{history, leaderboard};
use hpfold::engine::error::EngineError;
use hpfold::engine::progress::ProgressReporter;
use hpfold::engine::stats::DeathLog;
use hpfold::workflows::simulate::{RunSummary, Simulation};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

pub async fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let listener = {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; stopping after the current generation.");
                cancel.store(true, Ordering::Relaxed);
            }
        })
    };

    let progress_handler = CliProgressHandler::new()
        .with_optimal_score(app.benchmark.as_ref().map(|b| b.optimal_score));
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Evolving {} polymers for {} generations...",
        app.setup.evolution.population_size, app.generations
    );
    info!("Invoking the core simulation workflow...");

    let outcome = tokio::task::block_in_place(|| {
        let mut simulation = Simulation::start(app.setup.clone(), &reporter)?;
        let summary = simulation.run(app.generations, &cancel, &reporter)?;
        Ok::<_, EngineError>((simulation, summary))
    });
    listener.abort();
    let (simulation, summary) = outcome?;

    print_report(&simulation, &summary, &app);
    write_outputs(&simulation, &app)?;
    Ok(())
}

fn print_report(simulation: &Simulation, summary: &RunSummary, app: &AppConfig) {
    let sequence = simulation.sequence();
    let composition = sequence.composition();

    if summary.cancelled {
        println!(
            "Run interrupted after {} of {} generations.",
            summary.generations_run, app.generations
        );
    }
    println!("Seed:        {}", simulation.seed());
    println!("Sequence:    {} (length {})", sequence, sequence.len());
    match composition.ratio() {
        Some(ratio) => println!(
            "Composition: {} H / {} P (H/P ratio {:.2})",
            composition.hydrophobic, composition.polar, ratio
        ),
        None => println!("Composition: {} H / 0 P", composition.hydrophobic),
    }
    println!("Generation:  {}", simulation.generation());

    if let Some(stats) = simulation.energy_statistics() {
        println!(
            "Energies:    min {} | q1 {:.2} | median {:.2} | q3 {:.2} | max {}",
            stats.min, stats.q1, stats.median, stats.q3, stats.max
        );
    }

    match simulation.records().best() {
        Some(best) => println!(
            "✓ Highest score {} first reached in generation {}.",
            best.score, best.generation
        ),
        None => println!("No fold with a positive score was found."),
    }
    if let Some(benchmark) = &app.benchmark {
        println!(
            "  Benchmark {} best known score: {}",
            benchmark.name, benchmark.optimal_score
        );
    }

    let telemetry = simulation.telemetry();
    println!("Age deaths:     {}", format_deaths(&telemetry.age_deaths));
    println!("Fitness deaths: {}", format_deaths(&telemetry.fitness_deaths));
    if let Some(last) = telemetry.selection_differentials.last() {
        println!("Last selection differential: {:.3}", last);
    }
}

fn format_deaths(log: &DeathLog) -> String {
    if log.is_empty() {
        return "none".to_string();
    }
    let by_age: Vec<String> = log
        .iter()
        .map(|(age, count)| format!("{}:{}", age, count))
        .collect();
    format!("{} total (age:count {})", log.total(), by_age.join(" "))
}

fn write_outputs(simulation: &Simulation, app: &AppConfig) -> Result<()> {
    if let Some(path) = &app.stats_output {
        info!("Writing energy history to {:?}", path);
        history::write_history_to_path(path, &simulation.telemetry().history_rows()).map_err(
            |source| CliError::Record {
                path: path.clone(),
                source,
            },
        )?;
        println!("Energy history written to: {}", path.display());
    }

    let Some(path) = &app.leaderboard else {
        return Ok(());
    };
    if app.benchmark.is_none() {
        warn!("Leaderboard entries are only recorded for benchmark sequences; skipping.");
        println!("Warning: leaderboard entries are only recorded for benchmark runs.");
        return Ok(());
    }

    let date = Local::now().format("%m/%d/%Y").to_string();
    match simulation.leaderboard_record(&app.player_name, &date)? {
        Some(record) => {
            leaderboard::append_record(path, &record).map_err(|source| CliError::Record {
                path: path.clone(),
                source,
            })?;
            info!(
                score = record.score,
                iterations = record.iterations,
                "Leaderboard entry appended."
            );
            println!(
                "Leaderboard entry for {} (score {}, iterations {}) appended to: {}",
                record.player_name,
                record.score,
                record.iterations,
                path.display()
            );
        }
        None => println!("No positive score to submit to the leaderboard."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_tallies_are_listed_by_age() {
        let mut log = DeathLog::new();
        assert_eq!(format_deaths(&log), "none");
        log.record(2);
        log.record(0);
        log.record(2);
        assert_eq!(format_deaths(&log), "3 total (age:count 0:1 2:2)");
    }
}
