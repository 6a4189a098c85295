use hpfold::workflows::simulate::SimulationSetup;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkChoice {
    pub name: &'static str,
    pub optimal_score: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub setup: SimulationSetup,
    pub generations: usize,
    pub benchmark: Option<BenchmarkChoice>,
    pub stats_output: Option<PathBuf>,
    pub leaderboard: Option<PathBuf>,
    pub player_name: String,
}
