use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRunConfig {
    pub length: Option<usize>,
    pub seed: Option<u64>,
    pub sequence: Option<String>,
    pub benchmark: Option<String>,
    pub generations: Option<usize>,
    pub neighborhood: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEvolutionConfig {
    pub population_size: Option<usize>,
    pub tournament_size: Option<usize>,
    pub base_risk: Option<f64>,
    pub aging_rate: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileMutationConfig {
    pub mega_rate: Option<f64>,
    pub mega_count: Option<usize>,
    pub mega_age_threshold: Option<u32>,
    pub max_pivot_attempts: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub stats_output: Option<PathBuf>,
    pub leaderboard: Option<PathBuf>,
    pub player_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub run: Option<FileRunConfig>,
    pub evolution: Option<FileEvolutionConfig>,
    pub mutation: Option<FileMutationConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_kebab_case_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
[run]
length = 36
seed = 7
neighborhood = "moore"

[evolution]
population-size = 40
tournament-size = 4

[mutation]
mega-rate = 0.02
max-pivot-attempts = 5000

[output]
player-name = "ada"
"#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let run = config.run.unwrap();
        assert_eq!(run.length, Some(36));
        assert_eq!(run.seed, Some(7));
        assert_eq!(run.neighborhood.as_deref(), Some("moore"));
        let evolution = config.evolution.unwrap();
        assert_eq!(evolution.population_size, Some(40));
        assert_eq!(evolution.tournament_size, Some(4));
        let mutation = config.mutation.unwrap();
        assert_eq!(mutation.mega_rate, Some(0.02));
        assert_eq!(mutation.max_pivot_attempts, Some(5000));
        assert_eq!(config.output.unwrap().player_name.as_deref(), Some("ada"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[evolution]\npopulation = 10\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
