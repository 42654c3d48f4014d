use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::compare::Condition;
use crate::data::model::{Experiment, SAMPLING_FREQUENCY_HZ};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "eeg-compare.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Dataset layout and comparison defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the subject table, trim table and variant folders.
    pub dataset_root: PathBuf,
    pub subjects_file: String,
    pub trim_file: String,
    pub sampling_frequency_hz: f64,
    /// Conditions pre-selected in the viewer.
    pub conditions: Vec<Condition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::from("dataset"),
            subjects_file: "Subjects.csv".to_string(),
            trim_file: "Data_trim.csv".to_string(),
            sampling_frequency_hz: SAMPLING_FREQUENCY_HZ,
            conditions: vec![
                Condition::segmented(Experiment::NativeBone),
                Condition::segmented(Experiment::NonNativeBone),
                Condition::segmented(Experiment::NeutralBone),
            ],
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, text).with_context(|| format!("writing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.sampling_frequency_hz.is_finite() && self.sampling_frequency_hz > 0.0,
            "sampling_frequency_hz must be positive, got {}",
            self.sampling_frequency_hz
        );
        Ok(())
    }

    pub fn sample_period(&self) -> f64 {
        1.0 / self.sampling_frequency_hz
    }

    pub fn subjects_path(&self) -> PathBuf {
        self.dataset_root.join(&self.subjects_file)
    }

    pub fn trim_path(&self) -> PathBuf {
        self.dataset_root.join(&self.trim_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Variant;
    use tempfile::tempdir;

    #[test]
    fn save_and_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");

        let config = Config {
            dataset_root: PathBuf::from("/data/eeg"),
            sampling_frequency_hz: 250.0,
            conditions: vec![Condition {
                experiment: Experiment::EyesClosedResting,
                session: 2,
                variant: Variant::Filtered,
            }],
            ..Config::default()
        };
        config.save_to_file(&path)?;

        let loaded = Config::from_file(&path)?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.trim_path(), PathBuf::from("/data/eeg/Data_trim.csv"));
        assert_eq!(loaded.subjects_path(), PathBuf::from("/data/eeg/Subjects.csv"));
        assert!((loaded.sample_period() - 0.004).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = Config::from_file(&dir.path().join("absent.json"))?;
        assert_eq!(config, Config::default());
        assert!((config.sample_period() - 0.005).abs() < 1e-12);
        assert_eq!(config.conditions.len(), 3);
        Ok(())
    }

    #[test]
    fn partial_file_fills_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "dataset_root": "elsewhere" }"#)?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.dataset_root, PathBuf::from("elsewhere"));
        assert_eq!(config.subjects_file, "Subjects.csv");
        Ok(())
    }

    #[test]
    fn rejects_non_positive_frequency() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "sampling_frequency_hz": 0 }"#)?;
        assert!(Config::from_file(&path).is_err());
        Ok(())
    }
}
