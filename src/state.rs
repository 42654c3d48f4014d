use std::path::Path;

use crate::color::ConditionColors;
use crate::config::Config;
use crate::data::compare::{compare, Comparison, Condition};
use crate::data::error::DataError;
use crate::data::loader::{DatasetDir, SegmentLoader};
use crate::data::model::{Experiment, Placement};
use crate::data::subjects::SubjectRegistry;
use crate::data::table::Table;
use crate::data::trim::TrimTable;

// ---------------------------------------------------------------------------
// Opened dataset
// ---------------------------------------------------------------------------

/// Subject registry and loader for one dataset directory.
pub struct Dataset {
    pub registry: SubjectRegistry,
    pub loader: SegmentLoader<DatasetDir>,
}

impl Dataset {
    /// Read the subject and trim tables under `config.dataset_root`.
    pub fn open(config: &Config) -> Result<Self, DataError> {
        let registry = SubjectRegistry::from_table(&Table::from_path(&config.subjects_path())?)?;
        let trim = TrimTable::from_table(&Table::from_path(&config.trim_path())?)?;
        let loader = SegmentLoader::new(DatasetDir::new(config.dataset_root.clone()), trim)
            .with_sample_period(config.sample_period());
        Ok(Dataset { registry, loader })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Loaded dataset (None until a dataset folder is opened).
    pub dataset: Option<Dataset>,

    /// Index into the registry of the selected subject.
    pub selected_subject: Option<usize>,

    /// Text typed into the subject search box.
    pub subject_query: String,

    pub placement: Placement,

    /// Selectable conditions with their checkbox state.
    pub conditions: Vec<(Condition, bool)>,

    /// Colour per selectable condition.
    pub colors: ConditionColors,

    /// Result of the last successful comparison.
    pub comparison: Option<Comparison>,

    /// Plot only the non-negative half of each spectrum.
    pub positive_only: bool,

    /// Rescale every plotted series to [0, 1].
    pub minmax_scaling: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mut conditions: Vec<(Condition, bool)> = Experiment::ALL
            .into_iter()
            .map(|e| {
                let c = Condition::segmented(e);
                (c, config.conditions.contains(&c))
            })
            .collect();
        for c in &config.conditions {
            if !conditions.iter().any(|(known, _)| known == c) {
                conditions.push((*c, true));
            }
        }
        let colors =
            ConditionColors::new(&conditions.iter().map(|(c, _)| *c).collect::<Vec<_>>());

        Self {
            config,
            dataset: None,
            selected_subject: None,
            subject_query: String::new(),
            placement: Placement::T7,
            conditions,
            colors,
            comparison: None,
            positive_only: true,
            minmax_scaling: false,
            status_message: None,
        }
    }

    /// Open the dataset under `root`, replacing any previous one.
    pub fn open_dataset(&mut self, root: &Path) {
        let config = Config {
            dataset_root: root.to_path_buf(),
            ..self.config.clone()
        };
        match Dataset::open(&config) {
            Ok(dataset) => {
                log::info!(
                    "Opened dataset {} with {} subjects",
                    root.display(),
                    dataset.registry.len()
                );
                self.config = config;
                self.selected_subject = (!dataset.registry.is_empty()).then_some(0);
                self.dataset = Some(dataset);
                self.comparison = None;
                self.status_message = None;
            }
            Err(e) => self.report(&format!("Failed to open dataset {}", root.display()), &e),
        }
    }

    /// Select a subject by typed id (`S01`, `1`).
    pub fn select_subject(&mut self, query: &str) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        match dataset.registry.index_of(query) {
            Ok(index) => {
                self.selected_subject = Some(index);
                self.status_message = None;
            }
            Err(e) => self.report("Lookup failed", &e),
        }
    }

    pub fn enabled_conditions(&self) -> Vec<Condition> {
        self.conditions
            .iter()
            .filter(|(_, on)| *on)
            .map(|(c, _)| *c)
            .collect()
    }

    /// Run the comparison for the selected subject, placement and conditions.
    pub fn run_comparison(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.status_message = Some("Open a dataset first".to_string());
            return;
        };
        let Some(subject) = self
            .selected_subject
            .and_then(|i| dataset.registry.subjects().get(i))
        else {
            self.status_message = Some("Select a subject".to_string());
            return;
        };

        let conditions = self.enabled_conditions();
        match compare(&dataset.loader, subject, self.placement, &conditions) {
            Ok(comparison) => {
                self.comparison = Some(comparison);
                self.status_message = None;
            }
            Err(e) => {
                let context = format!("Comparison for {} failed", subject.id());
                self.comparison = None;
                self.report(&context, &e);
            }
        }
    }

    fn report(&mut self, context: &str, error: &DataError) {
        log::error!("{context}: {error}");
        let detail = match error {
            DataError::Csv { source, .. } => format!("{error}: {source}"),
            DataError::Io { source, .. } => format!("{error}: {source}"),
            _ => error.to_string(),
        };
        self.status_message = Some(format!("{context}: {detail}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::channel_csv;

    fn write_dataset(root: &Path) {
        std::fs::write(
            root.join("Subjects.csv"),
            "Subject ID,Age ,Gender,Smoke,Alcoholic,Medication,Mother Language,BMI,comments\n\
             S01,24,M,No,No,No,Arabic,23.1,\n\
             S02,30,F,No,No,No,English,20.4,\n",
        )
        .unwrap();
        std::fs::write(
            root.join("Data_trim.csv"),
            "Subject,Experment,session,From (s)\n1,8,1,3.0\n1,9,1,60.0\n",
        )
        .unwrap();
        std::fs::create_dir(root.join("Segmented_Data")).unwrap();
        for ex in ["08", "09"] {
            std::fs::write(
                root.join(format!("Segmented_Data/s01_ex{ex}.csv")),
                channel_csv(32, |i| (i as f64 * 0.7).sin()),
            )
            .unwrap();
        }
    }

    fn state_with_conditions(experiments: &[Experiment]) -> AppState {
        let config = Config {
            conditions: experiments.iter().copied().map(Condition::segmented).collect(),
            ..Config::default()
        };
        AppState::new(config)
    }

    #[test]
    fn config_conditions_start_enabled() {
        let state = state_with_conditions(&[Experiment::NativeBone]);
        assert_eq!(state.conditions.len(), Experiment::ALL.len());
        assert_eq!(
            state.enabled_conditions(),
            vec![Condition::segmented(Experiment::NativeBone)]
        );
    }

    #[test]
    fn open_select_and_compare() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let mut state = state_with_conditions(&[Experiment::NativeBone, Experiment::NonNativeBone]);
        state.open_dataset(dir.path());
        assert!(state.status_message.is_none());
        assert_eq!(state.selected_subject, Some(0));
        assert_eq!(state.config.dataset_root, dir.path());

        state.run_comparison();
        let cmp = state.comparison.as_ref().unwrap();
        assert_eq!(cmp.time_domain.len(), 2);
        assert_eq!(cmp.time_domain[1].x[0], 60.0);
    }

    #[test]
    fn errors_land_in_the_status_line() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let mut state = state_with_conditions(&[Experiment::NeutralBone]);
        state.open_dataset(dir.path());

        state.select_subject("S09");
        assert!(state.status_message.as_deref().unwrap().contains("S09"));

        state.select_subject("2");
        assert_eq!(state.selected_subject, Some(1));
        state.run_comparison();
        assert!(state.comparison.is_none());
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .contains("no matching trim record"));
    }

    #[test]
    fn missing_dataset_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(Config::default());
        state.open_dataset(dir.path());
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
        assert_eq!(state.config.dataset_root, Config::default().dataset_root);
    }
}
