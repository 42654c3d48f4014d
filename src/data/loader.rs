use std::fmt;
use std::path::{Path, PathBuf};

use super::error::DataError;
use super::model::{Experiment, Placement, Recording, Subject, Variant, SAMPLING_PERIOD};
use super::table::Table;
use super::trim::TrimTable;

// ---------------------------------------------------------------------------
// Resource addressing
// ---------------------------------------------------------------------------

/// Address of one recording resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub variant: Variant,
    /// Lowercased subject id, e.g. `s01`.
    pub subject: String,
    pub experiment: Experiment,
    /// `None` when the recording has no session suffix.
    pub session: Option<u32>,
}

impl ResourceKey {
    pub fn new(variant: Variant, subject: &Subject, experiment: Experiment, session: u32) -> Self {
        ResourceKey {
            variant,
            subject: subject.id().to_lowercase(),
            experiment,
            session: (session != 0).then_some(session),
        }
    }

    /// File name within the variant directory: `s01_ex08_s02.csv`.
    pub fn file_name(&self) -> String {
        let mut name = format!("{}_ex{:02}", self.subject, self.experiment.code());
        if let Some(session) = self.session {
            name.push_str(&format!("_s{session:02}"));
        }
        name.push('.');
        name.push_str(self.variant.extension());
        name
    }

    /// Path relative to the dataset root.
    pub fn relative_path(&self) -> PathBuf {
        Path::new(self.variant.dir_name()).join(self.file_name())
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.variant.dir_name(), self.file_name())
    }
}

/// Resolves a resource key to its channel table.
pub trait RecordingSource {
    fn open(&self, key: &ResourceKey) -> Result<Table, DataError>;
}

/// Recordings stored as CSV files under a dataset root directory.
#[derive(Debug, Clone)]
pub struct DatasetDir {
    root: PathBuf,
}

impl DatasetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DatasetDir { root: root.into() }
    }
}

impl RecordingSource for DatasetDir {
    fn open(&self, key: &ResourceKey) -> Result<Table, DataError> {
        let path = self.root.join(key.relative_path());
        log::debug!("Opening recording {}", path.display());
        Table::from_path(&path)
    }
}

// ---------------------------------------------------------------------------
// Segment loader
// ---------------------------------------------------------------------------

/// Loads recordings and anchors their timebase.
pub struct SegmentLoader<S> {
    source: S,
    trim: TrimTable,
    sample_period: f64,
}

impl<S: RecordingSource> SegmentLoader<S> {
    pub fn new(source: S, trim: TrimTable) -> Self {
        SegmentLoader {
            source,
            trim,
            sample_period: SAMPLING_PERIOD,
        }
    }

    pub fn with_sample_period(mut self, sample_period: f64) -> Self {
        self.sample_period = sample_period;
        self
    }

    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    pub fn trim_table(&self) -> &TrimTable {
        &self.trim
    }

    /// Load one recording.
    ///
    /// `session` 0 means "no session suffix" when addressing the resource; the
    /// trim lookup treats it as session 1. `Raw` fails before anything is
    /// opened, and so does a segmented load with no trim record.
    pub fn load(
        &self,
        subject: &Subject,
        experiment: Experiment,
        session: u32,
        variant: Variant,
    ) -> Result<Recording, DataError> {
        let start = match variant {
            Variant::Raw => return Err(DataError::UnsupportedVariant(variant)),
            Variant::Filtered => 0.0,
            Variant::Segmented => self.trim.lookup(subject.numeric_id(), experiment, session)?,
        };

        let key = ResourceKey::new(variant, subject, experiment, session);
        let table = self.source.open(&key)?;

        let [p4, cz, f8, t7] = Placement::ALL;
        let channels = [
            table.series(p4.label())?,
            table.series(cz.label())?,
            table.series(f8.label())?,
            table.series(t7.label())?,
        ];

        let recording = Recording::new(&key.to_string(), channels, start, self.sample_period)?;
        log::debug!(
            "Loaded {key}: {} samples starting at {start} s",
            recording.len()
        );
        Ok(recording)
    }
}
