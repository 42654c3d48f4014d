use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::error::DataError;
use super::model::Experiment;
use super::table::Table;

/// Trim table lookup: start time of each segmented recording on the
/// experiment-wide clock.
///
/// Records are indexed by `(subject, experiment code, session)`; session `0`
/// in a query resolves to session `1`.
#[derive(Debug, Clone, Default)]
pub struct TrimTable {
    index: HashMap<(u32, u8, u32), f64>,
}

impl TrimTable {
    /// Build the index from a table with columns `Subject`, `Experment`
    /// (or `Experiment`), `session` and `From (s)`.
    ///
    /// When a key appears more than once the first row wins.
    pub fn from_table(table: &Table) -> Result<Self, DataError> {
        let subjects: Vec<u32> = table.parse_column(&["Subject"])?;
        let experiments: Vec<u8> = table.parse_column(&["Experment", "Experiment"])?;
        let sessions: Vec<u32> = table.parse_column(&["session", "Session"])?;
        let starts: Vec<f64> = table.parse_column(&["From (s)", "From"])?;

        let mut trim = TrimTable::default();
        for (row, (((subject, experiment), session), start)) in subjects
            .into_iter()
            .zip(experiments)
            .zip(sessions)
            .zip(starts)
            .enumerate()
        {
            if !trim.insert(subject, experiment, session, start) {
                log::warn!(
                    "{}: row {row} repeats trim key ({subject}, {experiment}, {session}); keeping the first",
                    table.name()
                );
            }
        }
        log::debug!("Indexed {} trim records from {}", trim.len(), table.name());
        Ok(trim)
    }

    /// Add one record. Returns `false` (and keeps the existing start) if the
    /// key is already present.
    pub fn insert(&mut self, subject: u32, experiment: u8, session: u32, start: f64) -> bool {
        match self.index.entry((subject, experiment, session.max(1))) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(start);
                true
            }
        }
    }

    /// Start time in seconds of the segmented recording for this key.
    pub fn lookup(&self, subject: u32, experiment: Experiment, session: u32) -> Result<f64, DataError> {
        let session = session.max(1);
        self.index
            .get(&(subject, experiment.code(), session))
            .copied()
            .ok_or(DataError::LookupMiss {
                subject,
                experiment,
                session,
            })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
