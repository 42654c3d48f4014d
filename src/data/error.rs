use std::path::PathBuf;

use thiserror::Error;

use super::model::{Experiment, Variant};

/// Failures raised by the data layer.
///
/// Each kind is a distinct variant so callers (the comparison driver, the
/// viewer) can decide per kind whether to skip, re-prompt or abort.
#[derive(Error, Debug)]
pub enum DataError {
    /// No trim record for the queried key.
    #[error(
        "no matching trim record for subject {subject}, experiment {}, session {session}",
        .experiment.code()
    )]
    LookupMiss {
        subject: u32,
        experiment: Experiment,
        /// Effective session (session 0 is looked up as 1).
        session: u32,
    },

    #[error("{0} data is not supported")]
    UnsupportedVariant(Variant),

    #[error("invalid placement '{value}', expected one of {{{}}}", .valid.join(", "))]
    InvalidPlacement {
        value: String,
        valid: Vec<&'static str>,
    },

    /// A resource whose rows or channel columns do not line up.
    #[error("malformed resource {resource}: {detail}")]
    MalformedResource { resource: String, detail: String },

    #[error("subject '{0}' not found")]
    SubjectNotFound(String),

    #[error("invalid subject id '{0}', expected 'S' followed by digits")]
    InvalidSubjectId(String),

    #[error("unknown experiment code {0}")]
    UnknownExperiment(u8),

    #[error("{table}: missing column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("{table}: row {row}, column '{column}': cannot parse '{value}'")]
    Parse {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("reading CSV {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("opening {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot analyze an empty signal")]
    EmptySignal,

    #[error("sample period must be positive and finite, got {0}")]
    InvalidSamplePeriod(f64),
}
