use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::loader::{RecordingSource, SegmentLoader};
use super::model::{Experiment, Placement, Subject, Variant};
use super::spectrum::analyze;

/// One condition to include in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub experiment: Experiment,
    /// 0 when the recording has no session suffix.
    #[serde(default)]
    pub session: u32,
    #[serde(default)]
    pub variant: Variant,
}

impl Condition {
    /// Segmented recording without a session suffix.
    pub fn segmented(experiment: Experiment) -> Self {
        Condition {
            experiment,
            session: 0,
            variant: Variant::Segmented,
        }
    }

    pub fn label(&self) -> String {
        if self.session == 0 {
            self.experiment.label().to_string()
        } else {
            format!("{}, session {}", self.experiment.label(), self.session)
        }
    }
}

/// A named (x, y) series ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    pub label: String,
    pub condition: Condition,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Time-domain and frequency-domain views of one channel across conditions,
/// in the order the conditions were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub subject: String,
    pub placement: Placement,
    pub time_domain: Vec<LabeledSeries>,
    pub frequency_domain: Vec<LabeledSeries>,
}

/// Load every condition for `subject`, take the `placement` channel and
/// compute its spectrum.
///
/// The first failing condition aborts the comparison and its error is
/// returned as is.
pub fn compare<S: RecordingSource>(
    loader: &SegmentLoader<S>,
    subject: &Subject,
    placement: Placement,
    conditions: &[Condition],
) -> Result<Comparison, DataError> {
    let mut time_domain = Vec::with_capacity(conditions.len());
    let mut frequency_domain = Vec::with_capacity(conditions.len());

    for &condition in conditions {
        let recording = loader.load(
            subject,
            condition.experiment,
            condition.session,
            condition.variant,
        )?;
        let signal = recording.signal(placement);
        let spectrum = analyze(signal, loader.sample_period())?;
        let label = condition.label();

        time_domain.push(LabeledSeries {
            label: label.clone(),
            condition,
            x: recording.time().to_vec(),
            y: signal.to_vec(),
        });
        frequency_domain.push(LabeledSeries {
            label,
            condition,
            x: spectrum.frequencies,
            y: spectrum.magnitudes,
        });
    }

    log::info!(
        "Compared {} conditions for {} at {placement}",
        conditions.len(),
        subject.id()
    );
    Ok(Comparison {
        subject: subject.id().to_string(),
        placement,
        time_domain,
        frequency_domain,
    })
}
