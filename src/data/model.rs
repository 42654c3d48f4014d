use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DataError;

/// Sampling frequency of every recording in the dataset.
pub const SAMPLING_FREQUENCY_HZ: f64 = 200.0;
/// Time between consecutive samples, in seconds.
pub const SAMPLING_PERIOD: f64 = 1.0 / SAMPLING_FREQUENCY_HZ;

// ---------------------------------------------------------------------------
// Experiment – the recorded condition
// ---------------------------------------------------------------------------

/// Experimental condition, identified in the dataset by a fixed integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experiment {
    EyesOpenResting,
    EyesClosedResting,
    NativeInEar,
    NonNativeInEar,
    NeutralInEar,
    NativeBone,
    NonNativeBone,
    NeutralBone,
}

impl Experiment {
    pub const ALL: [Experiment; 8] = [
        Experiment::EyesOpenResting,
        Experiment::EyesClosedResting,
        Experiment::NativeInEar,
        Experiment::NonNativeInEar,
        Experiment::NeutralInEar,
        Experiment::NativeBone,
        Experiment::NonNativeBone,
        Experiment::NeutralBone,
    ];

    /// Dataset code of this experiment.
    pub fn code(self) -> u8 {
        match self {
            Experiment::EyesOpenResting => 1,
            Experiment::EyesClosedResting => 2,
            Experiment::NativeInEar => 5,
            Experiment::NonNativeInEar => 6,
            Experiment::NeutralInEar => 7,
            Experiment::NativeBone => 8,
            Experiment::NonNativeBone => 9,
            Experiment::NeutralBone => 10,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, DataError> {
        Self::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or(DataError::UnknownExperiment(code))
    }

    /// Human-readable label used for legends.
    pub fn label(self) -> &'static str {
        match self {
            Experiment::EyesOpenResting => "Resting, eyes open",
            Experiment::EyesClosedResting => "Resting, eyes closed",
            Experiment::NativeInEar => "Native language (in-ear)",
            Experiment::NonNativeInEar => "Non-native language (in-ear)",
            Experiment::NeutralInEar => "Neutral audio (in-ear)",
            Experiment::NativeBone => "Native language (bone)",
            Experiment::NonNativeBone => "Non-native language (bone)",
            Experiment::NeutralBone => "Neutral audio (bone)",
        }
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Placement – scalp electrode position of a channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    P4,
    Cz,
    F8,
    T7,
}

impl Placement {
    pub const ALL: [Placement; 4] = [Placement::P4, Placement::Cz, Placement::F8, Placement::T7];

    /// Column name of this channel in a recording resource.
    pub fn label(self) -> &'static str {
        match self {
            Placement::P4 => "P4",
            Placement::Cz => "Cz",
            Placement::F8 => "F8",
            Placement::T7 => "T7",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Placement {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| DataError::InvalidPlacement {
                value: s.to_string(),
                valid: Self::ALL.iter().map(|p| p.label()).collect(),
            })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Variant – which processed form of the recording to load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Filtered,
    #[default]
    Segmented,
    Raw,
}

impl Variant {
    /// Directory holding this variant's resources.
    pub fn dir_name(self) -> &'static str {
        match self {
            Variant::Filtered => "Filtered_Data",
            Variant::Segmented => "Segmented_Data",
            Variant::Raw => "Raw_Data",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Variant::Raw => "txt",
            Variant::Filtered | Variant::Segmented => "csv",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Filtered => f.write_str("filtered"),
            Variant::Segmented => f.write_str("segmented"),
            Variant::Raw => f.write_str("raw"),
        }
    }
}

// ---------------------------------------------------------------------------
// Subject – one row of the subject table
// ---------------------------------------------------------------------------

/// Immutable subject descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    id: String,
    numeric_id: u32,
    pub age: u32,
    pub gender: String,
    pub smoke: bool,
    pub alcohol: String,
    pub medication: bool,
    pub language: String,
    pub bmi: f64,
    /// Empty when the source has no comment.
    pub comments: String,
}

impl Subject {
    /// Validates `id` (`S` followed by digits) and normalises missing
    /// comments to an empty string.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        age: u32,
        gender: &str,
        smoke: bool,
        alcohol: &str,
        medication: bool,
        language: &str,
        bmi: f64,
        comments: &str,
    ) -> Result<Self, DataError> {
        let numeric_id = id
            .strip_prefix('S')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| DataError::InvalidSubjectId(id.to_string()))?;

        let comments = if comments == "nan" { "" } else { comments };

        Ok(Subject {
            id: id.to_string(),
            numeric_id,
            age,
            gender: gender.to_string(),
            smoke,
            alcohol: alcohol.to_string(),
            medication,
            language: language.to_string(),
            bmi,
            comments: comments.to_string(),
        })
    }

    /// Identity string, e.g. `S01`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Numeric part of the id, used as the trim-table key.
    pub fn numeric_id(&self) -> u32 {
        self.numeric_id
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        writeln!(f, "Subject {}:", &self.id[1..])?;
        writeln!(f, "\tAge: {}", self.age)?;
        writeln!(f, "\tGender: {}", self.gender)?;
        writeln!(f, "\tSmoke: {}", yes_no(self.smoke))?;
        writeln!(f, "\tAlcohol: {}", self.alcohol)?;
        writeln!(f, "\tMedication: {}", yes_no(self.medication))?;
        writeln!(f, "\tLanguage: {}", self.language)?;
        writeln!(f, "\tBMI: {}", self.bmi)?;
        writeln!(f, "\tComments: {}", self.comments)
    }
}

// ---------------------------------------------------------------------------
// Recording – four channels on a shared timebase
// ---------------------------------------------------------------------------

/// One loaded recording. All channels and `time` have the same length.
#[derive(Debug, Clone)]
pub struct Recording {
    time: Vec<f64>,
    /// Indexed by [`Placement::index`].
    channels: [Vec<f64>; 4],
}

impl Recording {
    /// Build a recording whose timebase starts at `start` seconds.
    ///
    /// Fails with [`DataError::MalformedResource`] if the channels differ in
    /// length.
    pub fn new(
        resource: &str,
        channels: [Vec<f64>; 4],
        start: f64,
        sample_period: f64,
    ) -> Result<Self, DataError> {
        let n = channels[0].len();
        if channels.iter().any(|c| c.len() != n) {
            let detail = Placement::ALL
                .iter()
                .zip(channels.iter())
                .map(|(p, c)| format!("{}={}", p.label(), c.len()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(DataError::MalformedResource {
                resource: resource.to_string(),
                detail: format!("channel lengths differ ({detail})"),
            });
        }

        let time = (0..n).map(|i| start + i as f64 * sample_period).collect();
        Ok(Recording { time, channels })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn signal(&self, placement: Placement) -> &[f64] {
        &self.channels[placement.index()]
    }

    /// Look a channel up by its electrode label.
    pub fn get_signal(&self, label: &str) -> Result<&[f64], DataError> {
        let placement: Placement = label.parse()?;
        Ok(self.signal(placement))
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Spectrum – magnitude spectrum of one channel
// ---------------------------------------------------------------------------

/// Magnitude spectrum; `frequencies` and `magnitudes` have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Hz, in FFT bin order (negative frequencies in the upper half).
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
