//! Writes a small synthetic dataset in the layout the viewer expects:
//! `Subjects.csv`, `Data_trim.csv`, `Filtered_Data/` and `Segmented_Data/`.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (default `dataset`).

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use eeg_compare::data::loader::ResourceKey;
use eeg_compare::data::model::{Experiment, Placement, Subject, Variant, SAMPLING_PERIOD};

/// Seconds of signal per recording.
const DURATION_S: f64 = 30.0;
/// Gap between consecutive recordings on the experiment clock.
const GAP_S: f64 = 15.0;

struct SubjectRow {
    id: &'static str,
    age: u32,
    gender: &'static str,
    smoke: &'static str,
    alcohol: &'static str,
    medication: &'static str,
    language: &'static str,
    bmi: f64,
    comments: &'static str,
}

const SUBJECTS: [SubjectRow; 4] = [
    SubjectRow { id: "S01", age: 23, gender: "M", smoke: "No", alcohol: "No", medication: "No", language: "Arabic", bmi: 22.4, comments: "" },
    SubjectRow { id: "S02", age: 31, gender: "F", smoke: "Yes", alcohol: "Occasionally", medication: "No", language: "Arabic", bmi: 24.9, comments: "" },
    SubjectRow { id: "S03", age: 27, gender: "F", smoke: "No", alcohol: "No", medication: "Yes", language: "English", bmi: 19.7, comments: "slept 5h" },
    SubjectRow { id: "S04", age: 45, gender: "M", smoke: "No", alcohol: "Yes", medication: "No", language: "French", bmi: 28.1, comments: "" },
];

/// Band amplitudes (theta 6 Hz, alpha 10 Hz, beta 20 Hz) for a condition.
fn band_amplitudes(experiment: Experiment) -> (f64, f64, f64) {
    match experiment {
        Experiment::EyesOpenResting => (2.0, 3.0, 2.0),
        Experiment::EyesClosedResting => (2.0, 9.0, 1.5),
        Experiment::NativeInEar | Experiment::NativeBone => (5.0, 4.0, 3.0),
        Experiment::NonNativeInEar | Experiment::NonNativeBone => (3.5, 3.5, 4.5),
        Experiment::NeutralInEar | Experiment::NeutralBone => (2.5, 5.0, 2.5),
    }
}

/// Sessions recorded for an experiment. The first session carries no suffix
/// (session 0); a repeat is stored as `_s02`.
fn sessions(experiment: Experiment) -> &'static [u32] {
    match experiment {
        Experiment::EyesClosedResting => &[0, 2],
        _ => &[0],
    }
}

/// Standard normal sample (Box-Muller).
fn gauss(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn channel(rng: &mut StdRng, n: usize, bands: (f64, f64, f64), gain: f64, offset: f64) -> Vec<f64> {
    let (theta, alpha, beta) = bands;
    let phase: f64 = rng.random::<f64>() * 2.0 * PI;
    (0..n)
        .map(|i| {
            let t = i as f64 * SAMPLING_PERIOD;
            offset
                + gain
                    * (theta * (2.0 * PI * 6.0 * t + phase).sin()
                        + alpha * (2.0 * PI * 10.0 * t + phase).sin()
                        + beta * (2.0 * PI * 20.0 * t + phase).sin())
                + 1.5 * gauss(rng)
        })
        .collect()
}

fn write_recording(path: &Path, channels: &[Vec<f64>; 4]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(Placement::ALL.iter().map(|p| p.label()))?;
    for i in 0..channels[0].len() {
        writer.write_record(channels.iter().map(|c| format!("{:.4}", c[i])))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_subjects(root: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(root.join("Subjects.csv"))?;
    writer.write_record([
        "Subject ID", "Age ", "Gender", "Smoke", "Alcoholic", "Medication", "Mother Language", "BMI", "comments",
    ])?;
    for s in &SUBJECTS {
        writer.write_record([
            s.id.to_string(),
            s.age.to_string(),
            s.gender.to_string(),
            s.smoke.to_string(),
            s.alcohol.to_string(),
            s.medication.to_string(),
            s.language.to_string(),
            s.bmi.to_string(),
            s.comments.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dataset"));
    for variant in [Variant::Filtered, Variant::Segmented] {
        std::fs::create_dir_all(root.join(variant.dir_name()))
            .with_context(|| format!("creating {}", root.display()))?;
    }

    write_subjects(&root)?;

    let mut rng = StdRng::seed_from_u64(42);
    let n = (DURATION_S / SAMPLING_PERIOD).round() as usize;
    let mut trim = csv::Writer::from_path(root.join("Data_trim.csv"))?;
    trim.write_record(["Subject", "Experment", "session", "From (s)"])?;

    let mut recordings = 0;
    for row in &SUBJECTS {
        let subject = Subject::new(
            row.id,
            row.age,
            row.gender,
            row.smoke == "Yes",
            row.alcohol,
            row.medication == "Yes",
            row.language,
            row.bmi,
            row.comments,
        )?;
        let mut clock: f64 = rng.random_range(5.0..20.0);

        for experiment in Experiment::ALL {
            for &session in sessions(experiment) {
                let bands = band_amplitudes(experiment);
                let channels = [
                    channel(&mut rng, n, bands, 0.8, 1.2),
                    channel(&mut rng, n, bands, 1.0, -0.5),
                    channel(&mut rng, n, bands, 0.6, 0.3),
                    channel(&mut rng, n, bands, 1.1, 0.0),
                ];

                for variant in [Variant::Filtered, Variant::Segmented] {
                    let key = ResourceKey::new(variant, &subject, experiment, session);
                    write_recording(&root.join(key.relative_path()), &channels)?;
                    recordings += 1;
                }

                let start = (clock * 1000.0).round() / 1000.0;
                trim.write_record([
                    subject.numeric_id().to_string(),
                    experiment.code().to_string(),
                    session.max(1).to_string(),
                    start.to_string(),
                ])?;
                clock += DURATION_S + GAP_S;
            }
        }
    }
    trim.flush()?;

    println!(
        "Wrote {} subjects and {recordings} recordings ({n} samples each) to {}",
        SUBJECTS.len(),
        root.display()
    );
    Ok(())
}
