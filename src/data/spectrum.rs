//! Zero-mean magnitude spectrum of a single channel.

use rustfft::{num_complex::Complex, FftPlanner};

use super::error::DataError;
use super::model::Spectrum;

/// Compute the magnitude spectrum of `signal` sampled every `sample_period`
/// seconds.
///
/// The mean is removed first so a DC offset does not dominate bin 0. The
/// output covers every FFT bin: frequencies are in standard bin order, so the
/// upper half holds the negative frequencies. Any length is accepted.
pub fn analyze(signal: &[f64], sample_period: f64) -> Result<Spectrum, DataError> {
    if signal.is_empty() {
        return Err(DataError::EmptySignal);
    }

    let n = signal.len();
    let frequencies = frequency_bins(n, sample_period)?;
    let mean = signal.iter().sum::<f64>() / n as f64;

    let mut buffer: Vec<Complex<f64>> = signal
        .iter()
        .map(|&x| Complex::new(x - mean, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    Ok(Spectrum {
        frequencies,
        magnitudes: buffer.iter().map(|c| c.norm()).collect(),
    })
}

/// Bin centre frequencies (Hz) of an `n`-point FFT.
///
/// Bins `0..=(n - 1) / 2` are non-negative; the rest wrap to negative
/// frequencies, so for even `n` the Nyquist bin reads as negative.
pub fn frequency_bins(n: usize, sample_period: f64) -> Result<Vec<f64>, DataError> {
    if !(sample_period.is_finite() && sample_period > 0.0) {
        return Err(DataError::InvalidSamplePeriod(sample_period));
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    let df = 1.0 / (n as f64 * sample_period);
    let positive = (n - 1) / 2 + 1;
    Ok((0..n)
        .map(|k| {
            if k < positive {
                k as f64 * df
            } else {
                (k as f64 - n as f64) * df
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::data::model::SAMPLING_PERIOD;

    #[test]
    fn frequency_axis_for_eight_bins() {
        let bins = frequency_bins(8, 0.005).unwrap();
        let expected = [0.0, 25.0, 50.0, 75.0, -100.0, -75.0, -50.0, -25.0];
        assert_eq!(bins.len(), expected.len());
        for (got, want) in bins.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn frequency_axis_for_odd_length() {
        let bins = frequency_bins(5, 0.2).unwrap();
        let expected = [0.0, 1.0, 2.0, -2.0, -1.0];
        for (got, want) in bins.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn frequency_axis_rejects_bad_period() {
        for period in [0.0, -0.005, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                frequency_bins(8, period),
                Err(DataError::InvalidSamplePeriod(_))
            ));
        }
        assert!(frequency_bins(0, 0.005).unwrap().is_empty());
    }

    #[test]
    fn constant_signal_has_no_energy() {
        let spectrum = analyze(&[5.0; 64], SAMPLING_PERIOD).unwrap();
        assert_eq!(spectrum.len(), 64);
        for &m in &spectrum.magnitudes {
            assert_abs_diff_eq!(m, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn real_input_gives_mirrored_magnitudes() {
        let signal: Vec<f64> = (0..50)
            .map(|i| {
                let t = i as f64 * SAMPLING_PERIOD;
                (2.0 * std::f64::consts::PI * 10.0 * t).sin() + 0.3 * (i % 7) as f64
            })
            .collect();
        let spectrum = analyze(&signal, SAMPLING_PERIOD).unwrap();
        let n = signal.len();
        for k in 1..n / 2 {
            assert_abs_diff_eq!(
                spectrum.magnitudes[k],
                spectrum.magnitudes[n - k],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn sine_peaks_at_its_frequency() {
        // 20 Hz sine, 200 samples at 200 Hz: exactly bin 20.
        let signal: Vec<f64> = (0..200)
            .map(|i| 3.0 + (2.0 * std::f64::consts::PI * 20.0 * i as f64 * SAMPLING_PERIOD).sin())
            .collect();
        let spectrum = analyze(&signal, SAMPLING_PERIOD).unwrap();

        let peak = spectrum
            .magnitudes
            .iter()
            .take(100)
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, 20);
        assert_abs_diff_eq!(spectrum.frequencies[peak], 20.0, epsilon = 1e-9);
        // Amplitude 1 sine: |X[k]| = N / 2.
        assert_abs_diff_eq!(spectrum.magnitudes[peak], 100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spectrum.magnitudes[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn single_sample() {
        let spectrum = analyze(&[4.2], SAMPLING_PERIOD).unwrap();
        assert_eq!(spectrum.frequencies, vec![0.0]);
        assert_abs_diff_eq!(spectrum.magnitudes[0], 0.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(analyze(&[], SAMPLING_PERIOD), Err(DataError::EmptySignal)));
        assert!(matches!(
            analyze(&[1.0, 2.0], 0.0),
            Err(DataError::InvalidSamplePeriod(_))
        ));
        assert!(matches!(
            analyze(&[1.0, 2.0], f64::NAN),
            Err(DataError::InvalidSamplePeriod(_))
        ));
    }
}
