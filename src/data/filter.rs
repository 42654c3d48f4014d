use super::model::Spectrum;

// ---------------------------------------------------------------------------
// View filters applied before display
// ---------------------------------------------------------------------------

/// Keep only the bins with non-negative frequency, in ascending order.
///
/// [`analyze`](super::spectrum::analyze) returns the mirrored spectrum; this is
/// the explicit slice for a one-sided view.
pub fn positive_half(spectrum: &Spectrum) -> Spectrum {
    let (frequencies, magnitudes) = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.magnitudes)
        .filter(|(f, _)| **f >= 0.0)
        .map(|(&f, &m)| (f, m))
        .unzip();
    Spectrum {
        frequencies,
        magnitudes,
    }
}

/// Rescale to `[0, 1]`. A constant series maps to all zeros.
pub fn minmax_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range.abs() < f64::EPSILON {
        vec![0.0; values.len()]
    } else {
        values.iter().map(|&v| (v - min) / range).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::spectrum::analyze;

    #[test]
    fn positive_half_drops_negative_bins() {
        let full = analyze(&[1.0, 3.0, 2.0, 5.0, 4.0, 0.0, 1.0, 2.0], 0.005).unwrap();
        let half = positive_half(&full);
        assert_eq!(half.len(), 4);
        for (got, want) in half.frequencies.iter().zip([0.0, 25.0, 50.0, 75.0]) {
            approx::assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
        assert_eq!(half.magnitudes, full.magnitudes[..4].to_vec());
    }

    #[test]
    fn minmax_scaling() {
        assert_eq!(minmax_scale(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
        assert_eq!(minmax_scale(&[7.0, 7.0]), vec![0.0, 0.0]);
        assert!(minmax_scale(&[]).is_empty());
    }
}
