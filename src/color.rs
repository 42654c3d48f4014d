use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::compare::Condition;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Condition → Color32
// ---------------------------------------------------------------------------

/// Assigns each selectable condition a fixed colour, so a condition keeps its
/// colour whichever subset is plotted.
#[derive(Debug, Clone, Default)]
pub struct ConditionColors {
    mapping: Vec<(Condition, Color32)>,
}

impl ConditionColors {
    pub fn new(conditions: &[Condition]) -> Self {
        let mapping = conditions
            .iter()
            .copied()
            .zip(generate_palette(conditions.len()))
            .collect();
        ConditionColors { mapping }
    }

    pub fn color_for(&self, condition: &Condition) -> Color32 {
        self.mapping
            .iter()
            .find(|(c, _)| c == condition)
            .map(|(_, color)| *color)
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Experiment;

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn colours_follow_condition_not_position() {
        let a = Condition::segmented(Experiment::NativeBone);
        let b = Condition::segmented(Experiment::NeutralBone);
        let colors = ConditionColors::new(&[a, b]);
        assert_ne!(colors.color_for(&a), colors.color_for(&b));
        assert_eq!(
            colors.color_for(&Condition::segmented(Experiment::EyesOpenResting)),
            Color32::GRAY
        );
    }
}
