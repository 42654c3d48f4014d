use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::data::compare::LabeledSeries;
use crate::data::filter::{minmax_scale, positive_half};
use crate::data::model::Spectrum;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Comparison plots (central panel)
// ---------------------------------------------------------------------------

/// Render the time-domain plot above the frequency-domain plot.
pub fn comparison_plots(ui: &mut Ui, state: &AppState) {
    let comparison = match &state.comparison {
        Some(c) => c,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset and press Compare  (File → Open dataset…)");
            });
            return;
        }
    };

    ui.strong(format!("{}  ·  {}", comparison.subject, comparison.placement));

    let half = (ui.available_height() - ui.spacing().item_spacing.y) / 2.0;

    let line = |series: &LabeledSeries, x: &[f64], y: &[f64]| {
        let points: PlotPoints = scaled_points(state, x, y).into();
        Line::new(points)
            .name(&series.label)
            .color(state.colors.color_for(&series.condition))
            .width(1.5)
    };

    Plot::new("time_plot")
        .height(half)
        .legend(Legend::default())
        .x_axis_label("Time (s)")
        .y_axis_label("Amplitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &comparison.time_domain {
                plot_ui.line(line(series, &series.x, &series.y));
            }
        });

    Plot::new("frequency_plot")
        .height(half)
        .legend(Legend::default())
        .x_axis_label("Frequency (Hz)")
        .y_axis_label("Magnitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &comparison.frequency_domain {
                if state.positive_only {
                    let one_sided = positive_half(&Spectrum {
                        frequencies: series.x.clone(),
                        magnitudes: series.y.clone(),
                    });
                    plot_ui.line(line(series, &one_sided.frequencies, &one_sided.magnitudes));
                } else {
                    // Bin order wraps to negative frequencies; sort for a
                    // continuous line.
                    let mut points: Vec<(f64, f64)> =
                        series.x.iter().copied().zip(series.y.iter().copied()).collect();
                    points.sort_by(|a, b| a.0.total_cmp(&b.0));
                    let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
                    plot_ui.line(line(series, &x, &y));
                }
            }
        });
}

/// Pair up `x` and `y`, applying min-max scaling to `y` when enabled.
fn scaled_points(state: &AppState, x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    let y_values = if state.minmax_scaling {
        minmax_scale(y)
    } else {
        y.to_vec()
    };

    x.iter()
        .zip(y_values.iter())
        .map(|(&xi, &yi)| [xi, yi])
        .collect()
}
