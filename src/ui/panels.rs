use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Placement;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – subject, placement and condition selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Subject");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let subjects = dataset.registry.subjects().to_vec();

    // ---- Subject search ----
    let mut submitted = false;
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.subject_query)
                .hint_text("S01")
                .desired_width(80.0),
        );
        submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.small_button("Go").clicked() {
            submitted = true;
        }
    });
    if submitted {
        let query = state.subject_query.clone();
        state.select_subject(&query);
    }

    ScrollArea::vertical()
        .id_salt("subjects")
        .max_height(160.0)
        .show(ui, |ui: &mut Ui| {
            for (i, subject) in subjects.iter().enumerate() {
                let selected = state.selected_subject == Some(i);
                if ui.selectable_label(selected, subject.id()).clicked() {
                    state.selected_subject = Some(i);
                }
            }
        });

    if let Some(subject) = state.selected_subject.and_then(|i| subjects.get(i)) {
        egui::CollapsingHeader::new("Details")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(subject.to_string()).monospace());
            });
    }
    ui.separator();

    // ---- Placement selector ----
    ui.strong("Placement");
    egui::ComboBox::from_id_salt("placement")
        .selected_text(state.placement.label())
        .show_ui(ui, |ui: &mut Ui| {
            for placement in Placement::ALL {
                ui.selectable_value(&mut state.placement, placement, placement.label());
            }
        });
    ui.separator();

    // ---- Conditions ----
    ui.strong("Conditions");
    let colors = state.colors.clone();
    for (condition, enabled) in &mut state.conditions {
        let text = RichText::new(condition.label()).color(colors.color_for(condition));
        ui.checkbox(enabled, text);
    }
    ui.separator();

    if ui.button("Compare").clicked() {
        state.run_comparison();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} subjects, {} trim records",
                state.config.dataset_root.display(),
                ds.registry.len(),
                ds.loader.trim_table().len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.positive_only, "Positive frequencies")
            .clicked()
        {
            state.positive_only = !state.positive_only;
        }

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open EEG dataset folder")
        .set_directory(&state.config.dataset_root)
        .pick_folder();

    if let Some(path) = folder {
        state.open_dataset(&path);
    }
}
