use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::{AppState, LoadState};

/// Requests from the panels that the app carries out after drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenFile(PathBuf),
    ReloadFromUrl,
    ExportCsv(PathBuf),
}

const NO_CONSTRAINT: &str = "Select...";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.store.is_empty() {
        ui.label(if state.loading {
            "Loading..."
        } else {
            "No dataset loaded."
        });
        return;
    }

    let mut change: Option<(Dimension, String)> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let current = state.criteria.get(dim);
                let choices = state.options.get(dim);

                ui.strong(format!("{dim}  ({})", choices.len()));
                let selected_text = if current.is_empty() {
                    NO_CONSTRAINT
                } else {
                    current
                };
                egui::ComboBox::from_id_salt(dim.key())
                    .selected_text(selected_text)
                    .width(ui.available_width())
                    .show_ui(ui, |ui: &mut Ui| {
                        if ui
                            .selectable_label(current.is_empty(), NO_CONSTRAINT)
                            .clicked()
                        {
                            change = Some((dim, String::new()));
                        }
                        for choice in choices {
                            if ui.selectable_label(current == choice.as_str(), choice).clicked() {
                                change = Some((dim, choice.clone()));
                            }
                        }
                    });
                ui.add_space(4.0);
            }

            ui.separator();
            if ui
                .add_enabled(!state.criteria.is_empty(), egui::Button::new("Clear filters"))
                .clicked()
            {
                state.clear_filters();
            }
        });

    if let Some((dim, value)) = change {
        log::debug!("Filter {dim} set to {value:?}");
        state.set_filter(dim, value);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> Option<UiAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.loading, egui::Button::new("Open…"))
                .clicked()
            {
                action = open_file_dialog().map(UiAction::OpenFile);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.loading, egui::Button::new("Reload from URL"))
                .clicked()
            {
                action = Some(UiAction::ReloadFromUrl);
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    !state.visible_indices.is_empty(),
                    egui::Button::new("Export filtered CSV…"),
                )
                .clicked()
            {
                action = save_file_dialog().map(UiAction::ExportCsv);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.load_state {
            LoadState::Idle => {}
            LoadState::Loading { source } => {
                ui.spinner();
                ui.label(format!("Loading {source}…"));
            }
            LoadState::Loaded { source, skipped } => {
                ui.label(format!(
                    "{} records, {} matching",
                    state.store.len(),
                    state.visible_indices.len()
                ))
                .on_hover_text(source.as_str());
                if *skipped > 0 {
                    ui.label(
                        RichText::new(format!("{skipped} malformed rows skipped"))
                            .color(Color32::YELLOW),
                    );
                }
            }
            LoadState::Failed { .. } => {}
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

fn save_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export filtered records")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered.csv")
        .save_file()
}
