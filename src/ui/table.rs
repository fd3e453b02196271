use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Dimension, Record};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

fn score(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_default()
}

/// Collapsible table listing the records behind the charts.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let view = state.view();
    egui::CollapsingHeader::new(format!("Records ({})", view.len()))
        .id_salt("records_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let rows: Vec<&Record> = view.iter().collect();
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(400.0)
                .columns(Column::auto().at_least(60.0), Dimension::ALL.len())
                .columns(Column::auto().at_least(60.0), 3)
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    for dim in Dimension::ALL {
                        header.col(|ui| {
                            ui.strong(dim.label());
                        });
                    }
                    for name in ["Intensity", "Relevance", "Likelihood", "Title"] {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let record = rows[row.index()];
                        for dim in Dimension::ALL {
                            row.col(|ui| {
                                ui.label(record.dimension_text(dim).unwrap_or_default());
                            });
                        }
                        for value in [record.intensity, record.relevance, record.likelihood] {
                            row.col(|ui| {
                                ui.label(score(value));
                            });
                        }
                        row.col(|ui| {
                            let title = record.title.as_deref().unwrap_or_default();
                            match &record.url {
                                Some(url) if !url.is_empty() => {
                                    ui.hyperlink_to(title, url);
                                }
                                _ => {
                                    ui.label(title);
                                }
                            }
                        });
                    });
                });
        });
}
