use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::error::FetchError;
use crate::data::export::export_csv;
use crate::data::loader::LoadReport;
use crate::data::source::{FileSource, HttpSource, RecordSource};
use crate::state::AppState;
use crate::ui::panels::{self, UiAction};
use crate::ui::charts;

/// A load running on a background thread.
struct PendingLoad {
    source: String,
    receiver: Receiver<Result<LoadReport, FetchError>>,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
    pending: Option<PendingLoad>,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::default(),
            config,
            pending: None,
        }
    }

    /// Start fetching from `source` unless a load is already running.
    pub fn start_load(&mut self, source: Box<dyn RecordSource>) {
        let name = source.describe();
        if !self.state.begin_load(&name) {
            return;
        }
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            // The receiver is gone only if the app shut down mid-load.
            let _ = sender.send(source.fetch());
        });
        self.pending = Some(PendingLoad {
            source: name,
            receiver,
        });
    }

    pub fn reload_from_url(&mut self) {
        let source = HttpSource::new(self.config.data_url.clone(), self.config.timeout);
        self.start_load(Box::new(source));
    }

    /// Apply a finished load, if any. Returns `true` when a load completed.
    pub fn poll_load(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(FetchError::Transport(
                "loader thread exited without a result".to_string(),
            )),
        };
        let source = pending.source.clone();
        self.pending = None;
        self.state.finish_load(&source, result);
        true
    }

    fn handle(&mut self, action: UiAction) {
        match action {
            UiAction::OpenFile(path) => self.start_load(Box::new(FileSource { path })),
            UiAction::ReloadFromUrl => self.reload_from_url(),
            UiAction::ExportCsv(path) => {
                let written = export_csv(&self.state.view(), &path);
                match written {
                    Ok(n) => {
                        log::info!("Exported {n} records to {}", path.display());
                        self.state.status_message = None;
                    }
                    Err(e) => {
                        log::error!("Failed to export CSV: {e:#}");
                        self.state.status_message = Some(format!("Error: {e:#}"));
                    }
                }
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();
        if self.state.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        let action = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &self.state))
            .inner;

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::chart_grid(ui, &self.state, &self.config);
        });

        if let Some(action) = action {
            self.handle(action);
        }
    }
}
