use crate::data::aggregate::ChartData;
use crate::data::error::FetchError;
use crate::data::filter::{FilterCriteria, FilteredView, filtered_indices};
use crate::data::loader::LoadReport;
use crate::data::model::{Dimension, FilterOptions, RecordStore};
use crate::data::options::derive_options;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the current dataset came from, or why there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading { source: String },
    Loaded { source: String, skipped: usize },
    Failed { source: String, message: String },
}

/// The full dashboard state, independent of rendering.
///
/// Every mutation goes through a method that keeps the derived fields
/// (`options`, `visible_indices`, `charts`) consistent with the store and
/// criteria.
pub struct AppState {
    /// Loaded records. Replaced wholesale by each load.
    pub store: RecordStore,

    /// Choices per dimension, derived once per load.
    pub options: FilterOptions,

    /// Active criteria.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Chart projections of the visible records (cached).
    pub charts: ChartData,

    pub load_state: LoadState,

    /// Whether a load is in flight.
    pub loading: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: RecordStore::default(),
            options: FilterOptions::default(),
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            charts: ChartData::default(),
            load_state: LoadState::Idle,
            loading: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Mark a load as started. Refused while another load is in flight.
    pub fn begin_load(&mut self, source: &str) -> bool {
        if self.loading {
            log::warn!("Ignoring load of {source}: another load is in flight");
            self.status_message = Some(format!("Still loading; {source} was not opened"));
            return false;
        }
        self.loading = true;
        self.status_message = None;
        self.load_state = LoadState::Loading {
            source: source.to_string(),
        };
        true
    }

    /// Apply the outcome of the load started by [`AppState::begin_load`].
    pub fn finish_load(&mut self, source: &str, result: Result<LoadReport, FetchError>) {
        match result {
            Ok(report) => {
                log::info!(
                    "Loaded {} records from {source} ({} skipped)",
                    report.store.len(),
                    report.skipped.len()
                );
                self.load_state = LoadState::Loaded {
                    source: source.to_string(),
                    skipped: report.skipped.len(),
                };
                self.set_dataset(report.store);
            }
            Err(e) => {
                log::error!("Error fetching data from {source}: {e}");
                self.set_dataset(RecordStore::default());
                self.status_message = Some(format!("Error: {e}"));
                self.load_state = LoadState::Failed {
                    source: source.to_string(),
                    message: e.to_string(),
                };
            }
        }
        self.loading = false;
    }

    /// Ingest a new store: derive options and rebuild the view.
    ///
    /// Criteria survive the swap so a reload keeps the user's selection.
    pub fn set_dataset(&mut self, store: RecordStore) {
        self.options = derive_options(store.records());
        self.store = store;
        self.refilter();
    }

    /// Set one dimension's criterion (empty clears it) and refilter.
    pub fn set_filter(&mut self, dim: Dimension, value: impl Into<String>) {
        self.criteria.set(dim, value);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.refilter();
    }

    /// Recompute `visible_indices` and `charts` after any change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.store.records(), &self.criteria);
        let charts = ChartData::from_view(&self.view());
        self.charts = charts;
    }

    /// The current filtered view, borrowed from the store.
    pub fn view(&self) -> FilteredView<'_> {
        let records = self.store.records();
        FilteredView::new(self.visible_indices.iter().map(|&i| &records[i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn store() -> RecordStore {
        RecordStore::new(vec![
            Record {
                end_year: Some(2020),
                topic: Some("oil".into()),
                ..Record::default()
            },
            Record {
                end_year: Some(2021),
                topic: Some("gas".into()),
                ..Record::default()
            },
        ])
    }

    #[test]
    fn set_filter_updates_view_and_charts() {
        let mut state = AppState::default();
        state.set_dataset(store());
        assert_eq!(state.view().len(), 2);

        state.set_filter(Dimension::Topic, "OIL");
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.charts.intensity_by_year.labels, vec!["2020".to_string()]);

        state.clear_filters();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn options_are_not_recomputed_on_filter_change() {
        let mut state = AppState::default();
        state.set_dataset(store());
        let before = state.options.clone();
        state.set_filter(Dimension::EndYear, "2021");
        assert_eq!(state.options, before);
        assert_eq!(state.options.get(Dimension::EndYear), ["2020", "2021"]);
    }

    #[test]
    fn second_load_is_refused_while_loading() {
        let mut state = AppState::default();
        assert!(state.begin_load("a"));
        assert!(!state.begin_load("b"));
        assert_eq!(
            state.load_state,
            LoadState::Loading {
                source: "a".into()
            }
        );
        let status = state.status_message.as_deref().unwrap_or_default();
        assert!(status.contains('b'), "refusal not reported: {status:?}");

        state.finish_load("a", Ok(LoadReport::default()));
        assert!(state.begin_load("b"));
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn reload_replaces_store_and_keeps_criteria() {
        let mut state = AppState::default();
        state.set_dataset(store());
        state.set_filter(Dimension::Topic, "gas");

        state.set_dataset(RecordStore::new(vec![Record {
            topic: Some("natural gas".into()),
            ..Record::default()
        }]));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.criteria.get(Dimension::Topic), "gas");
    }
}
