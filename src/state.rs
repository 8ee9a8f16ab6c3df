use crate::data::aggregate::{ChartBundle, build_charts};
use crate::data::filter::filtered_indices;
use crate::data::insight::{Insight, build_insights, next_insight};
use crate::data::model::{EvDataset, EvRecord, FilterCriteria, FilterKey};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `visible_indices`, `charts`, and `insights` are caches derived from
/// `dataset` + `criteria`; every mutation of the criteria goes through
/// [`DashboardState::rederive`] so the three never drift apart.
pub struct DashboardState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<EvDataset>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria, in dataset order.
    pub visible_indices: Vec<usize>,

    /// The six grouped summaries for the visible records.
    pub charts: ChartBundle,

    /// Rotating banner entries for the visible records.
    pub insights: Vec<Insight>,

    /// Which insight the banner currently shows.
    pub active_insight: usize,

    /// Whether the filter side panel is expanded.
    pub show_filters: bool,

    /// Theme flag, persisted across runs.
    pub dark_mode: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            charts: ChartBundle::default(),
            insights: Vec::new(),
            active_insight: 0,
            show_filters: false,
            dark_mode: true,
            status_message: None,
            loading: false,
        }
    }
}

impl DashboardState {
    /// Ingest a newly loaded dataset. Criteria reset to empty so the new
    /// data starts fully visible; stale selections from the previous file
    /// would otherwise filter against values that no longer exist.
    pub fn set_dataset(&mut self, dataset: EvDataset) {
        self.dataset = Some(dataset);
        self.criteria = FilterCriteria::default();
        self.active_insight = 0;
        self.status_message = None;
        self.loading = false;
        self.rederive();
    }

    /// Set one criteria value and recompute everything downstream.
    pub fn update_filter(&mut self, key: FilterKey, value: String) {
        self.criteria.set(key, value);
        self.rederive();
    }

    /// Reset all criteria to empty and recompute.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.rederive();
    }

    /// Recompute visible indices, chart bundle, and insights from the
    /// current dataset + criteria.
    pub fn rederive(&mut self) {
        match &self.dataset {
            Some(ds) => {
                self.visible_indices = filtered_indices(ds, &self.criteria);
                self.charts =
                    build_charts(self.visible_indices.iter().map(|&i| &ds.records[i]));
                self.insights = build_insights(
                    self.visible_indices.iter().map(|&i| &ds.records[i]),
                    &self.charts,
                );
            }
            None => {
                self.visible_indices = Vec::new();
                self.charts = ChartBundle::default();
                self.insights = Vec::new();
            }
        }
        if self.active_insight >= self.insights.len() {
            self.active_insight = 0;
        }
    }

    /// Move the banner to the next insight, wrapping around.
    pub fn advance_insight(&mut self) {
        self.active_insight = next_insight(self.active_insight, self.insights.len());
    }

    /// The records passing the current criteria, in dataset order.
    pub fn visible_records(&self) -> impl Iterator<Item = &EvRecord> {
        let records = self
            .dataset
            .as_ref()
            .map(|ds| ds.records.as_slice())
            .unwrap_or(&[]);
        self.visible_indices.iter().map(move |&i| &records[i])
    }

    /// How many records the dataset holds in total.
    pub fn total_count(&self) -> usize {
        self.dataset.as_ref().map_or(0, |ds| ds.len())
    }

    /// How many records pass the current criteria.
    pub fn matching_count(&self) -> usize {
        self.visible_indices.len()
    }
}
