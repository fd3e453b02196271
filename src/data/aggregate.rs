//! Chart projections over a [`FilteredView`].
//!
//! Every aggregator is a pure function of the view. Grouping aggregators
//! list their groups in first-occurrence order, and records missing the
//! grouping key fall into the `""` group, so counts always add up to the
//! view length.

use std::collections::HashMap;

use super::filter::FilteredView;
use super::model::{Dimension, Record};

// ---------------------------------------------------------------------------
// Chart data structures
// ---------------------------------------------------------------------------

/// One point per record: year label with an index-aligned score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Record counts per distinct category value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    pub entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

/// A single-point bubble series for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub label: String,
    /// 1-based position of the source among distinct sources.
    pub x: usize,
    pub count: usize,
    pub radius: usize,
}

/// Mean likelihood for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMean {
    pub country: String,
    /// `None` when none of the country's records carry a likelihood.
    pub mean: Option<f64>,
}

/// All six projections for one filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub intensity_by_year: YearSeries,
    pub relevance_by_year: YearSeries,
    pub region_distribution: CategoryCounts,
    pub topic_frequency: CategoryCounts,
    pub source_bubbles: Vec<Bubble>,
    pub likelihood_by_country: Vec<CountryMean>,
}

impl ChartData {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        ChartData {
            intensity_by_year: intensity_by_year(view),
            relevance_by_year: relevance_by_year(view),
            region_distribution: region_distribution(view),
            topic_frequency: topic_frequency(view),
            source_bubbles: source_bubbles(view),
            likelihood_by_country: likelihood_by_country(view),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

fn year_series(view: &FilteredView<'_>, score: impl Fn(&Record) -> Option<f64>) -> YearSeries {
    let (labels, values) = view
        .iter()
        .map(|r| (r.dimension_text(Dimension::EndYear).unwrap_or_default(), score(r)))
        .unzip();
    YearSeries { labels, values }
}

pub fn intensity_by_year(view: &FilteredView<'_>) -> YearSeries {
    year_series(view, |r| r.intensity)
}

pub fn relevance_by_year(view: &FilteredView<'_>) -> YearSeries {
    year_series(view, |r| r.relevance)
}

/// Group the view on a categorical dimension, keeping first-seen order.
fn group_by<'a>(view: &FilteredView<'a>, dim: Dimension) -> Vec<(String, Vec<&'a Record>)> {
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a Record>)> = Vec::new();
    for record in view.iter() {
        let key = record.categorical(dim).unwrap_or("");
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push((key.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }
    groups
}

fn count_by(view: &FilteredView<'_>, dim: Dimension) -> CategoryCounts {
    CategoryCounts {
        entries: group_by(view, dim)
            .into_iter()
            .map(|(label, members)| (label, members.len()))
            .collect(),
    }
}

pub fn region_distribution(view: &FilteredView<'_>) -> CategoryCounts {
    count_by(view, Dimension::Region)
}

pub fn topic_frequency(view: &FilteredView<'_>) -> CategoryCounts {
    count_by(view, Dimension::Topic)
}

pub fn source_bubbles(view: &FilteredView<'_>) -> Vec<Bubble> {
    count_by(view, Dimension::Source)
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| Bubble {
            label,
            x: i + 1,
            count,
            radius: count * 2,
        })
        .collect()
}

pub fn likelihood_by_country(view: &FilteredView<'_>) -> Vec<CountryMean> {
    group_by(view, Dimension::Country)
        .into_iter()
        .map(|(country, members)| {
            let scores: Vec<f64> = members.iter().filter_map(|r| r.likelihood).collect();
            let mean = if scores.is_empty() {
                None
            } else {
                Some(scores.iter().sum::<f64>() / scores.len() as f64)
            };
            CountryMean { country, mean }
        })
        .collect()
}
