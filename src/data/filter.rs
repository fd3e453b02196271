use std::collections::BTreeMap;

use super::model::{Dimension, Record};

// ---------------------------------------------------------------------------
// Filter criteria: the active value per dimension
// ---------------------------------------------------------------------------

/// Per-dimension criterion values. Absent or blank means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    values: BTreeMap<Dimension, String>,
}

impl FilterCriteria {
    /// Set (or clear, with an empty value) the criterion for a dimension.
    pub fn set(&mut self, dim: Dimension, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&dim);
        } else {
            self.values.insert(dim, value);
        }
    }

    /// Builder form of [`FilterCriteria::set`].
    pub fn with(mut self, dim: Dimension, value: impl Into<String>) -> Self {
        self.set(dim, value);
        self
    }

    /// Current value for a dimension, `""` when unconstrained.
    pub fn get(&self, dim: Dimension) -> &str {
        self.values.get(&dim).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Whether no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Active criteria with their compiled matchers.
    fn active(&self) -> Vec<(Dimension, Matcher)> {
        self.values
            .iter()
            .map(|(&dim, value)| (dim, Matcher::new(dim.strategy(), value.trim())))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Rule table: how each dimension compares
// ---------------------------------------------------------------------------

/// Comparison applied between a record value and a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Textual equality.
    Exact,
    /// Case-insensitive substring containment.
    ContainsIgnoreCase,
}

impl Dimension {
    pub fn strategy(self) -> MatchStrategy {
        match self {
            Dimension::EndYear => MatchStrategy::Exact,
            Dimension::Topic
            | Dimension::Region
            | Dimension::Country
            | Dimension::Pestle
            | Dimension::Source
            | Dimension::Sector => MatchStrategy::ContainsIgnoreCase,
        }
    }
}

/// A criterion prepared once per filter pass (needle lower-cased up front).
struct Matcher {
    strategy: MatchStrategy,
    needle: String,
}

impl Matcher {
    fn new(strategy: MatchStrategy, value: &str) -> Self {
        let needle = match strategy {
            MatchStrategy::Exact => value.to_string(),
            MatchStrategy::ContainsIgnoreCase => value.to_lowercase(),
        };
        Matcher { strategy, needle }
    }

    /// A missing record value never satisfies an active criterion.
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self.strategy {
            MatchStrategy::Exact => value == self.needle,
            MatchStrategy::ContainsIgnoreCase => value.to_lowercase().contains(&self.needle),
        }
    }
}

fn record_matches(record: &Record, matchers: &[(Dimension, Matcher)]) -> bool {
    matchers.iter().all(|(dim, matcher)| match dim {
        Dimension::EndYear => matcher.matches(record.dimension_text(*dim).as_deref()),
        other => matcher.matches(record.categorical(*other)),
    })
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Records satisfying every active criterion, in store order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn new(records: Vec<&'a Record>) -> Self {
        FilteredView { records }
    }

    /// A view over every record in `records`.
    pub fn all(records: &'a [Record]) -> Self {
        FilteredView {
            records: records.iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keep the records matching all active criteria (logical AND).
pub fn apply_filters<'a>(records: &'a [Record], criteria: &FilterCriteria) -> FilteredView<'a> {
    let matchers = criteria.active();
    FilteredView::new(
        records
            .iter()
            .filter(|record| record_matches(record, &matchers))
            .collect(),
    )
}

/// Return indices of records that pass all active criteria.
pub fn filtered_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    let matchers = criteria.active();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record_matches(record, &matchers))
        .map(|(i, _)| i)
        .collect()
}
