use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Dimension – one filterable attribute of a record
// ---------------------------------------------------------------------------

/// The seven filterable dimensions, in the order the filter panel shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    EndYear,
    Topic,
    Region,
    Country,
    Pestle,
    Source,
    Sector,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::EndYear,
        Dimension::Topic,
        Dimension::Region,
        Dimension::Country,
        Dimension::Pestle,
        Dimension::Source,
        Dimension::Sector,
    ];

    /// Field name used by the data source.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::EndYear => "end_year",
            Dimension::Topic => "topic",
            Dimension::Region => "region",
            Dimension::Country => "country",
            Dimension::Pestle => "pestle",
            Dimension::Source => "source",
            Dimension::Sector => "sector",
        }
    }

    /// Human readable label for widgets.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::EndYear => "End year",
            Dimension::Topic => "Topic",
            Dimension::Region => "Region",
            Dimension::Country => "Country",
            Dimension::Pestle => "PESTLE",
            Dimension::Source => "Source",
            Dimension::Sector => "Sector",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single dataset row. Every attribute may be absent in the source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub end_year: Option<i64>,
    pub topic: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub pestle: Option<String>,
    pub source: Option<String>,
    pub sector: Option<String>,
    pub intensity: Option<f64>,
    pub relevance: Option<f64>,
    pub likelihood: Option<f64>,
    /// Descriptive columns, shown in the record table only.
    pub title: Option<String>,
    pub insight: Option<String>,
    pub url: Option<String>,
}

impl Record {
    /// Value of a dimension as text, the form filters and grouping compare on.
    ///
    /// Years are rendered in decimal; missing values yield `None`.
    pub fn dimension_text(&self, dim: Dimension) -> Option<String> {
        match dim {
            Dimension::EndYear => self.end_year.map(|y| y.to_string()),
            other => self.categorical(other).map(str::to_string),
        }
    }

    /// Borrow a categorical dimension. `EndYear` is numeric and yields `None`.
    pub fn categorical(&self, dim: Dimension) -> Option<&str> {
        let value = match dim {
            Dimension::EndYear => return None,
            Dimension::Topic => &self.topic,
            Dimension::Region => &self.region,
            Dimension::Country => &self.country,
            Dimension::Pestle => &self.pestle,
            Dimension::Source => &self.source,
            Dimension::Sector => &self.sector,
        };
        value.as_deref()
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Never appended to; a new load replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        RecordStore { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterOptions – selectable values per dimension
// ---------------------------------------------------------------------------

/// Sorted, deduplicated choices for every dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    values: BTreeMap<Dimension, Vec<String>>,
}

impl FilterOptions {
    pub(crate) fn from_map(values: BTreeMap<Dimension, Vec<String>>) -> Self {
        FilterOptions { values }
    }

    /// Choices for one dimension; empty if the dataset had none.
    pub fn get(&self, dim: Dimension) -> &[String] {
        self.values.get(&dim).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_text_renders_year_and_categoricals() {
        let record = Record {
            end_year: Some(2027),
            region: Some("Asia".into()),
            ..Record::default()
        };
        assert_eq!(record.dimension_text(Dimension::EndYear).as_deref(), Some("2027"));
        assert_eq!(record.dimension_text(Dimension::Region).as_deref(), Some("Asia"));
        assert_eq!(record.dimension_text(Dimension::Country), None);
        assert_eq!(record.categorical(Dimension::EndYear), None);
    }

    #[test]
    fn missing_options_are_empty_slices() {
        let options = FilterOptions::default();
        for dim in Dimension::ALL {
            assert!(options.get(dim).is_empty());
        }
    }
}
