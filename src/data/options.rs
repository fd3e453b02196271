use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, FilterOptions, Record};

/// Collect the distinct values of every dimension across the whole dataset.
///
/// Strings sort lexicographically, years numerically. Missing and empty
/// values are not offered: the "no constraint" choice stands in for them.
pub fn derive_options(records: &[Record]) -> FilterOptions {
    let mut years: BTreeSet<i64> = BTreeSet::new();
    let mut text: BTreeMap<Dimension, BTreeSet<&str>> = BTreeMap::new();

    for record in records {
        if let Some(year) = record.end_year {
            years.insert(year);
        }
        for dim in Dimension::ALL {
            if let Some(value) = record.categorical(dim).filter(|v| !v.is_empty()) {
                text.entry(dim).or_default().insert(value);
            }
        }
    }

    let mut values: BTreeMap<Dimension, Vec<String>> = Dimension::ALL
        .iter()
        .map(|&dim| (dim, Vec::new()))
        .collect();
    values.insert(
        Dimension::EndYear,
        years.into_iter().map(|y| y.to_string()).collect(),
    );
    for (dim, set) in text {
        values.insert(dim, set.into_iter().map(str::to_string).collect());
    }

    FilterOptions::from_map(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: Option<i64>, topic: &str) -> Record {
        Record {
            end_year: year,
            topic: Some(topic.to_string()),
            ..Record::default()
        }
    }

    #[test]
    fn years_sort_numerically_not_lexically() {
        let records = vec![
            record(Some(2100), "oil"),
            record(Some(205), "gas"),
            record(Some(2030), "oil"),
            record(None, "gas"),
        ];
        let options = derive_options(&records);
        assert_eq!(options.get(Dimension::EndYear), ["205", "2030", "2100"]);
    }

    #[test]
    fn strings_are_deduplicated_and_sorted() {
        let records = vec![record(None, "oil"), record(None, "gas"), record(None, "oil")];
        let options = derive_options(&records);
        assert_eq!(options.get(Dimension::Topic), ["gas", "oil"]);
        assert!(options.get(Dimension::Region).is_empty());
    }

    #[test]
    fn empty_strings_are_not_offered() {
        let records = vec![record(None, ""), record(None, "market")];
        let options = derive_options(&records);
        assert_eq!(options.get(Dimension::Topic), ["market"]);
    }

    #[test]
    fn empty_input_yields_empty_options() {
        let options = derive_options(&[]);
        for dim in Dimension::ALL {
            assert!(options.get(dim).is_empty(), "{dim} should be empty");
        }
    }
}
