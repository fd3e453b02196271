use rusty_dashboard::data::aggregate::{
    ChartData, region_distribution, relevance_by_year, topic_frequency,
};
use rusty_dashboard::data::filter::{FilterCriteria, FilteredView, apply_filters, filtered_indices};
use rusty_dashboard::data::model::{Dimension, Record};
use rusty_dashboard::data::options::derive_options;

fn scenario() -> Vec<Record> {
    vec![
        Record {
            end_year: Some(2020),
            topic: Some("energy".into()),
            region: Some("Asia".into()),
            country: Some("China".into()),
            pestle: Some("P".into()),
            source: Some("S1".into()),
            sector: Some("Tech".into()),
            intensity: Some(5.0),
            relevance: Some(3.0),
            likelihood: Some(40.0),
            ..Record::default()
        },
        Record {
            end_year: Some(2021),
            topic: Some("energy".into()),
            region: Some("Europe".into()),
            country: Some("France".into()),
            pestle: Some("P".into()),
            source: Some("S2".into()),
            sector: Some("Tech".into()),
            intensity: Some(7.0),
            relevance: Some(4.0),
            likelihood: Some(60.0),
            ..Record::default()
        },
    ]
}

/// A wider store with gaps, for the law checks.
fn mixed_store() -> Vec<Record> {
    let topics = [Some("oil"), Some("Gas"), None, Some("oil and gas")];
    let regions = [Some("Asia"), Some("Europe"), Some(""), None];
    (0..24)
        .map(|i| Record {
            end_year: if i % 5 == 0 { None } else { Some(2018 + (i % 4) as i64) },
            topic: topics[i % topics.len()].map(str::to_string),
            region: regions[(i / 2) % regions.len()].map(str::to_string),
            country: Some(if i % 3 == 0 { "India" } else { "Indonesia" }.to_string()),
            likelihood: Some((i % 4) as f64),
            ..Record::default()
        })
        .collect()
}

fn criteria_grid() -> Vec<FilterCriteria> {
    let mut grid = vec![FilterCriteria::default()];
    for year in ["2018", "2019", "201", "1999"] {
        grid.push(FilterCriteria::default().with(Dimension::EndYear, year));
    }
    for topic in ["oil", "GAS", "and", "coal"] {
        grid.push(FilterCriteria::default().with(Dimension::Topic, topic));
        grid.push(
            FilterCriteria::default()
                .with(Dimension::Topic, topic)
                .with(Dimension::Country, "indo"),
        );
    }
    grid.push(
        FilterCriteria::default()
            .with(Dimension::Region, "asia")
            .with(Dimension::EndYear, "2019"),
    );
    grid
}

fn satisfies(record: &Record, criteria: &FilterCriteria) -> bool {
    Dimension::ALL.iter().all(|&dim| {
        let wanted = criteria.get(dim);
        if wanted.is_empty() {
            return true;
        }
        match record.dimension_text(dim) {
            None => false,
            Some(value) if dim == Dimension::EndYear => value == wanted,
            Some(value) => value.to_lowercase().contains(&wanted.to_lowercase()),
        }
    })
}

#[test]
fn case_mismatch_still_matches_by_substring() {
    let records = scenario();
    let criteria = FilterCriteria::default().with(Dimension::Topic, "ENERGY");
    assert_eq!(apply_filters(&records, &criteria).len(), 2);
}

#[test]
fn year_filter_selects_exactly_the_first_record() {
    let records = scenario();
    let criteria = FilterCriteria::default().with(Dimension::EndYear, "2020");
    let view = apply_filters(&records, &criteria);
    let kept: Vec<&Record> = view.iter().collect();
    assert_eq!(kept, vec![&records[0]]);
}

#[test]
fn region_distribution_of_unfiltered_scenario() {
    let records = scenario();
    let counts = region_distribution(&FilteredView::all(&records));
    assert_eq!(
        counts.entries,
        vec![("Asia".to_string(), 1), ("Europe".to_string(), 1)]
    );
}

#[test]
fn relevance_by_year_of_unfiltered_scenario() {
    let records = scenario();
    let series = relevance_by_year(&FilteredView::all(&records));
    assert_eq!(series.labels, vec!["2020".to_string(), "2021".to_string()]);
    assert_eq!(series.values, vec![Some(3.0), Some(4.0)]);
}

#[test]
fn topic_frequency_of_unfiltered_scenario() {
    let records = scenario();
    let counts = topic_frequency(&FilteredView::all(&records));
    assert_eq!(counts.entries, vec![("energy".to_string(), 2)]);
}

#[test]
fn likelihood_mean_of_forty_and_sixty_is_fifty() {
    let mut records = scenario();
    records[1].country = Some("China".into());
    let charts = ChartData::from_view(&FilteredView::all(&records));
    assert_eq!(charts.likelihood_by_country.len(), 1);
    assert_eq!(charts.likelihood_by_country[0].country, "China");
    assert_eq!(charts.likelihood_by_country[0].mean, Some(50.0));
}

#[test]
fn empty_criteria_is_identity() {
    let records = mixed_store();
    let view = apply_filters(&records, &FilterCriteria::default());
    let kept: Vec<&Record> = view.iter().collect();
    let all: Vec<&Record> = records.iter().collect();
    assert_eq!(kept, all);
}

#[test]
fn filtering_is_sound_complete_and_idempotent() {
    let records = mixed_store();
    for criteria in criteria_grid() {
        let indices = filtered_indices(&records, &criteria);

        // Order preserved, subset of the store.
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|&i| i < records.len()));

        for (i, record) in records.iter().enumerate() {
            assert_eq!(
                indices.contains(&i),
                satisfies(record, &criteria),
                "record {i} under {criteria:?}"
            );
        }

        let once: Vec<Record> = apply_filters(&records, &criteria).iter().cloned().collect();
        let twice = filtered_indices(&once, &criteria);
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }
}

#[test]
fn group_counts_sum_to_view_length() {
    let records = mixed_store();
    for criteria in criteria_grid() {
        let view = apply_filters(&records, &criteria);
        assert_eq!(region_distribution(&view).total(), view.len());
        assert_eq!(topic_frequency(&view).total(), view.len());
    }
}

#[test]
fn options_cover_every_matching_criterion_value() {
    let records = mixed_store();
    let options = derive_options(&records);
    for dim in Dimension::ALL {
        for value in options.get(dim) {
            let criteria = FilterCriteria::default().with(dim, value.clone());
            assert!(
                !apply_filters(&records, &criteria).is_empty(),
                "option {value:?} for {dim} matches nothing"
            );
        }
    }
}

#[test]
fn aggregation_does_not_touch_the_store() {
    let records = mixed_store();
    let before = records.clone();
    let view = apply_filters(&records, &FilterCriteria::default().with(Dimension::Topic, "oil"));
    let _ = ChartData::from_view(&view);
    assert_eq!(records, before);
}
