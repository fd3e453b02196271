use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;

/// Write the filtered records to a CSV file with a header row.
///
/// Returns the number of records written.
pub fn export_csv(view: &FilteredView<'_>, path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for record in view.iter() {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(view.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::Record;

    #[test]
    fn exported_csv_loads_back() {
        let records = vec![
            Record {
                end_year: Some(2020),
                topic: Some("oil".into()),
                intensity: Some(6.0),
                ..Record::default()
            },
            Record {
                region: Some("Northern America".into()),
                likelihood: Some(2.5),
                ..Record::default()
            },
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");

        let written = export_csv(&FilteredView::all(&records), &path).unwrap();
        assert_eq!(written, 2);

        let report = load_file(&path).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.store.records(), records.as_slice());
    }

    #[test]
    fn numeric_looking_text_survives_export() {
        let records = vec![Record {
            topic: Some("007".into()),
            source: Some("NaN".into()),
            country: Some("inf".into()),
            sector: Some("1e3".into()),
            ..Record::default()
        }];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.csv");

        export_csv(&FilteredView::all(&records), &path).unwrap();
        let report = load_file(&path).unwrap();
        assert_eq!(report.store.records(), records.as_slice());
    }
}
