use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::{FetchError, RecordError};
use super::model::{Record, RecordStore};

type JsonObject = Map<String, JsonValue>;
type RowResult<T> = std::result::Result<T, RecordError>;

/// Outcome of a successful load: the new store and the rows left out of it.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub store: RecordStore,
    pub skipped: Vec<RecordError>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "end_year": 2020, "topic": "oil", ... }, ...]`
/// * `.csv`     – one column per field, header row required
/// * `.parquet` – flat columns named like the JSON fields
pub fn load_file(path: &Path) -> Result<LoadReport> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse a JSON document holding an array of records.
pub fn records_from_str(text: &str) -> std::result::Result<LoadReport, FetchError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root.as_array().ok_or(FetchError::NotAnArray)?;
    Ok(records_from_rows(rows.iter().enumerate().map(|(i, row)| {
        row.as_object().ok_or(RecordError::NotAnObject { row: i })
    })))
}

/// Convert raw rows to records, skipping (and logging) malformed ones.
fn records_from_rows<'a>(rows: impl Iterator<Item = RowResult<&'a JsonObject>>) -> LoadReport {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (i, row) in rows.enumerate() {
        match row.and_then(|obj| record_from_object(i, obj)) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("Skipping malformed record: {err}");
                skipped.push(err);
            }
        }
    }

    LoadReport {
        store: RecordStore::new(records),
        skipped,
    }
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Build a record from one JSON object.
///
/// Missing, `null` and empty-string fields become `None`. Numeric strings are
/// coerced. A field of any other unexpected shape rejects the whole row.
pub fn record_from_object(row: usize, obj: &JsonObject) -> RowResult<Record> {
    let field = |name: &'static str| obj.get(name).filter(|v| !is_blank(v));
    let text = |name: &'static str| field(name).map(|v| as_text(row, name, v)).transpose();
    let score = |name: &'static str| field(name).map(|v| as_score(row, name, v)).transpose();
    let year = field("end_year").or_else(|| field("endYear"));

    Ok(Record {
        end_year: year.map(|v| as_year(row, v)).transpose()?,
        topic: text("topic")?,
        region: text("region")?,
        country: text("country")?,
        pestle: text("pestle")?,
        source: text("source")?,
        sector: text("sector")?,
        intensity: score("intensity")?,
        relevance: score("relevance")?,
        likelihood: score("likelihood")?,
        title: text("title")?,
        insight: text("insight")?,
        url: text("url")?,
    })
}

fn is_blank(val: &JsonValue) -> bool {
    match val {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn bad_field(
    row: usize,
    field: &'static str,
    expected: &'static str,
    val: &JsonValue,
) -> RecordError {
    RecordError::BadField {
        row,
        field,
        expected,
        found: val.to_string(),
    }
}

/// Integral floats outside the `i64` range are rejected rather than saturated.
fn as_year(row: usize, val: &JsonValue) -> RowResult<i64> {
    let in_range = |f: &f64| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64;
    let parsed = match val {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(in_range).map(|f| f as i64)),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| bad_field(row, "end_year", "an integer year", val))
}

fn as_score(row: usize, field: &'static str, val: &JsonValue) -> RowResult<f64> {
    let parsed = match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| bad_field(row, field, "a number", val))
}

fn as_text(row: usize, field: &'static str, val: &JsonValue) -> RowResult<String> {
    match val {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(bad_field(row, field, "text", other)),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<LoadReport> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    records_from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with field names, one record per row.
/// Cells stay text; the field coercion decides which ones are numbers.
/// Rows that cannot be read, or whose width differs from the header, are
/// skipped like malformed JSON rows.
fn load_csv(path: &Path) -> Result<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<RowResult<JsonObject>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(err).with_context(|| format!("CSV row {row_no}"));
            }
            Err(err) => {
                rows.push(Err(RecordError::Unreadable {
                    row: row_no,
                    message: err.to_string(),
                }));
                continue;
            }
        };
        if record.len() != headers.len() {
            rows.push(Err(RecordError::Unreadable {
                row: row_no,
                message: format!("{} fields, header has {}", record.len(), headers.len()),
            }));
            continue;
        }
        let obj: JsonObject = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), JsonValue::from(cell)))
            .collect();
        rows.push(Ok(obj));
    }

    Ok(records_from_rows(
        rows.iter().map(|row| row.as_ref().map_err(RecordError::clone)),
    ))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat record columns.
///
/// Columns are matched by name (`end_year`, `topic`, ...); unknown columns
/// are ignored. Works with files written by Pandas and Polars alike.
fn load_parquet(path: &Path) -> Result<LoadReport> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

        for row in 0..batch.num_rows() {
            let obj: JsonObject = names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), extract_cell(batch.column(i), row)))
                .collect();
            rows.push(obj);
        }
    }

    Ok(records_from_rows(rows.iter().map(Ok)))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> JsonValue {
    if col.is_null(row) {
        return JsonValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| JsonValue::from(s.value(row)))
            .unwrap_or(JsonValue::Null),
        DataType::LargeUtf8 => JsonValue::from(col.as_string::<i64>().value(row)),
        DataType::Utf8View => JsonValue::from(col.as_string_view().value(row)),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| JsonValue::from(a.value(row)))
            .unwrap_or(JsonValue::Null),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| JsonValue::from(a.value(row)))
            .unwrap_or(JsonValue::Null),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| JsonValue::from(a.value(row) as f64))
            .unwrap_or(JsonValue::Null),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| JsonValue::from(a.value(row)))
            .unwrap_or(JsonValue::Null),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| JsonValue::from(a.value(row)))
            .unwrap_or(JsonValue::Null),
        // Nested and temporal columns are not part of the record layout.
        _ => JsonValue::Null,
    }
}
