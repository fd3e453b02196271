use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rusty_dashboard::data::model::Record;

const TOPICS: &[&str] = &["oil", "gas", "market", "policy", "climate", "battery", "growth"];
const REGIONS: &[(&str, &[&str])] = &[
    ("Northern America", &["United States of America", "Canada"]),
    ("Western Europe", &["France", "Germany"]),
    ("Eastern Asia", &["China", "Japan"]),
    ("Western Asia", &["Saudi Arabia", "Iran"]),
    ("South America", &["Brazil", "Chile"]),
];
const PESTLE: &[&str] = &["Economic", "Environmental", "Political", "Technological", "Social"];
const SOURCES: &[&str] = &["EIA", "Reuters", "OilPrice.com", "WSJ", "Bloomberg"];
const SECTORS: &[&str] = &["Energy", "Manufacturing", "Government", "Financial services"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// `Some(value)` most of the time; the real dataset has gaps.
    fn sometimes<T>(&mut self, value: T) -> Option<T> {
        (self.below(10) != 0).then_some(value)
    }
}

fn generate_records(n: usize, rng: &mut SimpleRng) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let (region, countries) = REGIONS[rng.below(REGIONS.len())];
            let country = rng.pick(countries);
            let topic = rng.pick(TOPICS);
            let end_year = 2018 + rng.below(30) as i64;
            let sector = rng.pick(SECTORS).to_string();
            Record {
                end_year: rng.sometimes(end_year),
                topic: Some(topic.to_string()),
                region: rng.sometimes(region.to_string()),
                country: rng.sometimes(country.to_string()),
                pestle: Some(rng.pick(PESTLE).to_string()),
                source: Some(rng.pick(SOURCES).to_string()),
                sector: rng.sometimes(sector),
                intensity: Some(rng.below(48) as f64 + 1.0),
                relevance: Some(rng.below(7) as f64 + 1.0),
                likelihood: Some(rng.below(4) as f64 + 1.0),
                title: Some(format!("Outlook on {topic} in {country} #{i}")),
                insight: Some(format!("{topic} outlook")),
                url: None,
            }
        })
        .collect()
}

fn text_column<'a>(
    records: &'a [Record],
    get: impl Fn(&'a Record) -> &'a Option<String>,
) -> ArrayRef {
    Arc::new(StringArray::from(
        records.iter().map(|r| get(r).as_deref()).collect::<Vec<_>>(),
    ))
}

fn score_column(records: &[Record], get: impl Fn(&Record) -> Option<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(records.iter().map(get).collect::<Vec<_>>()))
}

fn write_parquet(records: &[Record], path: &str) -> Result<()> {
    let text_fields = ["topic", "region", "country", "pestle", "source", "sector", "title"];
    let score_fields = ["intensity", "relevance", "likelihood"];

    let mut fields = vec![Field::new("end_year", DataType::Int64, true)];
    fields.extend(text_fields.iter().map(|name| Field::new(*name, DataType::Utf8, true)));
    fields.extend(score_fields.iter().map(|name| Field::new(*name, DataType::Float64, true)));
    let schema = Arc::new(Schema::new(fields));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(records.iter().map(|r| r.end_year).collect::<Vec<_>>())),
        text_column(records, |r| &r.topic),
        text_column(records, |r| &r.region),
        text_column(records, |r| &r.country),
        text_column(records, |r| &r.pestle),
        text_column(records, |r| &r.source),
        text_column(records, |r| &r.sector),
        text_column(records, |r| &r.title),
        score_column(records, |r| r.intensity),
        score_column(records, |r| r.relevance),
        score_column(records, |r| r.likelihood),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer =
        ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records = generate_records(500, &mut rng);

    let json_path = "sample_data.json";
    let json = serde_json::to_string_pretty(&records).context("serialising records")?;
    std::fs::write(json_path, json).with_context(|| format!("writing {json_path}"))?;

    let parquet_path = "sample_data.parquet";
    write_parquet(&records, parquet_path)?;

    println!(
        "Wrote {} records to {json_path} and {parquet_path}",
        records.len()
    );
    Ok(())
}
