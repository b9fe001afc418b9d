//! Tabular export of flight timing summaries.
//!
//! One row per flight: the flight id followed by a value column and an
//! `_error` column for every metric. Columns are the sorted union of the
//! metric keys of all flights; a flight lacking a metric leaves both cells
//! empty.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use crate::timing::{as_seconds, FlightTimingSummary, Metric};

/// Name of the flight id column.
pub const FLIGHT_COLUMN: &str = "flight";

/// Suffix of the uncertainty column paired with each metric.
pub const ERROR_SUFFIX: &str = "_error";

/// Sorted union of metric keys across summaries.
pub fn summary_columns<'a, I>(summaries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a FlightTimingSummary>,
{
    let keys: BTreeSet<String> = summaries
        .into_iter()
        .flat_map(|summary| summary.metrics().into_keys())
        .collect();
    keys.into_iter().collect()
}

/// Write summaries as CSV.
///
/// Durations are written in seconds, timestamps in RFC 3339.
pub fn write_summary_csv<'a, W, I>(writer: W, rows: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a FlightTimingSummary)>,
{
    let rows: Vec<(&str, BTreeMap<String, Metric>)> = rows
        .into_iter()
        .map(|(id, summary)| (id, summary.metrics()))
        .collect();

    let keys: BTreeSet<&str> = rows
        .iter()
        .flat_map(|(_, metrics)| metrics.keys().map(String::as_str))
        .collect();

    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec![FLIGHT_COLUMN.to_string()];
    for key in &keys {
        header.push((*key).to_string());
        header.push(format!("{key}{ERROR_SUFFIX}"));
    }
    out.write_record(&header)?;

    for (id, metrics) in &rows {
        let mut record = Vec::with_capacity(header.len());
        record.push((*id).to_string());
        for key in &keys {
            match metrics.get(*key) {
                Some(metric) => {
                    record.push(metric.value.to_field());
                    record.push(as_seconds(metric.uncertainty).to_string());
                }
                None => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        out.write_record(&record)?;
    }

    out.flush()?;
    tracing::debug!(rows = rows.len(), columns = header.len(), "Summary CSV written");
    Ok(())
}

/// Write summaries to a CSV file, replacing it if it exists.
pub fn write_summary_csv_file<'a, I>(path: &Path, rows: I) -> Result<(), csv::Error>
where
    I: IntoIterator<Item = (&'a str, &'a FlightTimingSummary)>,
{
    let file = std::fs::File::create(path)?;
    write_summary_csv(std::io::BufWriter::new(file), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_flight;
    use crate::analysis::test_support::{raw, PROFILE};
    use crate::phase::ClassifierConfig;

    fn summary(profile: &[(f64, f64)]) -> FlightTimingSummary {
        analyze_flight("x", &raw(profile), &[], &ClassifierConfig::default())
            .unwrap()
            .summary
            .unwrap()
    }

    fn render(rows: &[(&str, &FlightTimingSummary)]) -> String {
        let mut buf = Vec::new();
        write_summary_csv(&mut buf, rows.iter().copied()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_pairs_value_and_error() {
        let full = summary(&PROFILE);
        let text = render(&[("F1", &full)]);
        let header = text.lines().next().unwrap();
        let columns: Vec<&str> = header.split(',').collect();

        assert_eq!(columns[0], "flight");
        assert_eq!(columns[1], "after_landing_ground_duration");
        assert_eq!(columns[2], "after_landing_ground_duration_error");
        assert_eq!(columns.len(), 1 + 2 * full.metrics().len());
    }

    #[test]
    fn test_row_values() {
        let full = summary(&PROFILE);
        let rendered = render(&[("F1", &full)]);
        let mut reader = csv::Reader::from_reader(rendered.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let cell = |name: &str| {
            let i = headers.iter().position(|h| h == name).unwrap();
            row[i].to_string()
        };

        assert_eq!(cell("flight"), "F1");
        assert_eq!(cell("flight_time"), "1380");
        assert_eq!(cell("flight_time_error"), "120");
        assert_eq!(cell("takeoff_time"), "2019-10-14T09:05:00Z");
        assert_eq!(cell("takeoff_time_error"), "60");
    }

    #[test]
    fn test_missing_metric_leaves_cells_empty() {
        let full = summary(&PROFILE);
        // Starts on the takeoff roll: no ground time before takeoff
        let partial = summary(&PROFILE[4..]);
        assert_eq!(
            summary_columns([&full, &partial]),
            full.metrics().into_keys().collect::<Vec<_>>()
        );

        let text = render(&[("F1", &full), ("F2", &partial)]);
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        let ground = headers.iter().position(|h| h == "ground_time").unwrap();

        assert_eq!(&rows[0][ground], "420");
        assert_eq!(&rows[1][ground], "");
        assert_eq!(&rows[1][ground + 1], "");
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.csv");
        let full = summary(&PROFILE);

        write_summary_csv_file(&path, [("F1", &full)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("F1,"));
    }

    #[test]
    fn test_no_rows_writes_header_only() {
        let text = render(&[]);
        assert_eq!(text, "flight\n");
    }
}
