//! Reading the input CSV files and writing exports of the filtered view.
//!
//! Loaders check the schema up front: a missing file, a missing required
//! column or a non-numeric cell in a numeric column is reported with the file
//! (and column / line) at load time.

use crate::error::{DataError, Result};
use crate::models::{CountryMetric, TrendPoint, UserRecord, WideRow, WideTable};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::info;
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const COUNTRY: &str = "Country";
pub const MEDAL_EFFICIENCY: &str = "MedalEfficiency";
pub const YEAR: &str = "Year";
pub const NOTEBOOK_LENGTH: &str = "NotebookLength";

struct Source {
    label: String,
    reader: csv::Reader<File>,
    headers: StringRecord,
}

impl Source {
    fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DataError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let label = path.display().to_string();
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(false)
            .from_path(path)
            .map_err(|source| DataError::Csv {
                file: label.clone(),
                source,
            })?;
        let headers = reader
            .headers()
            .map_err(|source| DataError::Csv {
                file: label.clone(),
                source,
            })?
            .clone();
        Ok(Self {
            label,
            reader,
            headers,
        })
    }

    fn header(&self, i: usize) -> &str {
        self.headers
            .get(i)
            .unwrap_or("")
            .trim_start_matches('\u{feff}')
    }

    fn column(&self, name: &str) -> Result<usize> {
        (0..self.headers.len())
            .find(|&i| self.header(i) == name)
            .ok_or_else(|| DataError::MissingColumn {
                file: self.label.clone(),
                column: name.to_string(),
            })
    }

    /// Visit each record with its 1-based line number.
    fn for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&StringRecord, u64) -> Result<()>,
    {
        let mut record = StringRecord::new();
        loop {
            let more = self
                .reader
                .read_record(&mut record)
                .map_err(|source| DataError::Csv {
                    file: self.label.clone(),
                    source,
                })?;
            if !more {
                return Ok(());
            }
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            f(&record, line)?;
        }
    }
}

fn cell(record: &StringRecord, i: usize) -> &str {
    record.get(i).unwrap_or("").trim()
}

fn parse_number(raw: &str, file: &str, column: &str, line: u64) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::InvalidNumber {
            file: file.to_string(),
            column: column.to_string(),
            line,
            value: raw.to_string(),
        })
}

fn parse_year(raw: &str, file: &str, line: u64) -> Result<i32> {
    if let Ok(y) = raw.parse::<i32>() {
        return Ok(y);
    }
    // pandas writes integer columns with NaNs as floats ("2019.0")
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i32::MAX as f64 => Ok(v as i32),
        _ => Err(DataError::InvalidNumber {
            file: file.to_string(),
            column: YEAR.to_string(),
            line,
            value: raw.to_string(),
        }),
    }
}

/// Load `users_clean.csv`: one row per user, only `Country` is kept.
pub fn load_users<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    let mut src = Source::open(path.as_ref())?;
    let ci = src.column(COUNTRY)?;
    let mut out = Vec::new();
    src.for_each(|rec, _| {
        out.push(UserRecord {
            country: cell(rec, ci).to_string(),
        });
        Ok(())
    })?;
    info!("loaded {} users from {}", out.len(), src.label);
    Ok(out)
}

/// Load `medal_efficiency.csv` (`Country`, `MedalEfficiency`). Regions are
/// left as `Unknown` until enrichment. Efficiency must be non-negative.
pub fn load_medal_efficiency<P: AsRef<Path>>(path: P) -> Result<Vec<CountryMetric>> {
    let mut src = Source::open(path.as_ref())?;
    let ci = src.column(COUNTRY)?;
    let ei = src.column(MEDAL_EFFICIENCY)?;
    let label = src.label.clone();
    let mut out = Vec::new();
    src.for_each(|rec, line| {
        let raw = cell(rec, ei);
        let eff = parse_number(raw, &label, MEDAL_EFFICIENCY, line)?;
        if eff < 0.0 {
            return Err(DataError::InvalidNumber {
                file: label.clone(),
                column: MEDAL_EFFICIENCY.to_string(),
                line,
                value: raw.to_string(),
            });
        }
        out.push(CountryMetric::new(cell(rec, ci), eff));
        Ok(())
    })?;
    info!("loaded {} medal-efficiency rows from {}", out.len(), label);
    Ok(out)
}

/// Load `notebook_token_trends.csv` (`Country`, `Year`, `NotebookLength`).
pub fn load_token_trends<P: AsRef<Path>>(path: P) -> Result<Vec<TrendPoint>> {
    let mut src = Source::open(path.as_ref())?;
    let ci = src.column(COUNTRY)?;
    let yi = src.column(YEAR)?;
    let li = src.column(NOTEBOOK_LENGTH)?;
    let label = src.label.clone();
    let mut out = Vec::new();
    src.for_each(|rec, line| {
        out.push(TrendPoint {
            country: cell(rec, ci).to_string(),
            year: parse_year(cell(rec, yi), &label, line)?,
            notebook_length: parse_number(cell(rec, li), &label, NOTEBOOK_LENGTH, line)?,
        });
        Ok(())
    })?;
    info!("loaded {} trend points from {}", out.len(), label);
    Ok(out)
}

/// Load a wide usage table: `Country` plus one numeric column per keyword or
/// tool. Unnamed columns (a saved index) are skipped; empty cells count as 0.
pub fn load_wide<P: AsRef<Path>>(path: P) -> Result<WideTable> {
    let mut src = Source::open(path.as_ref())?;
    let ci = src.column(COUNTRY)?;
    let metric_idx: Vec<usize> = (0..src.headers.len())
        .filter(|&i| i != ci && !src.header(i).is_empty())
        .collect();
    let columns: Vec<String> = metric_idx
        .iter()
        .map(|&i| src.header(i).to_string())
        .collect();
    let label = src.label.clone();
    let mut rows = Vec::new();
    src.for_each(|rec, line| {
        let values = metric_idx
            .iter()
            .zip(&columns)
            .map(|(&i, name)| match cell(rec, i) {
                "" => Ok(0.0),
                raw => parse_number(raw, &label, name, line),
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(WideRow {
            country: cell(rec, ci).to_string(),
            values,
        });
        Ok(())
    })?;
    info!(
        "loaded {} rows x {} columns from {}",
        rows.len(),
        columns.len(),
        label
    );
    Ok(WideTable { columns, rows })
}

/// Prefix text that a spreadsheet would evaluate as a formula.
fn guard_cell(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => Cow::Owned(format!("'{s}")),
        _ => Cow::Borrowed(s),
    }
}

/// Save the filtered table as CSV (`Country,MedalEfficiency,Region`).
pub fn save_csv<P: AsRef<Path>>(rows: &[CountryMetric], path: P) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((COUNTRY, MEDAL_EFFICIENCY, "Region"))?;
    for r in rows {
        wtr.serialize((guard_cell(&r.country), r.medal_efficiency, r.region.as_str()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable value (rows, a whole dashboard view) as pretty JSON.
pub fn save_json<T, P>(value: &T, path: P) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Fixed-width plain-text rendering of the filtered table, columns
/// right-aligned and efficiency shown with two decimals.
pub fn render_text_table(rows: &[CountryMetric]) -> String {
    let body: Vec<[String; 3]> = rows
        .iter()
        .map(|r| {
            [
                r.country.clone(),
                format!("{:.2}", r.medal_efficiency),
                r.region.to_string(),
            ]
        })
        .collect();
    let header = [COUNTRY, MEDAL_EFFICIENCY, "Region"];
    let mut widths = header.map(str::len);
    for row in &body {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.chars().count());
        }
    }
    let fmt_line = |cells: [&str; 3]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:>w$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    let mut out = fmt_line(header);
    out.push('\n');
    for row in &body {
        out.push_str(&fmt_line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
        out.push('\n');
    }
    out
}

pub fn save_text<P: AsRef<Path>>(rows: &[CountryMetric], path: P) -> anyhow::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(render_text_table(rows).as_bytes())?;
    Ok(())
}
