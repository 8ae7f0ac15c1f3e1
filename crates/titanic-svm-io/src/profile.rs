use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use titanic_svm_core::{Cell, Column, DataError, DataResult, Table};

/// Produces a descriptive statistics report for one dataset.
pub trait Profiler {
    fn save_report(&self, table: &Table, title: &str, path: &Path) -> DataResult<()>;
}

/// Descriptive statistics of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub count: usize,
    pub null_count: usize,
    pub numeric_count: usize,
    pub text_count: usize,
    pub unique: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub top: Option<String>,
    pub top_freq: Option<usize>,
}

impl ColumnProfile {
    pub fn from_column(column: &Column) -> Self {
        let numbers: Vec<f64> = column.cells().iter().filter_map(Cell::as_number).collect();
        let text_count = column.cells().iter().filter(|c| c.as_text().is_some()).count();
        let null_count = column.null_count();

        // Frequencies keyed by the rendered value, first-seen order breaks ties.
        let mut order: Vec<String> = Vec::new();
        let mut freq: HashMap<String, usize> = HashMap::new();
        for cell in column.cells().iter().filter(|c| !c.is_missing()) {
            let key = cell.to_string();
            let n = freq.entry(key.clone()).or_insert(0);
            if *n == 0 {
                order.push(key);
            }
            *n += 1;
        }
        let mut top: Option<(String, usize)> = None;
        for key in &order {
            let n = freq[key];
            if top.as_ref().map_or(true, |(_, best)| n > *best) {
                top = Some((key.clone(), n));
            }
        }

        let (mean, std, min, max) = if numbers.is_empty() {
            (None, None, None, None)
        } else {
            let n = numbers.len() as f64;
            let mean = numbers.iter().sum::<f64>() / n;
            let std = if numbers.len() > 1 {
                let ss: f64 = numbers.iter().map(|v| (v - mean) * (v - mean)).sum();
                Some((ss / (n - 1.0)).sqrt())
            } else {
                None
            };
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (Some(mean), std, Some(min), Some(max))
        };

        ColumnProfile {
            name: column.name().to_string(),
            count: column.len() - null_count,
            null_count,
            numeric_count: numbers.len(),
            text_count,
            unique: order.len(),
            mean,
            std,
            min,
            max,
            top: top.as_ref().map(|(k, _)| k.clone()),
            top_freq: top.map(|(_, n)| n),
        }
    }
}

/// Dataset-level report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub title: String,
    pub n_rows: usize,
    pub n_columns: usize,
    pub missing_cells: usize,
    pub columns: Vec<ColumnProfile>,
}

impl ProfileReport {
    pub fn from_table(table: &Table, title: &str) -> Self {
        let columns: Vec<ColumnProfile> = table.columns().iter().map(ColumnProfile::from_column).collect();
        ProfileReport {
            title: title.to_string(),
            n_rows: table.n_rows(),
            n_columns: table.n_cols(),
            missing_cells: columns.iter().map(|c| c.null_count).sum(),
            columns,
        }
    }
}

/// Writes `ProfileReport`s as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonProfiler;

impl Profiler for JsonProfiler {
    fn save_report(&self, table: &Table, title: &str, path: &Path) -> DataResult<()> {
        let report = ProfileReport::from_table(table, title);
        let json = serde_json::to_string_pretty(&report).map_err(|e| DataError::Io {
            context: "serializing profile report".into(),
            source: io::Error::from(e),
        })?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| DataError::Io {
                context: format!("creating directory '{}'", dir.display()),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| DataError::Io {
            context: format!("writing profile report to '{}'", path.display()),
            source,
        })
    }
}
