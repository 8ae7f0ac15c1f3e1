use std::collections::HashMap;

use titanic_svm_core::{Cell, Column, DataError, DataResult, SharedDiagnostics, Table};

/// Hashable identity of a non-missing cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Number(u64),
    Text(String),
}

impl CellKey {
    fn of(cell: &Cell) -> Option<CellKey> {
        match cell {
            Cell::Missing => None,
            // -0.0 and 0.0 are one category
            Cell::Number(v) => Some(CellKey::Number((v + 0.0).to_bits())),
            Cell::Text(s) => Some(CellKey::Text(s.clone())),
        }
    }
}

/// Encode categorical values as integer codes, in first-seen order.
///
/// Unlike a sorted encoder, the code of a class depends on where it first
/// appears, so two encoders fitted on different data may disagree.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<Cell>,
    class_to_idx: HashMap<CellKey, usize>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the encoder on the non-missing cells of `column`.
    pub fn fit(&mut self, column: &Column) {
        self.classes.clear();
        self.class_to_idx.clear();
        for cell in column.cells() {
            if let Some(key) = CellKey::of(cell) {
                if !self.class_to_idx.contains_key(&key) {
                    self.class_to_idx.insert(key, self.classes.len());
                    self.classes.push(cell.clone());
                }
            }
        }
    }

    /// Replace every cell by its code. Missing cells stay missing; a class
    /// unseen at fit time is a `MalformedInput`.
    pub fn transform(&self, column: &Column) -> DataResult<Column> {
        let cells = column
            .cells()
            .iter()
            .map(|cell| match CellKey::of(cell) {
                None => Ok(Cell::Missing),
                Some(key) => self
                    .class_to_idx
                    .get(&key)
                    .map(|&idx| Cell::Number(idx as f64))
                    .ok_or_else(|| {
                        DataError::MalformedInput(format!(
                            "unknown category '{}' in column '{}'",
                            cell,
                            column.name()
                        ))
                    }),
            })
            .collect::<DataResult<Vec<Cell>>>()?;
        Ok(Column::new(column.name(), cells))
    }

    pub fn fit_transform(&mut self, column: &Column) -> DataResult<Column> {
        self.fit(column);
        self.transform(column)
    }

    /// Fitted classes; the index of a class is its code.
    pub fn classes(&self) -> &[Cell] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// Rewrites categorical columns of a table as integer codes, in place.
pub trait CategoricalEncoder {
    fn fit_transform(&mut self, table: &mut Table, columns: &[&str]) -> DataResult<()>;
}

/// Fits a fresh `LabelEncoder` per column on every call.
///
/// Train and test tables encoded through separate calls get independent code
/// assignments for the same category.
pub struct IndependentEncoder {
    diagnostics: SharedDiagnostics,
}

impl IndependentEncoder {
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        IndependentEncoder { diagnostics }
    }
}

impl CategoricalEncoder for IndependentEncoder {
    fn fit_transform(&mut self, table: &mut Table, columns: &[&str]) -> DataResult<()> {
        table.require_columns(columns)?;
        for &name in columns {
            let mut encoder = LabelEncoder::new();
            let encoded = encoder.fit_transform(table.column(name)?)?;
            table.replace_column(encoded)?;

            let mapping: Vec<String> = encoder
                .classes()
                .iter()
                .enumerate()
                .map(|(code, class)| format!("{}={}", class, code))
                .collect();
            self.diagnostics.debug(
                "encoder",
                &format!("Encoded '{}' as [{}]", name, mapping.join(", ")),
            );
        }
        Ok(())
    }
}
