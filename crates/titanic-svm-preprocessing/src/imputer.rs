use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use titanic_svm_core::{Cell, DataError, DataResult, SharedDiagnostics, Table};

/// Fills missing values by one of three policies.
///
/// Every policy is a no-op on a column without missing cells.
pub struct Imputer {
    rng: StdRng,
    diagnostics: SharedDiagnostics,
}

impl Imputer {
    /// `seed` fixes the draws of `nan_inputer`; `None` seeds from entropy.
    pub fn new(seed: Option<u64>, diagnostics: SharedDiagnostics) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Imputer { rng, diagnostics }
    }

    /// Distribution fill across a group of datasets sharing `column`.
    ///
    /// `datasets[0]` is the primary. For each dataset in turn: the mean comes
    /// from the primary's present values (the primary is already filled on
    /// later turns), the sample std from `datasets[std_source]`; missing cells
    /// get integers drawn from `[trunc(mean - std), trunc(mean + std))` in row
    /// order. The column is then replaced by the primary's column truncated to
    /// integers, row by row. Rows past the primary's length keep their own
    /// truncated value.
    pub fn nan_inputer(
        &mut self,
        datasets: &mut [&mut Table],
        column: &str,
        std_source: usize,
    ) -> DataResult<()> {
        if datasets.is_empty() {
            return Ok(());
        }
        if std_source >= datasets.len() {
            return Err(DataError::InsufficientData(format!(
                "std source index {} outside a group of {} datasets",
                std_source,
                datasets.len()
            )));
        }
        for table in datasets.iter() {
            table.require_columns(&[column])?;
        }

        for idx in 0..datasets.len() {
            let mean = datasets[0].column(column)?.mean()?.ok_or_else(|| {
                DataError::InsufficientData(format!("no values to average in column '{}'", column))
            })?;
            let std = datasets[std_source].column(column)?.sample_std()?.ok_or_else(|| {
                DataError::InsufficientData(format!(
                    "standard deviation of column '{}' needs at least 2 values",
                    column
                ))
            })?;

            let target = datasets[idx].column_mut(column)?;
            let k = target.null_count();
            if k > 0 {
                let low = (mean - std) as i64;
                let high = (mean + std) as i64;
                if low >= high {
                    return Err(DataError::InsufficientData(format!(
                        "empty draw range [{}, {}) for column '{}'",
                        low, high, column
                    )));
                }
                let mut draws = (0..k).map(|_| self.rng.gen_range(low..high));
                for cell in target.cells_mut().iter_mut().filter(|c| c.is_missing()) {
                    if let Some(v) = draws.next() {
                        *cell = Cell::Number(v as f64);
                    }
                }
            }

            let primary: Vec<Cell> = datasets[0].column(column)?.cells().to_vec();
            let target = datasets[idx].column_mut(column)?;
            let name = target.name().to_string();
            for (row, cell) in target.cells_mut().iter_mut().enumerate() {
                let value = match primary.get(row) {
                    Some(p) => p.as_number(),
                    None => cell.as_number(),
                }
                .ok_or_else(|| DataError::NonNumericCell {
                    column: name.clone(),
                    row,
                })?;
                *cell = Cell::Number(value.trunc());
            }

            self.diagnostics.debug(
                "imputer",
                &format!(
                    "Filled {} missing '{}' values in dataset {} (mean {:.3}, std {:.3})",
                    k, column, idx, mean, std
                ),
            );
        }
        Ok(())
    }

    /// Replace every missing cell of `column` with `value`.
    pub fn common_value_inputer(&self, table: &mut Table, column: &str, value: Cell) -> DataResult<()> {
        let filled = table.column_mut(column)?.fill_missing(&value);
        self.diagnostics.debug(
            "imputer",
            &format!("Filled {} missing '{}' values with {}", filled, column, value),
        );
        Ok(())
    }

    /// Replace every missing cell of `column` with the mean of its present values.
    /// A column with no present values is left unchanged.
    pub fn mean_inputer(&self, table: &mut Table, column: &str) -> DataResult<()> {
        let target = table.column_mut(column)?;
        match target.mean()? {
            Some(mean) => {
                let filled = target.fill_missing(&Cell::Number(mean));
                self.diagnostics.debug(
                    "imputer",
                    &format!("Filled {} missing '{}' values with mean {:.4}", filled, column, mean),
                );
            }
            None => self.diagnostics.warn(
                "imputer",
                &format!("Column '{}' has no values to average; left unchanged", column),
            ),
        }
        Ok(())
    }
}
