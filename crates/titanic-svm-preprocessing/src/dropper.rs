use titanic_svm_core::{DataResult, SharedDiagnostics, Table};

/// Removes named columns from a table.
///
/// `drop` mutates the caller's table; `drop_copy` leaves it untouched and
/// returns a new one. Either way every name is checked before anything is
/// removed, so an unknown column leaves the input as it was.
pub struct ColumnDropper {
    diagnostics: SharedDiagnostics,
}

impl ColumnDropper {
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        ColumnDropper { diagnostics }
    }

    pub fn drop(&self, table: &mut Table, columns: &[&str]) -> DataResult<()> {
        table.remove_columns(columns)?;
        self.report(columns);
        Ok(())
    }

    pub fn drop_copy(&self, table: &Table, columns: &[&str]) -> DataResult<Table> {
        let out = table.without_columns(columns)?;
        self.report(columns);
        Ok(out)
    }

    fn report(&self, columns: &[&str]) {
        self.diagnostics
            .info("dropper", &format!("Cols dropped: {:?}", columns));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_svm_core::{Column, DataError, RecordingDiagnostics};

    fn sample() -> Table {
        Table::new(vec![
            Column::from_numbers("A", &[1.0, 2.0, 3.0]),
            Column::from_numbers("B", &[4.0, 5.0, 6.0]),
            Column::from_numbers("C", &[7.0, 8.0, 9.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_drop_in_place() {
        let diag = RecordingDiagnostics::new();
        let mut t = sample();
        ColumnDropper::new(diag.clone()).drop(&mut t, &["B", "C"]).unwrap();
        assert_eq!(t.column_names(), vec!["A"]);
        assert_eq!(t.n_rows(), 3);
        assert!(diag.contains("Cols dropped: [\"B\", \"C\"]"));
    }

    #[test]
    fn test_drop_copy_keeps_original() {
        let t = sample();
        let out = ColumnDropper::new(RecordingDiagnostics::new())
            .drop_copy(&t, &["A"])
            .unwrap();
        assert_eq!(out.column_names(), vec!["B", "C"]);
        assert_eq!(t.column_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_drop_result_is_set_difference() {
        let t = sample();
        let dropper = ColumnDropper::new(RecordingDiagnostics::new());
        let subsets: [&[&str]; 4] = [&[], &["A"], &["A", "C"], &["A", "B", "C"]];
        for subset in subsets {
            let out = dropper.drop_copy(&t, subset).unwrap();
            let expected: Vec<&str> = t
                .column_names()
                .into_iter()
                .filter(|c| !subset.contains(c))
                .collect();
            assert_eq!(out.column_names(), expected);
        }
    }

    #[test]
    fn test_unknown_column_fails_without_mutation() {
        let diag = RecordingDiagnostics::new();
        let mut t = sample();
        let err = ColumnDropper::new(diag.clone()).drop(&mut t, &["A", "Z"]).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(ref c) if c == "Z"));
        assert_eq!(t.n_cols(), 3);
        assert!(diag.records().is_empty());
    }
}
