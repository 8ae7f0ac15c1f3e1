use titanic_svm_core::{SharedDiagnostics, Table};

/// Reports per-column null counts. Diagnostic only: never mutates, never fails.
pub struct NullAuditor {
    diagnostics: SharedDiagnostics,
}

impl NullAuditor {
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        NullAuditor { diagnostics }
    }

    /// Emit one line per column of every named table. Non-zero counts are
    /// marked with `**` and raised to warning severity.
    pub fn audit(&self, tables: &[(&str, &Table)]) {
        for (set, table) in tables {
            for (column, count) in table.null_counts() {
                if count >= 1 {
                    self.diagnostics.warn(
                        "auditor",
                        &format!("null count for column '{}' in set '{}': {} **", column, set, count),
                    );
                } else {
                    self.diagnostics.info(
                        "auditor",
                        &format!("null count for column '{}' in set '{}': {}", column, set, count),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_svm_core::{Column, RecordingDiagnostics, Severity};

    #[test]
    fn test_audit_lines() {
        let diag = RecordingDiagnostics::new();
        let train = Table::new(vec![
            Column::from_numbers("Age", &[22.0, f64::NAN, f64::NAN]),
            Column::from_texts("Sex", &["male", "female", "male"]),
        ])
        .unwrap();
        let test = Table::new(vec![Column::from_numbers("Fare", &[f64::NAN])]).unwrap();
        let before = train.clone();

        NullAuditor::new(diag.clone()).audit(&[("train", &train), ("test", &test)]);

        let records = diag.records();
        assert_eq!(
            diag.messages(),
            vec![
                "null count for column 'Age' in set 'train': 2 **",
                "null count for column 'Sex' in set 'train': 0",
                "null count for column 'Fare' in set 'test': 1 **",
            ]
        );
        assert_eq!(records[0].severity, Severity::Warn);
        assert_eq!(records[1].severity, Severity::Info);
        assert_eq!(train, before);
    }
}
