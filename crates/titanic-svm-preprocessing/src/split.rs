use titanic_svm_core::{DataResult, FeatureMatrix, Table};

/// Feature/label sets handed to the scaler and classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSets {
    pub x_train: FeatureMatrix,
    pub y_train: Vec<f64>,
    pub x_test: FeatureMatrix,
}

/// Separate the labeled `train` table into features and labels, and the
/// unlabeled `test` table into features without its identifier column.
///
/// Both tables are only borrowed; everything returned is a copy.
pub fn split(train: &Table, test: &Table, label_column: &str, id_column: &str) -> DataResult<SplitSets> {
    let labels = train.column(label_column)?;
    test.require_columns(&[id_column])?;

    let y_train = labels.to_numbers()?;
    let x_train = train.without_columns(&[label_column])?.to_feature_matrix()?;
    let x_test = test.without_columns(&[id_column])?.to_feature_matrix()?;

    Ok(SplitSets {
        x_train,
        y_train,
        x_test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_svm_core::{Cell, Column, DataError};

    fn train() -> Table {
        Table::new(vec![
            Column::from_numbers("Survived", &[0.0, 1.0, 1.0]),
            Column::from_numbers("Age", &[30.0, 20.0, 25.0]),
            Column::from_numbers("Fare", &[7.25, 71.28, 8.05]),
        ])
        .unwrap()
    }

    fn test() -> Table {
        Table::new(vec![
            Column::from_numbers("PassengerId", &[4.0, 5.0]),
            Column::from_numbers("Age", &[40.0, 22.0]),
            Column::from_numbers("Fare", &[13.0, 9.5]),
        ])
        .unwrap()
    }

    #[test]
    fn test_split() {
        let (train, test) = (train(), test());
        let sets = split(&train, &test, "Survived", "PassengerId").unwrap();

        assert_eq!(sets.x_train.names(), &["Age".to_string(), "Fare".to_string()]);
        assert_eq!(sets.y_train, vec![0.0, 1.0, 1.0]);
        assert_eq!(sets.y_train.len(), sets.x_train.n_samples());
        assert_eq!(sets.x_test.names(), &["Age".to_string(), "Fare".to_string()]);
        assert_eq!(sets.x_test.values().row(1), &[22.0, 9.5]);
        // the test table still owns its identifiers
        assert!(test.has_column("PassengerId"));
        assert_eq!(train.n_cols(), 3);
    }

    #[test]
    fn test_unknown_label_or_id() {
        let (train, test) = (train(), test());
        assert!(matches!(
            split(&train, &test, "Label", "PassengerId"),
            Err(DataError::ColumnNotFound(ref c)) if c == "Label"
        ));
        assert!(matches!(
            split(&train, &test, "Survived", "Id"),
            Err(DataError::ColumnNotFound(ref c)) if c == "Id"
        ));
    }

    #[test]
    fn test_missing_feature_cell_is_rejected() {
        let mut test = test();
        test.replace_column(Column::new("Fare", vec![Cell::Number(1.0), Cell::Missing]))
            .unwrap();
        let err = split(&train(), &test, "Survived", "PassengerId").unwrap_err();
        assert!(matches!(err, DataError::NonNumericCell { ref column, row: 1 } if column == "Fare"));
    }
}
