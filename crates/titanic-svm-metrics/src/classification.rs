use titanic_svm_core::{DataError, DataResult};

fn check_lengths(y_true: &[f64], y_pred: &[f64]) -> DataResult<()> {
    if y_true.len() != y_pred.len() {
        return Err(DataError::DimensionMismatch(format!(
            "{} labels vs {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

/// Compute accuracy: fraction of correct predictions.
pub fn accuracy(y_true: &[f64], y_pred: &[f64]) -> DataResult<f64> {
    check_lengths(y_true, y_pred)?;
    if y_true.is_empty() {
        return Err(DataError::InsufficientData("accuracy of zero samples".into()));
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(&a, &b)| (a - b).abs() < 0.5)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Confusion matrix for integer class labels in `0..n_classes`.
/// Rows are true classes, columns predicted classes.
pub fn confusion_matrix(
    y_true: &[f64],
    y_pred: &[f64],
    n_classes: usize,
) -> DataResult<Vec<Vec<usize>>> {
    check_lengths(y_true, y_pred)?;
    let mut matrix = vec![vec![0usize; n_classes]; n_classes];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        let ti = t.round() as usize;
        let pi = p.round() as usize;
        if ti < n_classes && pi < n_classes {
            matrix[ti][pi] += 1;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let y_true = [0.0, 1.0, 1.0, 0.0];
        let y_pred = [0.0, 1.0, 0.0, 0.0];
        assert_eq!(accuracy(&y_true, &y_pred).unwrap(), 0.75);
    }

    #[test]
    fn test_accuracy_length_mismatch() {
        assert!(matches!(
            accuracy(&[1.0], &[1.0, 0.0]),
            Err(DataError::DimensionMismatch(_))
        ));
        assert!(accuracy(&[], &[]).is_err());
    }

    #[test]
    fn test_confusion_matrix() {
        let y_true = [0.0, 1.0, 1.0, 0.0, 1.0];
        let y_pred = [0.0, 1.0, 0.0, 1.0, 1.0];
        let cm = confusion_matrix(&y_true, &y_pred, 2).unwrap();
        assert_eq!(cm, vec![vec![1, 1], vec![1, 2]]);
    }
}
