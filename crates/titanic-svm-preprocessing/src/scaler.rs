use titanic_svm_core::{DataError, DataResult, FeatureMatrix};

/// Standardize features by removing the mean and scaling to unit variance.
///
/// Parameters come from the matrix given to `fit` and are reused verbatim by
/// every later `transform`. A feature with zero standard deviation is only
/// centred.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    pub mean: Option<Vec<f64>>,
    pub std: Option<Vec<f64>>,
    feature_names: Vec<String>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute per-feature mean and population std.
    pub fn fit(&mut self, x: &FeatureMatrix) -> DataResult<()> {
        if x.n_samples() == 0 {
            return Err(DataError::InsufficientData(
                "cannot fit a scaler on zero samples".into(),
            ));
        }
        self.mean = Some(x.values().mean_cols());
        self.std = Some(x.values().std_cols());
        self.feature_names = x.names().to_vec();
        Ok(())
    }

    pub fn transform(&self, x: &FeatureMatrix) -> DataResult<FeatureMatrix> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(m), Some(s)) => (m, s),
            _ => return Err(DataError::NotFitted("StandardScaler")),
        };
        if x.n_features() != mean.len() {
            return Err(DataError::DimensionMismatch(format!(
                "scaler fitted on {} features, got {}",
                mean.len(),
                x.n_features()
            )));
        }
        if x.names() != self.feature_names.as_slice() {
            return Err(DataError::FeatureNamesMismatch {
                fitted: self.feature_names.clone(),
                got: x.names().to_vec(),
            });
        }

        let scaled = x.values().map_cols(|v, j| {
            let divisor = if std[j].abs() < f64::EPSILON { 1.0 } else { std[j] };
            (v - mean[j]) / divisor
        });
        FeatureMatrix::new(x.names().to_vec(), scaled)
    }

    pub fn fit_transform(&mut self, x: &FeatureMatrix) -> DataResult<FeatureMatrix> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Fit on `train` only and scale both matrices with those parameters.
    pub fn fit_transform_pair(
        &mut self,
        train: &FeatureMatrix,
        test: &FeatureMatrix,
    ) -> DataResult<(FeatureMatrix, FeatureMatrix)> {
        if train.n_features() != test.n_features() {
            return Err(DataError::DimensionMismatch(format!(
                "train has {} features, test has {}",
                train.n_features(),
                test.n_features()
            )));
        }
        let scaled_train = self.fit_transform(train)?;
        let scaled_test = self.transform(test)?;
        Ok((scaled_train, scaled_test))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use titanic_svm_core::Matrix;

    fn features(names: &[&str], rows: &[Vec<f64>]) -> FeatureMatrix {
        FeatureMatrix::new(
            names.iter().map(|n| n.to_string()).collect(),
            Matrix::from_rows(rows).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_standard_scaler() {
        let x = features(&["a", "b"], &[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x).unwrap();

        for (m, s) in scaled
            .values()
            .mean_cols()
            .into_iter()
            .zip(scaled.values().std_cols())
        {
            assert_abs_diff_eq!(m, 0.0, epsilon = 1e-10);
            assert_abs_diff_eq!(s, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_test_set_uses_train_parameters() {
        let train = features(&["a"], &[vec![0.0], vec![2.0]]);
        let test = features(&["a"], &[vec![4.0], vec![1.0]]);
        let (_, scaled_test) = StandardScaler::new().fit_transform_pair(&train, &test).unwrap();

        // train mean 1, population std 1
        assert_eq!(scaled_test.values().data(), &[3.0, 0.0]);
    }

    #[test]
    fn test_zero_std_only_centres() {
        let x = features(&["a", "b"], &[vec![5.0, 1.0], vec![5.0, 3.0]]);
        let scaled = StandardScaler::new().fit_transform(&x).unwrap();
        assert_eq!(scaled.values().col(0).unwrap(), vec![0.0, 0.0]);
        assert!(scaled.values().data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_column_count_mismatch() {
        let train = features(&["a", "b"], &[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let test = features(&["a"], &[vec![1.0]]);
        let err = StandardScaler::new().fit_transform_pair(&train, &test).unwrap_err();
        assert!(matches!(err, DataError::DimensionMismatch(_)));
    }

    #[test]
    fn test_feature_order_mismatch() {
        let train = features(&["a", "b"], &[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let test = features(&["b", "a"], &[vec![1.0, 2.0]]);
        let err = StandardScaler::new().fit_transform_pair(&train, &test).unwrap_err();
        assert!(matches!(err, DataError::FeatureNamesMismatch { .. }));
    }

    #[test]
    fn test_transform_before_fit() {
        let x = features(&["a"], &[vec![1.0]]);
        assert!(matches!(
            StandardScaler::new().transform(&x),
            Err(DataError::NotFitted(_))
        ));
    }
}
