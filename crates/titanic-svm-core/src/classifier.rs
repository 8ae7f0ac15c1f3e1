use crate::error::{DataError, DataResult};
use crate::matrix::Matrix;

use std::fmt;

/// A value passed through `Classifier::set_params`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Str(String),
}

impl ParamValue {
    pub fn as_f64(&self, key: &str) -> DataResult<f64> {
        match self {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            ParamValue::Str(_) => Err(invalid_param(key, self)),
        }
    }

    pub fn as_usize(&self, key: &str) -> DataResult<usize> {
        match self {
            ParamValue::Int(v) if *v >= 0 => Ok(*v as usize),
            _ => Err(invalid_param(key, self)),
        }
    }

    pub fn as_str(&self, key: &str) -> DataResult<&str> {
        match self {
            ParamValue::Str(s) => Ok(s),
            _ => Err(invalid_param(key, self)),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

fn invalid_param(key: &str, value: &ParamValue) -> DataError {
    DataError::ClassifierFailure(format!("invalid value {} for parameter '{}'", value, key))
}

/// Capability set the pipeline needs from a binary classifier.
pub trait Classifier {
    fn fit(&mut self, x: &Matrix, y: &[f64]) -> DataResult<()>;

    /// Predicted labels, one per row of `x`.
    fn predict(&self, x: &Matrix) -> DataResult<Vec<f64>>;

    /// Mean accuracy of `predict(x)` against `y`.
    fn score(&self, x: &Matrix, y: &[f64]) -> DataResult<f64>;

    fn set_params(&mut self, params: &[(&str, ParamValue)]) -> DataResult<()>;

    fn fit_predict(&mut self, x_train: &Matrix, y_train: &[f64], x_test: &Matrix) -> DataResult<Vec<f64>> {
        self.fit(x_train, y_train)?;
        self.predict(x_test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_conversions() {
        assert_eq!(ParamValue::from(2i64).as_f64("C").unwrap(), 2.0);
        assert_eq!(ParamValue::from(3i64).as_usize("degree").unwrap(), 3);
        assert_eq!(ParamValue::from("rbf").as_str("kernel").unwrap(), "rbf");
        assert!(ParamValue::from(-1i64).as_usize("degree").is_err());
        assert!(matches!(
            ParamValue::from("x").as_f64("C"),
            Err(DataError::ClassifierFailure(_))
        ));
    }
}
