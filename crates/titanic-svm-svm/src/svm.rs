use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use titanic_svm_core::{Classifier, DataError, DataResult, Matrix, ParamValue};
use titanic_svm_metrics::accuracy;

/// Kernel type for SVM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Linear,
    RBF,
    Polynomial,
}

/// Kernel coefficient for RBF and polynomial kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gamma {
    /// `1 / (n_features * X.var())`, or 1.0 when the variance is zero.
    Scale,
    /// `1 / n_features`.
    Auto,
    Value(f64),
}

#[derive(Debug, Clone)]
struct FittedModel {
    support: Matrix,
    // alpha_i * y_i for each support vector
    dual_coef: Vec<f64>,
    bias: f64,
    gamma: f64,
    n_iter: usize,
}

/// Support Vector Classifier trained with simplified SMO.
///
/// Labels must be 0/1. The second multiplier of each SMO step is drawn from an
/// RNG seeded with `random_state`, so repeated fits on the same data agree.
#[derive(Debug, Clone)]
pub struct SVC {
    pub c: f64,
    pub kernel: Kernel,
    pub gamma: Gamma,
    pub degree: usize,
    pub coef0: f64,
    pub tol: f64,
    pub max_iter: usize,
    pub max_passes: usize,
    pub random_state: u64,
    fitted: Option<FittedModel>,
}

impl Default for SVC {
    fn default() -> Self {
        SVC::new(Kernel::RBF, 0)
    }
}

fn kernel_eval(kernel: Kernel, gamma: f64, degree: usize, coef0: f64, a: &[f64], b: &[f64]) -> f64 {
    match kernel {
        Kernel::Linear => a.iter().zip(b).map(|(x, y)| x * y).sum(),
        Kernel::RBF => {
            let sq_dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
            (-gamma * sq_dist).exp()
        }
        Kernel::Polynomial => {
            let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
            (gamma * dot + coef0).powi(degree as i32)
        }
    }
}

impl SVC {
    pub fn new(kernel: Kernel, random_state: u64) -> Self {
        SVC {
            c: 1.0,
            kernel,
            gamma: Gamma::Scale,
            degree: 3,
            coef0: 0.0,
            tol: 1e-3,
            max_iter: 1000,
            max_passes: 5,
            random_state,
            fitted: None,
        }
    }

    /// Number of support vectors of the fitted model.
    pub fn n_support(&self) -> Option<usize> {
        self.fitted.as_ref().map(|m| m.dual_coef.len())
    }

    /// SMO sweeps performed by the last fit.
    pub fn n_iter(&self) -> Option<usize> {
        self.fitted.as_ref().map(|m| m.n_iter)
    }

    fn resolve_gamma(&self, x: &Matrix) -> DataResult<f64> {
        let d = x.cols().max(1) as f64;
        match self.gamma {
            Gamma::Scale => {
                let var = x.var_all();
                Ok(if var > 0.0 { 1.0 / (d * var) } else { 1.0 })
            }
            Gamma::Auto => Ok(1.0 / d),
            Gamma::Value(g) if g > 0.0 => Ok(g),
            Gamma::Value(g) => Err(DataError::ClassifierFailure(format!(
                "gamma must be positive, got {}",
                g
            ))),
        }
    }

    /// Map 0/1 labels to -1/+1, rejecting anything else and single-class input.
    fn signed_labels(y: &[f64]) -> DataResult<Vec<f64>> {
        let mut labels = Vec::with_capacity(y.len());
        for &v in y {
            if v == 0.0 {
                labels.push(-1.0);
            } else if v == 1.0 {
                labels.push(1.0);
            } else {
                return Err(DataError::ClassifierFailure(format!(
                    "labels must be 0 or 1, got {}",
                    v
                )));
            }
        }
        let positives = labels.iter().filter(|&&l| l > 0.0).count();
        if positives == 0 || positives == labels.len() {
            return Err(DataError::ClassifierFailure(
                "the number of classes has to be greater than one; got 1 class".into(),
            ));
        }
        Ok(labels)
    }

    fn apply_param(&mut self, key: &str, value: &ParamValue) -> DataResult<()> {
        match key {
            "C" => {
                let c = value.as_f64(key)?;
                if c <= 0.0 {
                    return Err(DataError::ClassifierFailure(format!("C must be positive, got {}", c)));
                }
                self.c = c;
            }
            "kernel" => {
                self.kernel = match value.as_str(key)? {
                    "linear" => Kernel::Linear,
                    "rbf" => Kernel::RBF,
                    "poly" => Kernel::Polynomial,
                    other => {
                        return Err(DataError::ClassifierFailure(format!(
                            "unsupported kernel '{}'",
                            other
                        )))
                    }
                };
            }
            "gamma" => {
                self.gamma = match value {
                    ParamValue::Str(s) if s == "scale" => Gamma::Scale,
                    ParamValue::Str(s) if s == "auto" => Gamma::Auto,
                    other => Gamma::Value(other.as_f64(key)?),
                };
            }
            "degree" => self.degree = value.as_usize(key)?,
            "coef0" => self.coef0 = value.as_f64(key)?,
            "tol" => self.tol = value.as_f64(key)?,
            "max_iter" => self.max_iter = value.as_usize(key)?,
            "max_passes" => self.max_passes = value.as_usize(key)?,
            "random_state" => self.random_state = value.as_usize(key)? as u64,
            _ => {
                return Err(DataError::ClassifierFailure(format!(
                    "invalid parameter '{}' for estimator SVC",
                    key
                )))
            }
        }
        Ok(())
    }
}

impl Classifier for SVC {
    /// Fit using simplified SMO with a cached Gram matrix and error cache.
    fn fit(&mut self, x: &Matrix, y: &[f64]) -> DataResult<()> {
        let n = x.rows();
        if n != y.len() {
            return Err(DataError::DimensionMismatch(format!(
                "X has {} rows, y has {} labels",
                n,
                y.len()
            )));
        }
        let labels = Self::signed_labels(y)?;
        let gamma = self.resolve_gamma(x)?;
        let (kernel, degree, coef0, c, tol) = (self.kernel, self.degree, self.coef0, self.c, self.tol);

        // Rows are independent; collect keeps row order.
        let gram: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| {
                let xi = x.row(i);
                (0..n)
                    .map(|j| kernel_eval(kernel, gamma, degree, coef0, xi, x.row(j)))
                    .collect::<Vec<f64>>()
            })
            .collect::<Vec<Vec<f64>>>()
            .concat();

        let mut alphas = vec![0.0; n];
        let mut b = 0.0;
        // E_k = f(x_k) - y_k, with f = 0 before any update
        let mut errors: Vec<f64> = labels.iter().map(|&l| -l).collect();
        let mut rng = StdRng::seed_from_u64(self.random_state);

        let mut passes = 0;
        let mut n_iter = 0;
        while passes < self.max_passes && n_iter < self.max_iter {
            n_iter += 1;
            let mut num_changed = 0;

            for i in 0..n {
                let yi = labels[i];
                let ei = errors[i];
                if !((yi * ei < -tol && alphas[i] < c) || (yi * ei > tol && alphas[i] > 0.0)) {
                    continue;
                }

                // Any j != i; n >= 2 because both classes are present.
                let r = rng.gen_range(0..n - 1);
                let j = if r >= i { r + 1 } else { r };
                let yj = labels[j];
                let ej = errors[j];

                let ai_old = alphas[i];
                let aj_old = alphas[j];

                let (lo, hi) = if yi != yj {
                    (0f64.max(aj_old - ai_old), c.min(c + aj_old - ai_old))
                } else {
                    (0f64.max(ai_old + aj_old - c), c.min(ai_old + aj_old))
                };
                if hi - lo < 1e-12 {
                    continue;
                }

                let kii = gram[i * n + i];
                let kjj = gram[j * n + j];
                let kij = gram[i * n + j];
                let eta = 2.0 * kij - kii - kjj;
                if eta >= 0.0 {
                    continue;
                }

                let aj_new = (aj_old - yj * (ei - ej) / eta).max(lo).min(hi);
                if (aj_new - aj_old).abs() < 1e-5 {
                    continue;
                }
                let ai_new = ai_old + yi * yj * (aj_old - aj_new);

                let b1 = b - ei - yi * (ai_new - ai_old) * kii - yj * (aj_new - aj_old) * kij;
                let b2 = b - ej - yi * (ai_new - ai_old) * kij - yj * (aj_new - aj_old) * kjj;
                let b_new = if ai_new > 0.0 && ai_new < c {
                    b1
                } else if aj_new > 0.0 && aj_new < c {
                    b2
                } else {
                    (b1 + b2) / 2.0
                };

                let di = (ai_new - ai_old) * yi;
                let dj = (aj_new - aj_old) * yj;
                let db = b_new - b;
                for (k, e) in errors.iter_mut().enumerate() {
                    *e += di * gram[i * n + k] + dj * gram[j * n + k] + db;
                }

                alphas[i] = ai_new;
                alphas[j] = aj_new;
                b = b_new;
                num_changed += 1;
            }

            if num_changed == 0 {
                passes += 1;
            } else {
                passes = 0;
            }
        }

        let support_idx: Vec<usize> = (0..n).filter(|&k| alphas[k] > 1e-8).collect();
        let support_rows: Vec<Vec<f64>> = support_idx.iter().map(|&k| x.row(k).to_vec()).collect();
        let support = if support_rows.is_empty() {
            Matrix::zeros(0, x.cols())
        } else {
            Matrix::from_rows(&support_rows)?
        };

        self.fitted = Some(FittedModel {
            support,
            dual_coef: support_idx.iter().map(|&k| alphas[k] * labels[k]).collect(),
            bias: b,
            gamma,
            n_iter,
        });
        Ok(())
    }

    fn predict(&self, x: &Matrix) -> DataResult<Vec<f64>> {
        let model = self.fitted.as_ref().ok_or(DataError::NotFitted("SVC"))?;
        if x.cols() != model.support.cols() {
            return Err(DataError::DimensionMismatch(format!(
                "SVC was fitted with {} features, got {}",
                model.support.cols(),
                x.cols()
            )));
        }

        let predictions = (0..x.rows())
            .into_par_iter()
            .map(|i| {
                let xi = x.row(i);
                let f = model
                    .dual_coef
                    .iter()
                    .enumerate()
                    .fold(model.bias, |acc, (s, &coef)| {
                        acc + coef
                            * kernel_eval(self.kernel, model.gamma, self.degree, self.coef0, model.support.row(s), xi)
                    });
                if f >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        Ok(predictions)
    }

    fn score(&self, x: &Matrix, y: &[f64]) -> DataResult<f64> {
        let predictions = self.predict(x)?;
        accuracy(y, &predictions)
    }

    fn set_params(&mut self, params: &[(&str, ParamValue)]) -> DataResult<()> {
        // All-or-nothing: a bad entry leaves the estimator unchanged.
        let mut next = self.clone();
        for (key, value) in params {
            next.apply_param(key, value)?;
        }
        *self = next;
        Ok(())
    }
}
