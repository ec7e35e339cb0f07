use serde::{Deserialize, Serialize};
use stats::{mean, population_std_dev};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("no training cases")]
    Empty,

    #[error("data has {data} values, expected {cases} cases x {nvars} variables")]
    ShapeMismatch {
        data: usize,
        cases: usize,
        nvars: usize,
    },

    #[error("label at case {0} is not 0 or 1")]
    InvalidLabel(usize),
}

/// Training controls for [`LogisticRegression::fit`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Maximum gradient-descent iterations
    pub max_iter: usize,
    /// Step size applied to the full-batch gradient
    pub learning_rate: f64,
    /// Inverse L2 strength; the intercept is not penalized
    pub c: f64,
    /// Stop once every gradient component is below this
    pub tolerance: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        LogisticParams {
            max_iter: 200,
            learning_rate: 0.5,
            c: 1.0,
            tolerance: 1e-6,
        }
    }
}

/// Binary logistic regression on standardized inputs.
///
/// Data is passed row-major as a flat slice: `data[icase * nvars + ivar]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub beta: Vec<f64>,
    pub intercept: f64,
    pub xmeans: Vec<f64>,
    pub xscales: Vec<f64>,
    /// Iterations actually run
    pub iterations: usize,
    nvars: usize,
}

impl LogisticRegression {
    /// Fit by full-batch gradient descent on the L2-penalized mean log-loss.
    pub fn fit(
        data: &[f64],
        labels: &[u8],
        nvars: usize,
        params: &LogisticParams,
    ) -> Result<Self, ModelError> {
        let ncases = labels.len();
        if ncases == 0 || nvars == 0 {
            return Err(ModelError::Empty);
        }
        if data.len() != ncases * nvars {
            return Err(ModelError::ShapeMismatch {
                data: data.len(),
                cases: ncases,
                nvars,
            });
        }
        if let Some(bad) = labels.iter().position(|&y| y > 1) {
            return Err(ModelError::InvalidLabel(bad));
        }

        // Standardize X
        let mut xmeans = vec![0.0; nvars];
        let mut xscales = vec![1.0; nvars];
        let mut column = Vec::with_capacity(ncases);
        for ivar in 0..nvars {
            column.clear();
            column.extend((0..ncases).map(|icase| data[icase * nvars + ivar]));
            xmeans[ivar] = mean(&column);
            let sd = population_std_dev(&column);
            if sd > 1e-12 {
                xscales[ivar] = sd;
            }
        }
        let x: Vec<f64> = data
            .iter()
            .enumerate()
            .map(|(k, &v)| (v - xmeans[k % nvars]) / xscales[k % nvars])
            .collect();
        let y: Vec<f64> = labels.iter().map(|&l| l as f64).collect();

        let penalty = 1.0 / (params.c * ncases as f64);
        let mut beta = vec![0.0; nvars];
        let mut intercept = 0.0;
        let mut grad = vec![0.0; nvars];
        let mut iterations = 0;

        for _ in 0..params.max_iter {
            iterations += 1;
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_intercept = 0.0;

            for icase in 0..ncases {
                let row = &x[icase * nvars..(icase + 1) * nvars];
                let z = intercept + dot(&beta, row);
                let err = sigmoid(z) - y[icase];
                grad_intercept += err;
                for (g, &xv) in grad.iter_mut().zip(row) {
                    *g += err * xv;
                }
            }

            grad_intercept /= ncases as f64;
            for (g, b) in grad.iter_mut().zip(&beta) {
                *g = *g / ncases as f64 + penalty * b;
            }

            intercept -= params.learning_rate * grad_intercept;
            for (b, g) in beta.iter_mut().zip(&grad) {
                *b -= params.learning_rate * g;
            }

            let largest = grad
                .iter()
                .fold(grad_intercept.abs(), |acc, g| acc.max(g.abs()));
            if largest < params.tolerance {
                break;
            }
        }

        Ok(LogisticRegression {
            beta,
            intercept,
            xmeans,
            xscales,
            iterations,
            nvars,
        })
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Probability of class 1 for a single case of raw (unstandardized) inputs
    pub fn predict_proba_row(&self, row: &[f64]) -> f64 {
        let z = row
            .iter()
            .enumerate()
            .map(|(ivar, &v)| self.beta[ivar] * (v - self.xmeans[ivar]) / self.xscales[ivar])
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    /// Probability of class 1 for every case of a row-major matrix
    pub fn predict_proba(&self, data: &[f64]) -> Vec<f64> {
        data.chunks_exact(self.nvars)
            .map(|row| self.predict_proba_row(row))
            .collect()
    }

    /// Class labels at the 0.5 threshold
    pub fn predict(&self, data: &[f64]) -> Vec<u8> {
        self.predict_proba(data)
            .into_iter()
            .map(|p| u8::from(p > 0.5))
            .collect()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_separable_one_variable() {
        // label is 1 exactly when x > 0
        let data: Vec<f64> = (-20..20).map(|i| i as f64 + 0.5).collect();
        let labels: Vec<u8> = data.iter().map(|&x| u8::from(x > 0.0)).collect();

        let model = LogisticRegression::fit(&data, &labels, 1, &LogisticParams::default()).unwrap();

        assert!(model.beta[0] > 0.0);
        assert_eq!(model.predict(&data), labels);
        assert!(model.predict_proba_row(&[15.0]) > 0.9);
        assert!(model.predict_proba_row(&[-15.0]) < 0.1);
    }

    #[test]
    fn test_constant_column_is_ignored() {
        // second variable never varies; its scale falls back to 1
        let mut data = Vec::new();
        let mut labels = Vec::new();
        for i in 0..30 {
            let x = i as f64 - 15.0;
            data.push(x);
            data.push(7.0);
            labels.push(u8::from(x > 0.0));
        }
        let model = LogisticRegression::fit(&data, &labels, 2, &LogisticParams::default()).unwrap();
        assert_eq!(model.xscales[1], 1.0);
        assert!(model.beta[1].abs() < 1e-12);
        assert_eq!(model.predict_proba(&data).len(), 30);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let params = LogisticParams::default();
        assert_eq!(
            LogisticRegression::fit(&[], &[], 2, &params).unwrap_err(),
            ModelError::Empty
        );
        assert!(matches!(
            LogisticRegression::fit(&[1.0, 2.0, 3.0], &[0, 1], 2, &params),
            Err(ModelError::ShapeMismatch { .. })
        ));
        assert_eq!(
            LogisticRegression::fit(&[1.0, 2.0], &[0, 2], 1, &params).unwrap_err(),
            ModelError::InvalidLabel(1)
        );
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }
}
