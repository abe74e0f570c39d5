//! Seasonal ARIMA point forecaster.
//!
//! The model file carries fitted coefficients plus the tail of the training
//! series (and its one-step residuals). Forecasting is the standard recursion on
//! the differenced series:
//!
//! ```text
//! w[t] = c + Σ a_k·w[t-k] + Σ m_k·e[t-k]
//! ```
//!
//! where `a` and `m` are the expanded multiplicative lag tables
//! `(1 - φ(B))(1 - Φ(Bˢ))` and `(1 + θ(B))(1 + Θ(Bˢ))`. Future shocks are zero.
//! The result is then integrated back through every differencing level.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

/// Non-seasonal (p, d, q)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SarimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

/// Seasonal (P, D, Q, s)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeasonalOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub period: usize,
}

impl SeasonalOrder {
    pub fn is_seasonal(&self) -> bool {
        self.p + self.d + self.q > 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SarimaModel {
    pub order: SarimaOrder,
    pub seasonal_order: SeasonalOrder,

    // Coefficients
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
    /// Intercept of the differenced equation
    pub constant: f64,

    /// Trailing observations of the training series (original scale, oldest first)
    pub history: Vec<f64>,
    /// Trailing one-step residuals, aligned with the END of the differenced history
    pub residuals: Vec<f64>,
}

impl SarimaModel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order: SarimaOrder,
        seasonal_order: SeasonalOrder,
        ar: Vec<f64>,
        ma: Vec<f64>,
        seasonal_ar: Vec<f64>,
        seasonal_ma: Vec<f64>,
        constant: f64,
        history: Vec<f64>,
    ) -> Self {
        Self {
            order,
            seasonal_order,
            ar,
            ma,
            seasonal_ar,
            seasonal_ma,
            constant,
            history,
            residuals: Vec::new(),
        }
    }

    pub fn describe(&self) -> String {
        let o = self.order;
        let s = self.seasonal_order;
        if s.is_seasonal() {
            format!(
                "SARIMA({},{},{})({},{},{},{})",
                o.p, o.d, o.q, s.p, s.d, s.q, s.period
            )
        } else {
            format!("ARIMA({},{},{})", o.p, o.d, o.q)
        }
    }

    /// Largest lags implied by the orders: `(differencing depth, AR span, MA span)`.
    /// `None` if the seasonal period makes any of them overflow.
    fn lag_spans(&self) -> Option<(usize, usize, usize)> {
        let o = self.order;
        let s = self.seasonal_order;
        let seasonal = |count: usize| {
            if s.is_seasonal() {
                count.checked_mul(s.period)
            } else {
                Some(0)
            }
        };
        Some((
            o.d.checked_add(seasonal(s.d)?)?,
            o.p.checked_add(seasonal(s.p)?)?,
            o.q.checked_add(seasonal(s.q)?)?,
        ))
    }

    pub fn validate(&self) -> Result<()> {
        let o = self.order;
        let s = self.seasonal_order;

        ensure!(
            self.ar.len() == o.p,
            "AR coefficient count {} does not match p = {}",
            self.ar.len(),
            o.p
        );
        ensure!(
            self.ma.len() == o.q,
            "MA coefficient count {} does not match q = {}",
            self.ma.len(),
            o.q
        );
        ensure!(
            self.seasonal_ar.len() == s.p,
            "Seasonal AR coefficient count {} does not match P = {}",
            self.seasonal_ar.len(),
            s.p
        );
        ensure!(
            self.seasonal_ma.len() == s.q,
            "Seasonal MA coefficient count {} does not match Q = {}",
            self.seasonal_ma.len(),
            s.q
        );
        if s.is_seasonal() {
            ensure!(
                s.period >= 2,
                "Seasonal period must be at least 2 (got {})",
                s.period
            );
        }

        let all_finite = std::iter::once(&self.constant)
            .chain(&self.ar)
            .chain(&self.ma)
            .chain(&self.seasonal_ar)
            .chain(&self.seasonal_ma)
            .chain(&self.history)
            .chain(&self.residuals)
            .all(|v| v.is_finite());
        ensure!(all_finite, "Model contains non-finite parameters or history");

        // Lag tables are sized by these spans; bound them by the stored history
        // before anything is allocated.
        let history_len = self.history.len();
        let Some((depth, ar_span, ma_span)) = self.lag_spans() else {
            bail!("Seasonal period {} is out of range", s.period);
        };
        ensure!(
            depth <= history_len && ar_span <= history_len && ma_span <= history_len,
            "{} reaches back {} observations but the model history has only {}",
            self.describe(),
            depth.max(ar_span).max(ma_span),
            history_len
        );

        let max_ar_lag = ar_lag_table(self).len();
        let required = depth + max_ar_lag.max(1);
        ensure!(
            history_len >= required,
            "Model history has {} observations, {} needs at least {}",
            history_len,
            self.describe(),
            required
        );

        let differenced_len = history_len - depth;
        ensure!(
            self.residuals.len() <= differenced_len,
            "Model has {} residuals but only {} differenced observations",
            self.residuals.len(),
            differenced_len
        );
        Ok(())
    }

    /// Repeated differencing stack: `levels[0]` is the history, each following
    /// level is the previous one differenced at `lags[i]`.
    fn differencing_levels(&self) -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut levels = vec![self.history.clone()];
        let mut lags = Vec::new();

        let seasonal_d = if self.seasonal_order.is_seasonal() {
            self.seasonal_order.d
        } else {
            0
        };
        let schedule = std::iter::repeat_n(self.seasonal_order.period, seasonal_d)
            .chain(std::iter::repeat_n(1, self.order.d));

        for lag in schedule {
            let last = levels.last().map(Vec::as_slice).unwrap_or_default();
            let next = difference(last, lag);
            levels.push(next);
            lags.push(lag);
        }
        (levels, lags)
    }

    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        if steps == 0 {
            bail!("Forecast horizon must be at least one step");
        }
        self.validate()?;

        let ar_lags = ar_lag_table(self);
        let ma_lags = ma_lag_table(self);
        let (levels, lags) = self.differencing_levels();

        let mut w = levels.last().cloned().unwrap_or_default();
        let known = w.len();
        let mut shocks = vec![0.0; known - self.residuals.len()];
        shocks.extend_from_slice(&self.residuals);

        for _ in 0..steps {
            let t = w.len();
            let value = self.constant
                + weighted_lags(&ar_lags, &w, t)
                + weighted_lags(&ma_lags, &shocks, t);
            w.push(value);
            shocks.push(0.0);
        }

        // Integrate back down the differencing stack.
        let mut upper = w.split_off(known);
        for (level, &lag) in levels.iter().zip(&lags).rev() {
            let mut base = level.clone();
            for &delta in &upper {
                let previous = base[base.len() - lag];
                base.push(delta + previous);
            }
            upper = base.split_off(level.len());
        }
        Ok(upper)
    }

    /// Replace `residuals` with the in-sample one-step errors of the recursion
    /// over the stored history. Used when stamping fixed coefficients onto a
    /// fresh history; no parameter is estimated.
    pub fn filter_residuals(&mut self) -> Result<()> {
        self.residuals.clear();
        self.validate()?;

        let ar_lags = ar_lag_table(self);
        let ma_lags = ma_lag_table(self);
        let (levels, _) = self.differencing_levels();
        let w = levels.last().cloned().unwrap_or_default();

        let mut shocks = Vec::with_capacity(w.len());
        for t in 0..w.len() {
            let predicted = self.constant
                + weighted_lags(&ar_lags, &w, t)
                + weighted_lags(&ma_lags, &shocks, t);
            shocks.push(w[t] - predicted);
        }
        self.residuals = shocks;
        Ok(())
    }
}

fn difference(data: &[f64], lag: usize) -> Vec<f64> {
    if data.len() <= lag {
        return Vec::new();
    }
    (lag..data.len()).map(|i| data[i] - data[i - lag]).collect()
}

/// Σ table[k-1]·series[t-k] over the lags that exist before `t`.
fn weighted_lags(table: &[f64], series: &[f64], t: usize) -> f64 {
    table
        .iter()
        .enumerate()
        .map(|(i, coeff)| (i + 1, coeff))
        .filter(|(k, _)| *k <= t)
        .map(|(k, coeff)| coeff * series[t - k])
        .sum()
}

/// Product of two lag polynomials given as coefficient vectors (index = power of B).
fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Polynomial `1 + sign·Σ coeffs[i]·B^((i+1)·stride)`.
fn lag_polynomial(coeffs: &[f64], stride: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * stride + 1];
    poly[0] = 1.0;
    for (i, c) in coeffs.iter().enumerate() {
        poly[(i + 1) * stride] = sign * c;
    }
    poly
}

/// Trims trailing zeros and drops the constant term.
fn into_lag_table(mut poly: Vec<f64>, sign: f64) -> Vec<f64> {
    while poly.len() > 1 && poly.last() == Some(&0.0) {
        poly.pop();
    }
    poly.into_iter().skip(1).map(|c| sign * c).collect()
}

fn seasonal_stride(model: &SarimaModel) -> usize {
    model.seasonal_order.period.max(1)
}

/// Expanded AR table `a` with `(1 - φ(B))(1 - Φ(Bˢ)) = 1 - Σ a_k B^k`.
fn ar_lag_table(model: &SarimaModel) -> Vec<f64> {
    let phi = lag_polynomial(&model.ar, 1, -1.0);
    let seasonal_phi = lag_polynomial(&model.seasonal_ar, seasonal_stride(model), -1.0);
    into_lag_table(poly_mul(&phi, &seasonal_phi), -1.0)
}

/// Expanded MA table `m` with `(1 + θ(B))(1 + Θ(Bˢ)) = 1 + Σ m_k B^k`.
fn ma_lag_table(model: &SarimaModel) -> Vec<f64> {
    let theta = lag_polynomial(&model.ma, 1, 1.0);
    let seasonal_theta = lag_polynomial(&model.seasonal_ma, seasonal_stride(model), 1.0);
    into_lag_table(poly_mul(&theta, &seasonal_theta), 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arima(p: Vec<f64>, d: usize, q: Vec<f64>, constant: f64, history: Vec<f64>) -> SarimaModel {
        SarimaModel::new(
            SarimaOrder {
                p: p.len(),
                d,
                q: q.len(),
            },
            SeasonalOrder::default(),
            p,
            q,
            Vec::new(),
            Vec::new(),
            constant,
            history,
        )
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "length mismatch: {:?}", actual);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn test_random_walk_repeats_last_value() {
        let model = arima(vec![], 1, vec![], 0.0, vec![10.0, 11.0, 12.5]);
        assert_close(&model.forecast(4).unwrap(), &[12.5, 12.5, 12.5, 12.5]);
    }

    #[test]
    fn test_random_walk_with_drift() {
        let model = arima(vec![], 1, vec![], 0.5, vec![9.0, 10.0]);
        assert_close(&model.forecast(3).unwrap(), &[10.5, 11.0, 11.5]);
    }

    #[test]
    fn test_ar1_decays_toward_mean() {
        // Mean = c / (1 - φ) = 10 / 0.5 = 20
        let model = arima(vec![0.5], 0, vec![], 10.0, vec![18.0, 30.0]);
        assert_close(&model.forecast(3).unwrap(), &[25.0, 22.5, 21.25]);
    }

    #[test]
    fn test_ma1_uses_last_residual_once() {
        let mut model = arima(vec![], 0, vec![0.5], 1.0, vec![3.0]);
        model.residuals = vec![2.0];
        assert_close(&model.forecast(3).unwrap(), &[2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_seasonal_naive_repeats_last_season() {
        let model = SarimaModel::new(
            SarimaOrder::default(),
            SeasonalOrder {
                p: 0,
                d: 1,
                q: 0,
                period: 4,
            },
            vec![],
            vec![],
            vec![],
            vec![],
            0.0,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        );
        assert_eq!(model.describe(), "SARIMA(0,0,0)(0,1,0,4)");
        assert_close(&model.forecast(6).unwrap(), &[5.0, 6.0, 7.0, 8.0, 5.0, 6.0]);
    }

    #[test]
    fn test_multiplicative_ar_expansion() {
        let model = SarimaModel::new(
            SarimaOrder { p: 1, d: 0, q: 0 },
            SeasonalOrder {
                p: 1,
                d: 0,
                q: 0,
                period: 4,
            },
            vec![0.5],
            vec![],
            vec![0.2],
            vec![],
            0.0,
            vec![0.0; 6],
        );
        // (1 - 0.5B)(1 - 0.2B⁴) = 1 - 0.5B - 0.2B⁴ + 0.1B⁵
        assert_close(&ar_lag_table(&model), &[0.5, 0.0, 0.0, 0.2, -0.1]);
        assert!(ma_lag_table(&model).is_empty());
    }

    #[test]
    fn test_forecast_length_matches_steps() {
        let model = arima(vec![0.3], 1, vec![-0.2], 0.05, (1..=40).map(f64::from).collect());
        for steps in [1, 5, 30, 90] {
            assert_eq!(model.forecast(steps).unwrap().len(), steps);
        }
    }

    #[test]
    fn test_zero_steps_is_rejected() {
        let model = arima(vec![], 1, vec![], 0.0, vec![1.0, 2.0]);
        assert!(model.forecast(0).is_err());
    }

    #[test]
    fn test_validate_rejects_coefficient_mismatch() {
        let mut model = arima(vec![0.5], 0, vec![], 0.0, vec![1.0, 2.0]);
        model.order.p = 2;
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("AR coefficient count"), "{}", err);
    }

    #[test]
    fn test_validate_rejects_short_history() {
        let model = arima(vec![0.5, 0.1], 1, vec![], 0.0, vec![1.0, 2.0]);
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("needs at least"), "{}", err);
    }

    #[test]
    fn test_validate_rejects_period_beyond_history() {
        let model = SarimaModel::new(
            SarimaOrder::default(),
            SeasonalOrder {
                p: 1,
                d: 0,
                q: 0,
                period: 1 << 62,
            },
            vec![],
            vec![],
            vec![0.1],
            vec![],
            0.0,
            vec![1.0, 2.0, 3.0],
        );
        let err = model.validate().unwrap_err().to_string();
        assert!(err.contains("model history has only 3"), "{}", err);

        // Overflowing span: 2 seasonal differences of a near-max period
        let mut overflowing = model.clone();
        overflowing.seasonal_order.d = 2;
        overflowing.seasonal_order.period = usize::MAX / 2 + 1;
        let err = overflowing.validate().unwrap_err().to_string();
        assert!(err.contains("out of range"), "{}", err);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let model = arima(vec![f64::NAN], 0, vec![], 0.0, vec![1.0, 2.0]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_filter_residuals_of_perfect_fit_are_zero() {
        // A straight line is a perfect random walk with drift 1.0
        let mut model = arima(vec![], 1, vec![], 1.0, vec![1.0, 2.0, 3.0, 4.0]);
        model.filter_residuals().unwrap();
        assert_close(&model.residuals, &[0.0, 0.0, 0.0]);
        assert_close(&model.forecast(2).unwrap(), &[5.0, 6.0]);
    }
}
