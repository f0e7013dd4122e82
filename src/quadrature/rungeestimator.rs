use serde::Deserialize;
use tracing::debug;

use crate::function::evaluablefunction::EvaluableFunction;
use super::quadratureerror::QuadratureError;
use super::quadraturerule::QuadratureRule;
use super::stepvalidator::StepCount;

/// Runge 法則的設定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RungeOptions {
    /// n 最多加倍幾次；用完仍未達容許誤差即回報未收斂。
    pub max_doublings: usize,
}

impl Default for RungeOptions {
    fn default() -> Self {
        RungeOptions { max_doublings: 100 }
    }
}

/// Runge 法則收斂時的結果：I_n、I_2n 與 n（粗估所用的分割數）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RungeEstimate {
    coarse: f64,
    fine: f64,
    n: usize,
    order: u32,
}

impl RungeEstimate {
    pub fn new(coarse: f64, fine: f64, n: usize, order: u32) -> RungeEstimate {
        RungeEstimate { coarse, fine, n, order }
    }

    /// I_n
    pub fn coarse(&self) -> f64 {
        self.coarse
    }

    /// I_2n
    pub fn fine(&self) -> f64 {
        self.fine
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Richardson 誤差估計 |I_n - I_2n| / (2^p - 1)
    pub fn error_estimate(&self) -> f64 {
        (self.coarse - self.fine).abs() / ((1u64 << self.order) - 1) as f64
    }
}

/// 以 Runge 法則自動控制誤差：從 n_start 開始不斷將 n 加倍，
/// 直到 |I_n - I_2n| / (2^p - 1) < tolerance。
///
/// 每一輪的 I_2n 即為下一輪的 I_n，不重複計算。
pub fn runge_estimate<F, N>(
    rule: QuadratureRule,
    func: &F,
    a: f64,
    b: f64,
    n_start: N,
    tolerance: f64,
    options: &RungeOptions,
) -> Result<RungeEstimate, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
    N: StepCount,
{
    let mut n = n_start.to_step()?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(QuadratureError::InvalidTolerance(tolerance));
    }

    let order = rule.convergence_order();
    let mut coarse = rule.integrate(func, a, b, n)?;
    for doubling in 0..=options.max_doublings {
        let fine_n = n.checked_mul(2).ok_or(QuadratureError::DidNotConverge {
            doublings: doubling,
            tolerance,
        })?;
        let fine = rule.integrate(func, a, b, fine_n)?;
        let estimate = RungeEstimate::new(coarse, fine, n, order);
        debug!(rule = rule.name(), n, coarse, fine, error = estimate.error_estimate(), "runge step");

        if estimate.error_estimate() < tolerance {
            return Ok(estimate);
        }
        coarse = fine;
        n = fine_n;
    }

    Err(QuadratureError::DidNotConverge { doublings: options.max_doublings, tolerance })
}
