use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::function::evaluablefunction::EvaluableFunction;
use crate::math::round::{
    truncate,
    truncate_float,
    COMPARISON_DIGITS
};
use super::quadratureerror::QuadratureError;
use super::quadraturerule::QuadratureRule;
use super::stepvalidator::StepCount;

/// 四種積分法在同一個 (a, b, n) 下的結果，順序同 `QuadratureRule::ALL`。
pub fn rule_results<F, N>(func: &F, a: f64, b: f64, n: N) -> Result<[f64; 4], QuadratureError>
where
    F: EvaluableFunction + ?Sized,
    N: StepCount,
{
    let mut results = [0.0; 4];
    for (result, rule) in results.iter_mut().zip(QuadratureRule::ALL) {
        *result = rule.integrate(func, a, b, n)?;
    }
    Ok(results)
}

/// 各結果截斷到小數第 3 位後的 max - min。
///
/// 一般情況以 `Decimal` 精確計算；結果超出 `Decimal` 範圍時整組改用浮點截斷。
/// 只有結果本身為 NaN 或無窮大時才回傳 `QuadratureError::NonFiniteResult`。
fn truncated_span<F>(func: &F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let results = rule_results(func, a, b, n)?;
    if results.iter().any(|result| !result.is_finite()) {
        return Err(QuadratureError::NonFiniteResult);
    }

    match decimal_span(&results) {
        Some(span) => Ok(span),
        None => Ok(float_span(&results)),
    }
}

fn decimal_span(results: &[f64]) -> Option<f64> {
    let truncated = results
        .iter()
        .map(|&result| truncate(result, COMPARISON_DIGITS))
        .collect::<Option<Vec<Decimal>>>()?;
    let max = truncated.iter().max()?;
    let min = truncated.iter().min()?;
    max.checked_sub(*min)?.to_f64()
}

fn float_span(results: &[f64]) -> f64 {
    let truncated = results.iter().map(|&result| truncate_float(result, COMPARISON_DIGITS));
    let (min, max) = truncated.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    max - min
}

/// 四種積分法結果的分歧程度；回傳 0 代表四者在小數第 3 位（截斷）一致。
///
/// 分割數須為偶數（Simpson 的要求），否則回傳 `QuadratureError::OddStep`。
pub fn span<F, N>(func: &F, a: f64, b: f64, n: N) -> Result<f64, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
    N: StepCount,
{
    let n = n.to_step()?;
    truncated_span(func, a, b, n)
}

/// `span == 0` 的判斷，供最小分割數搜尋使用。
pub fn rules_agree<F>(func: &F, a: f64, b: f64, n: usize) -> Result<bool, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    Ok(truncated_span(func, a, b, n)? == 0.0)
}
