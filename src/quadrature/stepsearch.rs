use serde::Deserialize;
use tracing::debug;

use crate::function::evaluablefunction::EvaluableFunction;
use super::quadratureerror::QuadratureError;
use super::spanchecker::rules_agree;
use super::stepvalidator::{
    require_even,
    StepCount,
    COMPARISON_ODD_STEP_MESSAGE
};

/// 最小一致分割數搜尋的設定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StepSearchOptions {
    /// 向上平方擴張時 n 的上限；超過仍不一致則回報未收斂。
    pub max_step: usize,
}

impl Default for StepSearchOptions {
    fn default() -> Self {
        StepSearchOptions { max_step: 1 << 24 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// find_minimal_agreeing_step
// ─────────────────────────────────────────────────────────────────────────────
//
// 找出使四種積分法（截斷到小數第 3 位）完全一致的最小偶數 n，
// 前提假設：一旦在某個 n 一致，更細的分割也都一致。
//
//   n_start 已一致 → 每次減 2 往下找，遇到不一致即停
//   n_start 不一致 → n ← n² 擴張到一致為止，得到區間 (bad_n, good_n)，
//                    再於區間內的偶數上二分搜尋
//
// 平方擴張以 `StepSearchOptions::max_step` 封頂：n² 超過上限時改試上限本身，
// 上限仍不一致則回傳 `QuadratureError::SearchDidNotConverge`。

pub fn find_minimal_agreeing_step<F, N>(
    func: &F,
    a: f64,
    b: f64,
    n_start: N,
    options: &StepSearchOptions,
) -> Result<usize, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
    N: StepCount,
{
    let n_start = n_start.to_step()?;
    require_even(n_start, COMPARISON_ODD_STEP_MESSAGE)?;

    if rules_agree(func, a, b, n_start)? {
        debug!(n_start, "methods already agree, searching downward");
        return search_downward(func, a, b, n_start);
    }

    let (bad_n, good_n) = bracket_upward(func, a, b, n_start, options)?;
    debug!(bad_n, good_n, "bracketed minimal agreeing step");
    bisect_even_steps(func, a, b, bad_n, good_n)
}

fn search_downward<F>(func: &F, a: f64, b: f64, n_start: usize) -> Result<usize, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let mut good_n = n_start;
    while good_n >= 4 {
        let candidate = good_n - 2;
        if !rules_agree(func, a, b, candidate)? {
            break;
        }
        good_n = candidate;
    }
    Ok(good_n)
}

/// 回傳 (最大的已知不一致 n, 第一個一致的 n)。
fn bracket_upward<F>(
    func: &F,
    a: f64,
    b: f64,
    n_start: usize,
    options: &StepSearchOptions,
) -> Result<(usize, usize), QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let max_step = options.max_step - options.max_step % 2;
    let mut bad_n = n_start;
    loop {
        let candidate = match bad_n.checked_mul(bad_n) {
            Some(square) if square <= max_step => square,
            _ if max_step > bad_n => max_step,
            _ => return Err(QuadratureError::SearchDidNotConverge { max_step: options.max_step }),
        };
        debug!(bad_n, candidate, "widening step bracket");
        if rules_agree(func, a, b, candidate)? {
            return Ok((bad_n, candidate));
        }
        bad_n = candidate;
    }
}

/// 在 bad_n < n < good_n 的偶數中找最小的一致 n；都不一致時回傳 good_n。
fn bisect_even_steps<F>(func: &F, a: f64, b: f64, bad_n: usize, good_n: usize) -> Result<usize, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let first = bad_n + 2;
    let (mut low, mut high) = (0, (good_n - bad_n) / 2 - 1);
    while low < high {
        let mid = low + (high - low) / 2;
        if rules_agree(func, a, b, first + 2 * mid)? {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    Ok(first + 2 * low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::catalogfunction::CatalogFunction;
    use crate::function::evaluablefunction::EvaluationError;
    use crate::quadrature::spanchecker::span;

    struct Constant(f64);

    impl EvaluableFunction for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn value(&self, _x: f64) -> f64 {
            self.0
        }
    }

    struct Identity;

    impl EvaluableFunction for Identity {
        fn name(&self) -> &str {
            "identity"
        }

        fn value(&self, x: f64) -> f64 {
            x
        }
    }

    fn assert_minimal<F: EvaluableFunction>(func: &F, a: f64, b: f64, n: usize) {
        assert_eq!(n % 2, 0);
        assert_eq!(span(func, a, b, n), Ok(0.0));
        if n > 2 {
            assert!(span(func, a, b, n - 2).unwrap() > 0.0);
        }
    }

    #[test]
    fn test_constant_searches_down_to_two() {
        let options = StepSearchOptions::default();
        assert_eq!(find_minimal_agreeing_step(&Constant(3.0), 0.0, 2.0, 8, &options), Ok(2));
    }

    #[test]
    fn test_f2_upward_search_is_minimal() {
        let options = StepSearchOptions::default();
        let n = find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, 8, &options).unwrap();
        assert!(n > 64 && n <= 4096);
        assert_minimal(&CatalogFunction::F2, 0.0, 1.0, n);
    }

    #[test]
    fn test_f2_downward_search_finds_same_step() {
        let options = StepSearchOptions::default();
        let upward = find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, 8, &options).unwrap();
        let downward = find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, upward + 100, &options).unwrap();
        assert_eq!(upward, downward);
    }

    #[test]
    fn test_f1_on_defined_interval() {
        let options = StepSearchOptions { max_step: 1 << 20 };
        let n = find_minimal_agreeing_step(&CatalogFunction::F1, 1.0, 2.0, 8, &options).unwrap();
        assert_minimal(&CatalogFunction::F1, 1.0, 2.0, n);
    }

    #[test]
    fn test_f1_outside_domain_fails() {
        let options = StepSearchOptions::default();
        let result = find_minimal_agreeing_step(&CatalogFunction::F1, 0.0, 2.0, 8, &options);
        assert!(matches!(
            result,
            Err(QuadratureError::Evaluation(EvaluationError::Domain { .. }))
        ));
    }

    #[test]
    fn test_zero_denominator_stops_search() {
        struct Pole;

        impl EvaluableFunction for Pole {
            fn name(&self) -> &str {
                "pole"
            }

            fn value(&self, x: f64) -> f64 {
                1.0 / self.denominator(x)
            }

            fn denominator(&self, x: f64) -> f64 {
                x - 0.5
            }
        }

        let options = StepSearchOptions::default();
        assert_eq!(
            find_minimal_agreeing_step(&Pole, 0.0, 1.0, 4, &options),
            Err(QuadratureError::Evaluation(EvaluationError::ZeroDenominator { function: "pole".to_owned() }))
        );
    }

    #[test]
    fn test_identity_needs_rounding_to_close_gap() {
        // 左矩形 0.5 - 1/(2n) 要進位到 0.50000 才會與其他方法一致，約需 n = 100000
        let options = StepSearchOptions::default();
        let n = find_minimal_agreeing_step(&Identity, 0.0, 1.0, 6, &options).unwrap();
        assert!(n == 100000 || n == 100002, "n = {}", n);
        assert_minimal(&Identity, 0.0, 1.0, n);
    }

    #[test]
    fn test_capped_search_reports_non_convergence() {
        let options = StepSearchOptions { max_step: 5000 };
        assert_eq!(
            find_minimal_agreeing_step(&Identity, 0.0, 1.0, 6, &options),
            Err(QuadratureError::SearchDidNotConverge { max_step: 5000 })
        );
    }

    #[test]
    fn test_cap_is_tried_before_giving_up() {
        let options = StepSearchOptions { max_step: 4097 };
        let n = find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, 80, &options).unwrap();
        assert_minimal(&CatalogFunction::F2, 0.0, 1.0, n);
    }

    #[test]
    fn test_invalid_start_steps() {
        let options = StepSearchOptions::default();
        assert!(matches!(
            find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, 7, &options),
            Err(QuadratureError::OddStep(_))
        ));
        assert!(matches!(
            find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, 0, &options),
            Err(QuadratureError::Step(_))
        ));
        assert!(matches!(
            find_minimal_agreeing_step(&CatalogFunction::F2, 0.0, 1.0, 2.5, &options),
            Err(QuadratureError::Step(_))
        ));
    }
}
