use nalgebra::{
    DVector,
    DVectorView
};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("argument outside the domain of {function}")]
    Domain { function: String },

    #[error("denominator of {function} is zero")]
    ZeroDenominator { function: String },
}

/// 可對一整批點求值的實函數。
///
/// 求值前會先對整個陣列做完整的定義域檢查，只要有任何一點不合法，
/// 整批呼叫就失敗，不會回傳部分結果：
///   1. 任一點落在定義域外 → `EvaluationError::Domain`
///   2. 任一點使分母恰為零 → `EvaluationError::ZeroDenominator`
///
/// 實作者只需提供 `value`；有限制的函數再覆寫 `in_domain` 與 `denominator`。
/// `value` 與 `denominator` 只會在 `in_domain` 通過之後被呼叫。
pub trait EvaluableFunction: Send + Sync {
    fn name(&self) -> &str;

    fn value(&self, x: f64) -> f64;

    fn in_domain(&self, _x: f64) -> bool {
        true
    }

    fn denominator(&self, _x: f64) -> f64 {
        1.0
    }

    fn check_domain(&self, x_arr: DVectorView<'_, f64>) -> Result<(), EvaluationError> {
        if x_arr.iter().any(|&x| !self.in_domain(x)) {
            return Err(EvaluationError::Domain { function: self.name().to_owned() });
        }
        if x_arr.iter().any(|&x| self.denominator(x) == 0.0) {
            return Err(EvaluationError::ZeroDenominator { function: self.name().to_owned() });
        }
        Ok(())
    }

    fn evaluate(&self, x_arr: &DVector<f64>) -> Result<DVector<f64>, EvaluationError> {
        self.evaluate_view(x_arr.rows(0, x_arr.len()))
    }

    /// 與 `evaluate` 相同，但直接讀取既有陣列的一段，不另外複製取樣點。
    fn evaluate_view(&self, x_arr: DVectorView<'_, f64>) -> Result<DVector<f64>, EvaluationError> {
        self.check_domain(x_arr)?;
        trace!(function = self.name(), points = x_arr.len(), "evaluating");
        Ok(x_arr.map(|x| self.value(x)))
    }
}
