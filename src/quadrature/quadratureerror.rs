use thiserror::Error;

use crate::function::evaluablefunction::EvaluationError;

/// 積分引擎的錯誤。
///
/// 全部代表「輸入被拒絕」或「未收斂」，沒有任何一種是引擎內部故障；
/// 引擎不重試也不吞掉錯誤，原樣往上傳給呼叫端決定如何呈現。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// 分割數不是正整數。
    #[error("{0}")]
    Step(String),

    /// 需要偶數分割數卻收到奇數；雖然沿用 "warning" 的稱呼，但會中止計算。
    #[error("{0}")]
    OddStep(String),

    #[error("unknown integration method '{0}'")]
    UnknownRule(String),

    #[error("tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),

    #[error("Runge method did not converge after {doublings} doublings (tolerance {tolerance})")]
    DidNotConverge { doublings: usize, tolerance: f64 },

    #[error("methods do not agree for any step up to {max_step}")]
    SearchDidNotConverge { max_step: usize },

    #[error("integration produced a non-finite value")]
    NonFiniteResult,
}
