use thiserror::Error;

use crate::function::catalogfunction::UnknownFunctionError;
use crate::function::evaluablefunction::EvaluationError;
use crate::quadrature::quadratureerror::QuadratureError;

/// 使用者輸入欄位本身的問題，與引擎拒絕的錯誤分開，方便呈現層給出不同訊息。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("field '{field}' is empty")]
    Empty { field: &'static str },

    #[error("field '{field}' is not a number: '{value}'")]
    NonNumeric { field: &'static str, value: String },

    #[error(transparent)]
    UnknownFunction(#[from] UnknownFunctionError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Quadrature(#[from] QuadratureError),
}

impl From<EvaluationError> for RequestError {
    fn from(error: EvaluationError) -> Self {
        RequestError::Quadrature(QuadratureError::Evaluation(error))
    }
}

/// 將一個輸入欄位解析為有限的實數。
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::NonNumeric { field, value: trimmed.to_owned() }),
    }
}
