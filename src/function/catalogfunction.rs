use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use super::evaluablefunction::EvaluableFunction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown function '{0}'")]
pub struct UnknownFunctionError(pub String);

/// 內建的被積函數目錄。
///
/// 目錄是封閉的：新增函數就是新增一個 variant，並在下方 `EvaluableFunction`
/// 的實作中補上它的定義域與分母。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogFunction {
    /// f(x) = sqrt(1.5x + 1) / (1.2x + sqrt(3x² - 1.8))
    #[serde(alias = "function_1")]
    F1,
    /// f(x) = sin(0.8x + 0.3) / (1.2 + cos(x² + 0.4))
    #[serde(alias = "function_2")]
    F2,
}

impl CatalogFunction {
    pub const ALL: [CatalogFunction; 2] = [CatalogFunction::F1, CatalogFunction::F2];

    pub fn formula(&self) -> &'static str {
        match self {
            CatalogFunction::F1 => "sqrt(1.5x + 1) / (1.2x + sqrt(3x^2 - 1.8))",
            CatalogFunction::F2 => "sin(0.8x + 0.3) / (1.2 + cos(x^2 + 0.4))",
        }
    }
}

impl EvaluableFunction for CatalogFunction {
    fn name(&self) -> &str {
        match self {
            CatalogFunction::F1 => "f1",
            CatalogFunction::F2 => "f2",
        }
    }

    fn value(&self, x: f64) -> f64 {
        match self {
            CatalogFunction::F1 => (1.5 * x + 1.0).sqrt() / self.denominator(x),
            CatalogFunction::F2 => (0.8 * x + 0.3).sin() / self.denominator(x),
        }
    }

    fn in_domain(&self, x: f64) -> bool {
        match self {
            // 兩個根號內皆須非負；NaN 的比較結果為 false，一併視為定義域外
            CatalogFunction::F1 => 1.5 * x + 1.0 >= 0.0 && 3.0 * x * x - 1.8 >= 0.0,
            CatalogFunction::F2 => true,
        }
    }

    fn denominator(&self, x: f64) -> f64 {
        match self {
            CatalogFunction::F1 => 1.2 * x + (3.0 * x * x - 1.8).sqrt(),
            CatalogFunction::F2 => 1.2 + (x * x + 0.4).cos(),
        }
    }
}

impl fmt::Display for CatalogFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 接受 `f1`、`function_1`、`1` 等寫法，不分大小寫。
impl FromStr for CatalogFunction {
    type Err = UnknownFunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f1" | "function_1" | "1" => Ok(CatalogFunction::F1),
            "f2" | "function_2" | "2" => Ok(CatalogFunction::F2),
            _ => Err(UnknownFunctionError(s.to_owned())),
        }
    }
}
