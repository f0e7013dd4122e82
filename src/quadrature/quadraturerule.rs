use std::fmt;
use std::str::FromStr;

use nalgebra::DVectorView;
use serde::Deserialize;

use crate::function::evaluablefunction::EvaluableFunction;
use crate::math::round::{
    round,
    RESULT_DIGITS
};
use super::quadratureerror::QuadratureError;
use super::samplegrid::SampleGrid;
use super::stepvalidator::{
    require_even,
    StepCount,
    SIMPSON_ODD_STEP_MESSAGE
};

// ─────────────────────────────────────────────────────────────────────────────
// QuadratureRule
// ─────────────────────────────────────────────────────────────────────────────
//
// 四種固定階數的複合積分公式，共用同一個流程：
//   1. 驗證分割數 n（Simpson 另須為偶數）
//   2. 將 [a, b] 切成 n 等分，共 n + 1 個取樣點
//   3. 依公式挑選取樣點求值並加權加總
//   4. 結果四捨五入（五成雙）到小數第 5 位
//
// 收斂階數與偶數需求都是以 variant 查表，不再以函數指標比對身分。

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadratureRule {
    LeftRectangle,
    RightRectangle,
    Trapezoidal,
    Simpson,
}

impl QuadratureRule {
    pub const ALL: [QuadratureRule; 4] = [
        QuadratureRule::LeftRectangle,
        QuadratureRule::RightRectangle,
        QuadratureRule::Trapezoidal,
        QuadratureRule::Simpson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuadratureRule::LeftRectangle => "left_rectangle",
            QuadratureRule::RightRectangle => "right_rectangle",
            QuadratureRule::Trapezoidal => "trapezoidal",
            QuadratureRule::Simpson => "simpson",
        }
    }

    /// Runge 法則使用的收斂階數 p，誤差估計為 |I_n - I_2n| / (2^p - 1)。
    pub fn convergence_order(&self) -> u32 {
        match self {
            QuadratureRule::LeftRectangle | QuadratureRule::RightRectangle => 2,
            QuadratureRule::Trapezoidal => 3,
            QuadratureRule::Simpson => 4,
        }
    }

    pub fn requires_even_step(&self) -> bool {
        matches!(self, QuadratureRule::Simpson)
    }

    /// 以此公式計算 ∫_a^b f(x) dx 的近似值（小數第 5 位）。
    ///
    /// 不檢查 a < b；a > b 時 stride 為負，結果自然變號。
    pub fn integrate<F, N>(&self, func: &F, a: f64, b: f64, n: N) -> Result<f64, QuadratureError>
    where
        F: EvaluableFunction + ?Sized,
        N: StepCount,
    {
        let n = n.to_step()?;
        if self.requires_even_step() {
            require_even(n, SIMPSON_ODD_STEP_MESSAGE)?;
        }

        let grid = SampleGrid::new(a, b, n);
        let sum = match self {
            QuadratureRule::LeftRectangle => rectangle_sum(func, &grid, grid.left_points())?,
            QuadratureRule::RightRectangle => rectangle_sum(func, &grid, grid.right_points())?,
            QuadratureRule::Trapezoidal => trapezoidal_sum(func, &grid)?,
            QuadratureRule::Simpson => simpson_sum(func, &grid)?,
        };
        Ok(round(sum, RESULT_DIGITS))
    }
}

fn rectangle_sum<F>(func: &F, grid: &SampleGrid, x_arr: DVectorView<'_, f64>) -> Result<f64, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let stride = grid.stride();
    let func_arr = func.evaluate_view(x_arr)?;
    Ok(func_arr.iter().map(|y| stride * y).sum())
}

fn trapezoidal_sum<F>(func: &F, grid: &SampleGrid) -> Result<f64, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let stride = grid.stride();
    let lhs_arr = func.evaluate_view(grid.left_points())?;
    let rhs_arr = func.evaluate_view(grid.right_points())?;
    Ok(lhs_arr
        .iter()
        .zip(rhs_arr.iter())
        .map(|(lhs, rhs)| (lhs + rhs) * stride / 2.0)
        .sum())
}

/// 複合 Simpson 1/3：h/3 · (f_0 + 4·Σf_odd + 2·Σf_even_interior + f_n)
fn simpson_sum<F>(func: &F, grid: &SampleGrid) -> Result<f64, QuadratureError>
where
    F: EvaluableFunction + ?Sized,
{
    let n = grid.subintervals();
    let func_arr = func.evaluate(grid.points())?;
    let odd_sum: f64 = (1..n).step_by(2).map(|i| 4.0 * func_arr[i]).sum();
    let even_sum: f64 = (2..n).step_by(2).map(|i| 2.0 * func_arr[i]).sum();
    Ok((func_arr[0] + odd_sum + even_sum + func_arr[n]) * grid.stride() / 3.0)
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for QuadratureRule {
    type Err = QuadratureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "left_rectangle" | "left" => Ok(QuadratureRule::LeftRectangle),
            "right_rectangle" | "right" => Ok(QuadratureRule::RightRectangle),
            "trapezoidal" | "trapezoid" => Ok(QuadratureRule::Trapezoidal),
            "simpson" | "simpson_rule" => Ok(QuadratureRule::Simpson),
            _ => Err(QuadratureError::UnknownRule(s.to_owned())),
        }
    }
}

/// 以名稱查詢收斂階數；未知的積分法回傳 `QuadratureError::UnknownRule`。
pub fn convergence_order(rule_name: &str) -> Result<u32, QuadratureError> {
    let rule: QuadratureRule = rule_name.parse()?;
    Ok(rule.convergence_order())
}
