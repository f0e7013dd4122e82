use nalgebra::DVector;

use crate::configuration::EngineConfiguration;
use crate::function::evaluablefunction::{
    EvaluableFunction,
    EvaluationError
};
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::rungeestimator::{
    runge_estimate,
    RungeEstimate
};
use crate::quadrature::spanchecker::span;
use crate::quadrature::stepsearch::find_minimal_agreeing_step;
use crate::quadrature::stepvalidator::StepCount;

/// 提供給呈現層的入口。
///
/// 引擎本身沒有可變狀態，每次呼叫都只依賴輸入；設定只決定兩個迭代上限。
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadratureEngine {
    configuration: EngineConfiguration,
}

impl QuadratureEngine {
    pub fn new(configuration: EngineConfiguration) -> QuadratureEngine {
        QuadratureEngine { configuration }
    }

    pub fn evaluate<F>(&self, func: &F, x_arr: &DVector<f64>) -> Result<DVector<f64>, EvaluationError>
    where
        F: EvaluableFunction + ?Sized,
    {
        func.evaluate(x_arr)
    }

    pub fn integrate<F, N>(&self, rule: QuadratureRule, func: &F, a: f64, b: f64, n: N) -> Result<f64, QuadratureError>
    where
        F: EvaluableFunction + ?Sized,
        N: StepCount,
    {
        rule.integrate(func, a, b, n)
    }

    pub fn span<F, N>(&self, func: &F, a: f64, b: f64, n: N) -> Result<f64, QuadratureError>
    where
        F: EvaluableFunction + ?Sized,
        N: StepCount,
    {
        span(func, a, b, n)
    }

    pub fn find_minimal_agreeing_step<F, N>(&self, func: &F, a: f64, b: f64, n_start: N) -> Result<usize, QuadratureError>
    where
        F: EvaluableFunction + ?Sized,
        N: StepCount,
    {
        find_minimal_agreeing_step(func, a, b, n_start, self.configuration.step_search())
    }

    pub fn runge_estimate<F, N>(
        &self,
        rule: QuadratureRule,
        func: &F,
        a: f64,
        b: f64,
        n_start: N,
        tolerance: f64,
    ) -> Result<RungeEstimate, QuadratureError>
    where
        F: EvaluableFunction + ?Sized,
        N: StepCount,
    {
        runge_estimate(rule, func, a, b, n_start, tolerance, self.configuration.runge())
    }
}
