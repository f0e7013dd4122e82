use crate::engine::QuadratureEngine;
use crate::function::catalogfunction::CatalogFunction;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::rungeestimator::RungeEstimate;
use super::requesterror::{
    parse_number,
    InputError,
    RequestError
};

/// 一次使用者操作的積分請求：區間、分割數與被積函數。
///
/// n 保留為解析後的原始數值，是否為正整數交給引擎的 Step Validator 判斷，
/// 這樣 "2.5" 會得到 `QuadratureError::Step`，而非輸入錯誤。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationRequest {
    function: CatalogFunction,
    a: f64,
    b: f64,
    n: f64,
}

impl IntegrationRequest {
    pub fn new(function: CatalogFunction, a: f64, b: f64, n: f64) -> IntegrationRequest {
        IntegrationRequest { function, a, b, n }
    }

    pub fn parse(function: &str, a: &str, b: &str, n: &str) -> Result<IntegrationRequest, InputError> {
        let function: CatalogFunction = function.parse()?;
        Ok(IntegrationRequest {
            function,
            a: parse_number("a", a)?,
            b: parse_number("b", b)?,
            n: parse_number("n", n)?,
        })
    }

    pub fn function(&self) -> CatalogFunction {
        self.function
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn integrate(&self, engine: &QuadratureEngine, rule: QuadratureRule) -> Result<f64, RequestError> {
        Ok(engine.integrate(rule, &self.function, self.a, self.b, self.n)?)
    }

    /// 四種積分法的結果與其 span。
    pub fn report(&self, engine: &QuadratureEngine) -> Result<IntegrationReport, RequestError> {
        let mut results = Vec::with_capacity(QuadratureRule::ALL.len());
        for rule in QuadratureRule::ALL {
            results.push((rule, self.integrate(engine, rule)?));
        }
        let span = engine.span(&self.function, self.a, self.b, self.n)?;
        Ok(IntegrationReport { results, span })
    }

    pub fn find_minimal_agreeing_step(&self, engine: &QuadratureEngine) -> Result<usize, RequestError> {
        Ok(engine.find_minimal_agreeing_step(&self.function, self.a, self.b, self.n)?)
    }
}

pub struct IntegrationReport {
    results: Vec<(QuadratureRule, f64)>,
    span: f64,
}

impl IntegrationReport {
    pub fn results(&self) -> &Vec<(QuadratureRule, f64)> {
        &self.results
    }

    pub fn span(&self) -> f64 {
        self.span
    }
}

/// Runge 法則的請求：積分請求再加上容許誤差。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RungeRequest {
    request: IntegrationRequest,
    tolerance: f64,
}

impl RungeRequest {
    pub fn new(request: IntegrationRequest, tolerance: f64) -> RungeRequest {
        RungeRequest { request, tolerance }
    }

    pub fn parse(function: &str, a: &str, b: &str, n: &str, tolerance: &str) -> Result<RungeRequest, InputError> {
        Ok(RungeRequest {
            request: IntegrationRequest::parse(function, a, b, n)?,
            tolerance: parse_number("tolerance", tolerance)?,
        })
    }

    pub fn request(&self) -> &IntegrationRequest {
        &self.request
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn estimate(&self, engine: &QuadratureEngine, rule: QuadratureRule) -> Result<RungeEstimate, RequestError> {
        let request = &self.request;
        Ok(engine.runge_estimate(rule, &request.function, request.a, request.b, request.n, self.tolerance)?)
    }
}
