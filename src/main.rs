use std::env;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use quadfin::configuration::EngineConfiguration;
use quadfin::engine::QuadratureEngine;
use quadfin::function::evaluablefunction::EvaluationError;
use quadfin::quadrature::quadratureerror::QuadratureError;
use quadfin::quadrature::quadraturerule::QuadratureRule;
use quadfin::request::integrationrequest::{
    IntegrationRequest,
    RungeRequest
};
use quadfin::request::requesterror::{
    InputError,
    RequestError
};

const USAGE: &'static str = "usage: quadfin <f1|f2> <a> <b> <n> [tolerance] [config.json]";
const DEFAULT_TOLERANCE: &'static str = "1e-4";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let configuration = match args.get(5) {
        Some(config_path) => match EngineConfiguration::from_reader(config_path) {
            Ok(configuration) => configuration,
            Err(err) => {
                error!(path = config_path.as_str(), "failed to load configuration: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfiguration::default(),
    };
    let engine = QuadratureEngine::new(configuration);
    let tolerance = args.get(4).map(String::as_str).unwrap_or(DEFAULT_TOLERANCE);

    match run(&engine, &args[0], &args[1], &args[2], &args[3], tolerance) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", user_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(engine: &QuadratureEngine, function: &str, a: &str, b: &str, n: &str, tolerance: &str) -> Result<(), RequestError> {
    let request = IntegrationRequest::parse(function, a, b, n)?;
    println!("f(x) = {}", request.function().formula());

    let report = request.report(engine)?;
    for (rule, value) in report.results() {
        println!("{:<16} {:.5}", rule.name(), value);
    }
    println!("{:<16} {:.3}", "span", report.span());

    let min_step = request.find_minimal_agreeing_step(engine)?;
    println!("{:<16} {}", "min_common_step", min_step);

    let runge_request = RungeRequest::parse(function, a, b, n, tolerance)?;
    for rule in QuadratureRule::ALL {
        let estimate = runge_request.estimate(engine, rule)?;
        println!(
            "runge {:<16} I_n = {:.5}, I_2n = {:.5}, n = {}",
            rule.name(),
            estimate.coarse(),
            estimate.fine(),
            estimate.n()
        );
    }
    Ok(())
}

fn user_message(err: &RequestError) -> String {
    match err {
        RequestError::Input(InputError::Empty { field }) => format!("Please fill in the '{}' field", field),
        RequestError::Input(InputError::NonNumeric { field, .. }) => format!("Field '{}' must be a number", field),
        RequestError::Input(InputError::UnknownFunction(inner)) => format!("Choose f1 or f2 ({})", inner),
        RequestError::Quadrature(QuadratureError::Step(message)) => format!("Step error: {}", message),
        RequestError::Quadrature(QuadratureError::OddStep(message)) => format!("Even step required: {}", message),
        RequestError::Quadrature(QuadratureError::Evaluation(EvaluationError::Domain { .. })) => {
            "An argument lies outside the domain of the function".to_owned()
        }
        RequestError::Quadrature(QuadratureError::Evaluation(EvaluationError::ZeroDenominator { .. })) => {
            "Division by zero while evaluating the function".to_owned()
        }
        other => format!("Unexpected error: {}", other),
    }
}
