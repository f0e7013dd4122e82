use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::quadrature::rungeestimator::RungeOptions;
use crate::quadrature::stepsearch::StepSearchOptions;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

/// 積分引擎的設定，可由 JSON 載入；缺少的欄位沿用預設值。
///
/// ```json
/// {
///     "step_search": { "max_step": 67108864 },
///     "runge": { "max_doublings": 100 }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfiguration {
    step_search: StepSearchOptions,
    runge: RungeOptions,
}

impl EngineConfiguration {
    pub fn new(step_search: StepSearchOptions, runge: RungeOptions) -> EngineConfiguration {
        EngineConfiguration { step_search, runge }
    }

    pub fn step_search(&self) -> &StepSearchOptions {
        &self.step_search
    }

    pub fn runge(&self) -> &RungeOptions {
        &self.runge
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<EngineConfiguration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<EngineConfiguration, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let configuration = EngineConfiguration::default();
        assert_eq!(configuration.step_search().max_step, 1 << 24);
        assert_eq!(configuration.runge().max_doublings, 100);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let configuration = EngineConfiguration::from_json_str(r#"{ "runge": { "max_doublings": 12 } }"#).unwrap();
        assert_eq!(configuration.runge().max_doublings, 12);
        assert_eq!(configuration.step_search().max_step, 1 << 24);

        let configuration = EngineConfiguration::from_json_str("{}").unwrap();
        assert_eq!(configuration, EngineConfiguration::default());
    }

    #[test]
    fn test_full_json() {
        let json = r#"{ "step_search": { "max_step": 4096 }, "runge": { "max_doublings": 5 } }"#;
        let configuration = EngineConfiguration::from_json_str(json).unwrap();
        assert_eq!(
            configuration,
            EngineConfiguration::new(StepSearchOptions { max_step: 4096 }, RungeOptions { max_doublings: 5 })
        );
    }

    #[test]
    fn test_invalid_json() {
        let result = EngineConfiguration::from_json_str(r#"{ "runge": { "max_doublings": -1 } }"#);
        assert!(matches!(result, Err(ConfigurationError::JsonParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfiguration::from_reader("/nonexistent/quadfin/config.json");
        assert!(matches!(result, Err(ConfigurationError::IOError(_))));
    }
}
