//! Parameters for a single model completion call

/// Default model identifier
pub const DEFAULT_MODEL: &str = "claude-2.1";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Model identifier, output budget and temperature for one completion
///
/// Temperature lies in `[0, 1]`; lower values give more deterministic output.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Model identifier understood by the provider
    pub model: String,
    /// Maximum number of output tokens
    pub max_tokens: u32,
    /// Sampling temperature in [0.0, 1.0]
    pub temperature: f64,
}

impl ModelParams {
    /// Create model parameters
    pub fn new(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Parameters used for the structured extraction call
    pub fn extraction() -> Self {
        Self::new(DEFAULT_MODEL, 4000, DEFAULT_TEMPERATURE)
    }

    /// Parameters used for question answering
    pub fn query() -> Self {
        Self::new(DEFAULT_MODEL, 1000, DEFAULT_TEMPERATURE)
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 1.0]",
                self.temperature
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ModelParams::extraction().validate().is_ok());
        assert!(ModelParams::query().validate().is_ok());
        assert_eq!(ModelParams::extraction().max_tokens, 4000);
        assert_eq!(ModelParams::query().max_tokens, 1000);
    }

    #[test]
    fn test_temperature_bounds() {
        assert!(ModelParams::new("m", 10, 0.0).validate().is_ok());
        assert!(ModelParams::new("m", 10, 1.0).validate().is_ok());
        assert!(ModelParams::new("m", 10, 1.5).validate().is_err());
        assert!(ModelParams::new("m", 10, -0.1).validate().is_err());
        assert!(ModelParams::new("m", 10, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_zero_tokens_rejected() {
        assert!(ModelParams::new("m", 0, 0.2).validate().is_err());
    }

    #[test]
    fn test_empty_model_rejected() {
        assert!(ModelParams::new("  ", 10, 0.2).validate().is_err());
    }
}
