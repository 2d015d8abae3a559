//! Configuration for the analysis pipeline

use crate::chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::context::DEFAULT_CONTEXT_CHUNKS;
use folio_domain::completion::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use folio_domain::ModelParams;
use folio_llm::RetryPolicy;
use serde::{Deserialize, Deserializer, Serialize};

/// Model settings and retry policy for one call site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output tokens
    pub max_tokens: u32,

    /// Sampling temperature in [0.0, 1.0]
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Retry policy for this call site
    pub retry: RetryPolicy,
}

impl CallConfig {
    /// Structured extraction: 4000 tokens, retried with the standard policy
    pub fn extraction() -> Self {
        let params = ModelParams::extraction();
        Self {
            model: params.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            retry: RetryPolicy::standard(),
        }
    }

    /// Question answering: 1000 tokens, a single attempt
    pub fn query() -> Self {
        let params = ModelParams::query();
        Self {
            model: params.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            retry: RetryPolicy::single_attempt(),
        }
    }

    /// Model parameters for the gateway
    pub fn params(&self) -> ModelParams {
        ModelParams::new(self.model.clone(), self.max_tokens, self.temperature)
    }

    /// Validate the call settings
    pub fn validate(&self) -> Result<(), String> {
        self.params().validate()?;
        self.retry.validate()
    }
}

/// Fields given for one call site; the rest come from that site's preset
#[derive(Debug, Default, Deserialize)]
struct CallOverrides {
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    retry: Option<RetryPolicy>,
}

impl CallOverrides {
    fn apply(self, base: CallConfig) -> CallConfig {
        CallConfig {
            model: self.model.unwrap_or(base.model),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
            temperature: self.temperature.unwrap_or(base.temperature),
            retry: self.retry.unwrap_or(base.retry),
        }
    }
}

fn deserialize_extraction<'de, D: Deserializer<'de>>(d: D) -> Result<CallConfig, D::Error> {
    Ok(CallOverrides::deserialize(d)?.apply(CallConfig::extraction()))
}

fn deserialize_query<'de, D: Deserializer<'de>>(d: D) -> Result<CallConfig, D::Error> {
    Ok(CallOverrides::deserialize(d)?.apply(CallConfig::query()))
}

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Chunk size for question context (characters)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks (characters)
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of leading chunks sent as question context
    #[serde(default = "default_context_chunks")]
    pub context_chunks: usize,

    /// Structured extraction call
    #[serde(
        default = "CallConfig::extraction",
        deserialize_with = "deserialize_extraction"
    )]
    pub extraction: CallConfig,

    /// Question answering call
    #[serde(default = "CallConfig::query", deserialize_with = "deserialize_query")]
    pub query: CallConfig,
}

impl AnalysisConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(format!(
                "chunk_overlap {} must be less than chunk_size {}",
                self.chunk_overlap, self.chunk_size
            ));
        }
        if self.context_chunks == 0 {
            return Err("context_chunks must be greater than 0".to_string());
        }
        self.extraction
            .validate()
            .map_err(|e| format!("extraction: {}", e))?;
        self.query.validate().map_err(|e| format!("query: {}", e))?;
        Ok(())
    }

    /// Preset that retries question answering with the same policy as extraction
    pub fn retry_everywhere() -> Self {
        let mut config = Self::default();
        config.query.retry = config.extraction.retry;
        config
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            context_chunks: DEFAULT_CONTEXT_CHUNKS,
            extraction: CallConfig::extraction(),
            query: CallConfig::query(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_context_chunks() -> usize {
    DEFAULT_CONTEXT_CHUNKS
}
