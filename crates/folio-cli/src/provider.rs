//! Provider selection and pipeline construction.

use crate::config::Config;
use crate::error::Result;
use folio_domain::traits::LlmProvider;
use folio_domain::ModelParams;
use folio_extractor::InvoicePipeline;
use folio_llm::{AnthropicProvider, LlmError, MockProvider, ModelGateway};
use std::time::Duration;
use tracing::{info, warn};

/// The provider chosen at startup.
pub enum Provider {
    /// Anthropic Messages API
    Anthropic(AnthropicProvider),
    /// Fixed offline reply
    Mock(MockProvider),
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, params: &ModelParams) -> std::result::Result<String, LlmError> {
        match self {
            Provider::Anthropic(provider) => provider.complete(prompt, params),
            Provider::Mock(provider) => provider.complete(prompt, params),
        }
    }

    fn name(&self) -> &str {
        match self {
            Provider::Anthropic(provider) => provider.name(),
            Provider::Mock(provider) => provider.name(),
        }
    }
}

/// Build the gateway: a mock reply if given, the API if a key is available,
/// and an unconfigured gateway otherwise.
pub fn build_gateway(
    config: &Config,
    api_key: Option<String>,
    mock: Option<String>,
) -> Result<ModelGateway<Provider>> {
    if let Some(reply) = mock {
        info!("Using mock provider");
        return Ok(ModelGateway::new(Provider::Mock(MockProvider::new(reply))));
    }

    match config.api_key(api_key) {
        Some(key) => {
            let provider = AnthropicProvider::new(
                &config.endpoint,
                key,
                Duration::from_secs(config.timeout_secs),
            )?;
            info!("Using Anthropic API at {}", config.endpoint);
            Ok(ModelGateway::new(Provider::Anthropic(provider)))
        }
        None => {
            warn!(
                "No API key found (set {} or pass --api-key)",
                config.api_key_env
            );
            Ok(ModelGateway::unconfigured())
        }
    }
}

/// Build the analysis pipeline for `config`.
pub fn build_pipeline(
    config: &Config,
    api_key: Option<String>,
    mock: Option<String>,
) -> Result<InvoicePipeline<Provider>> {
    let gateway = build_gateway(config, api_key, mock)?;
    Ok(InvoicePipeline::new(gateway, config.analysis.clone())?)
}
