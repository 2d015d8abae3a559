//! Question answering over selected document context

use crate::chunking::TextChunker;
use crate::config::CallConfig;
use crate::context::{select_context, ContextSelectionPolicy, FirstNChunksPolicy};
use crate::error::{recoverable, ExtractorError};
use crate::prompt::QueryPrompt;
use folio_domain::traits::LlmProvider;
use folio_llm::{LlmError, ModelGateway};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Prefix of the answer returned when the model call fails
pub const QUESTION_ERROR_PREFIX: &str = "Error processing question: ";

/// Answers free-form questions about a document
pub struct QueryAnswerer<P> {
    gateway: Arc<ModelGateway<P>>,
    chunker: TextChunker,
    policy: Box<dyn ContextSelectionPolicy>,
    call: CallConfig,
}

impl<P> QueryAnswerer<P>
where
    P: LlmProvider<Error = LlmError>,
{
    /// Create an answerer with default chunking, context and call settings
    pub fn new(gateway: Arc<ModelGateway<P>>) -> Self {
        Self {
            gateway,
            chunker: TextChunker::default(),
            policy: Box::new(FirstNChunksPolicy::default()),
            call: CallConfig::query(),
        }
    }

    /// Replace the chunker
    pub fn with_chunker(mut self, chunker: TextChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Replace the context selection policy
    pub fn with_policy(mut self, policy: impl ContextSelectionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replace the call settings
    pub fn with_call(mut self, call: CallConfig) -> Self {
        self.call = call;
        self
    }

    /// Answer `question` from `text`
    ///
    /// The text is chunked again on every call.
    ///
    /// # Errors
    ///
    /// Only [`ExtractorError::NotInitialized`] and [`ExtractorError::Config`]
    /// are returned. A failed model call yields an answer starting with
    /// [`QUESTION_ERROR_PREFIX`].
    pub fn answer(&self, question: &str, text: &str) -> Result<String, ExtractorError> {
        let chunks = self.chunker.chunk(text);
        let context = select_context(&chunks, self.policy.as_ref());
        debug!(
            "Question context: {} chars from {} chunks",
            context.len(),
            chunks.len()
        );

        let prompt = QueryPrompt::new(question, &context).build();

        match self
            .gateway
            .complete(&prompt, &self.call.params(), &self.call.retry)
        {
            Ok(reply) => {
                info!("Answered question ({} chars)", reply.len());
                Ok(reply.trim().to_string())
            }
            Err(e) => {
                let e = recoverable(e)?;
                error!("Error processing question: {}", e);
                Ok(format!("{}{}", QUESTION_ERROR_PREFIX, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_llm::{MockProvider, RecordingSleeper, RetryPolicy};

    fn answerer(provider: MockProvider) -> QueryAnswerer<MockProvider> {
        let gateway = ModelGateway::new(provider).with_sleeper(RecordingSleeper::new());
        QueryAnswerer::new(Arc::new(gateway))
    }

    #[test]
    fn test_answer_is_trimmed() {
        let provider = MockProvider::new("\n  The total is $40.  \n");
        let answer = answerer(provider).answer("What is the total?", "Total: $40").unwrap();
        assert_eq!(answer, "The total is $40.");
    }

    #[test]
    fn test_prompt_uses_first_three_chunks_only() {
        let provider = MockProvider::new("ok");
        let text = "a".repeat(800) + &"b".repeat(800) + &"c".repeat(800) + &"d".repeat(800);
        answerer(provider.clone()).answer("q?", &text).unwrap();

        // Chunks start at 0, 800, 1600, 2400; the fourth starts with 'd'
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains(&"c".repeat(800)));
        assert!(!prompt.contains(&"d".repeat(800)));
        assert_eq!(provider.last_params().unwrap().max_tokens, 1000);
    }

    #[test]
    fn test_failure_is_error_prefixed_answer() {
        let provider = MockProvider::failing(LlmError::Communication("refused".into()));
        let answer = answerer(provider.clone()).answer("q?", "text").unwrap();

        assert_eq!(answer, "Error processing question: Communication error: refused");
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_retry_policy_is_configurable() {
        let provider = MockProvider::failing(LlmError::RateLimitExceeded);
        let mut call = CallConfig::query();
        call.retry = RetryPolicy::standard();

        let answer = answerer(provider.clone())
            .with_call(call)
            .answer("q?", "text")
            .unwrap();
        assert!(answer.starts_with(QUESTION_ERROR_PREFIX));
        assert_eq!(provider.call_count(), 3);
    }

    #[test]
    fn test_custom_chunker_and_policy() {
        let provider = MockProvider::new("ok");
        answerer(provider.clone())
            .with_chunker(TextChunker::new(4, 1).unwrap())
            .with_policy(FirstNChunksPolicy::new(1))
            .answer("q?", "abcdefghij")
            .unwrap();

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("Invoice Content:\nabcd\n"));
        assert!(!prompt.contains("defg"));
    }

    #[test]
    fn test_unconfigured_gateway_propagates() {
        let gateway: ModelGateway<MockProvider> = ModelGateway::unconfigured();
        let answerer = QueryAnswerer::new(Arc::new(gateway));
        assert_eq!(answerer.answer("q?", "text"), Err(ExtractorError::NotInitialized));
    }
}
