//! Integration tests for the analysis pipeline

#[cfg(test)]
mod tests {
    use crate::{AnalysisConfig, ExtractorError, InvoicePipeline, QUESTION_ERROR_PREFIX};
    use folio_domain::{FieldName, ANALYSIS_SECTION_TITLE, ERROR_SECTION_TITLE};
    use folio_llm::{LlmError, MockProvider, ModelGateway, RecordingSleeper};
    use std::collections::BTreeSet;
    use std::time::Duration;

    const INVOICE: &str = "ACME Corp\nInvoice #123\nDate: 2024-01-05\n2 x Widget @ $10\nTotal: $20";

    fn pipeline(provider: MockProvider) -> (InvoicePipeline<MockProvider>, RecordingSleeper) {
        let sleeper = RecordingSleeper::new();
        let gateway = ModelGateway::new(provider).with_sleeper(sleeper.clone());
        let pipeline = InvoicePipeline::new(gateway, AnalysisConfig::default()).unwrap();
        (pipeline, sleeper)
    }

    #[test]
    fn test_full_analysis_flow() {
        let provider = MockProvider::new("Invoice Number: 123\nLine Items: ...");
        let (pipeline, _) = pipeline(provider.clone());

        let details = pipeline.analyze(INVOICE).unwrap();

        assert_eq!(details.sections.len(), 1);
        assert_eq!(details.sections[0].title, ANALYSIS_SECTION_TITLE);
        let expected: BTreeSet<_> = [
            FieldName::InvoiceNumber,
            FieldName::Date,
            FieldName::LineItems,
        ]
        .into_iter()
        .collect();
        assert_eq!(details.present_fields, expected);
        assert_eq!(
            details.missing_fields(),
            vec![
                FieldName::RecipientName,
                FieldName::ShippingAddress,
                FieldName::TaxInformation
            ]
        );
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_empty_document_never_calls_model() {
        let provider = MockProvider::new("unused");
        let (pipeline, _) = pipeline(provider.clone());

        let details = pipeline.analyze("").unwrap();

        assert!(details.sections.is_empty());
        assert!(details.present_fields.is_empty());
        assert_eq!(details.error.as_deref(), Some("No text found in document."));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_question_failure_becomes_answer() {
        let provider = MockProvider::new("Invoice Number: 123");
        let (pipeline, sleeper) = pipeline(provider.clone());
        let details = pipeline.analyze(INVOICE).unwrap();

        provider.push_reply(Err(LlmError::Communication("connection refused".into())));
        let answer = pipeline.ask("What is the total?", &details).unwrap();

        assert_eq!(
            answer,
            format!("{}Communication error: connection refused", QUESTION_ERROR_PREFIX)
        );
        assert_eq!(provider.call_count(), 2);
        assert!(sleeper.delays().is_empty());
    }

    #[test]
    fn test_question_after_analysis() {
        let provider = MockProvider::new("Total: $20");
        let (pipeline, _) = pipeline(provider.clone());
        let details = pipeline.analyze(INVOICE).unwrap();

        provider.push_reply(Ok(" The total is $20. ".to_string()));
        let answer = pipeline.ask("What is the total?", &details).unwrap();

        assert_eq!(answer, "The total is $20.");
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains(INVOICE));
        assert!(prompt.contains("Question: What is the total?"));
    }

    #[test]
    fn test_extraction_retries_then_reports_error_section() {
        let provider = MockProvider::failing(LlmError::RateLimitExceeded);
        let (pipeline, sleeper) = pipeline(provider.clone());

        let details = pipeline.analyze(INVOICE).unwrap();

        assert_eq!(provider.call_count(), 3);
        assert_eq!(details.sections.len(), 1);
        assert_eq!(details.sections[0].title, ERROR_SECTION_TITLE);
        assert_eq!(details.sections[0].content, "Error: Rate limit exceeded");
        assert!(details.error.is_none());

        let delays = sleeper.delays();
        assert_eq!(delays.len(), 2);
        assert!(delays
            .iter()
            .all(|d| *d >= Duration::from_secs(1) && *d <= Duration::from_secs(60)));
    }

    #[test]
    fn test_unconfigured_gateway_fails_loudly() {
        let gateway: ModelGateway<MockProvider> = ModelGateway::unconfigured();
        let pipeline = InvoicePipeline::new(gateway, AnalysisConfig::default()).unwrap();

        assert_eq!(pipeline.analyze(INVOICE), Err(ExtractorError::NotInitialized));
    }

    #[test]
    fn test_retry_everywhere_applies_to_questions() {
        let provider = MockProvider::new("Invoice Number: 1");
        let sleeper = RecordingSleeper::new();
        let gateway = ModelGateway::new(provider.clone()).with_sleeper(sleeper.clone());
        let pipeline = InvoicePipeline::new(gateway, AnalysisConfig::retry_everywhere()).unwrap();
        let details = pipeline.analyze(INVOICE).unwrap();

        provider.push_reply(Err(LlmError::Api {
            status: 503,
            body: "overloaded".into(),
        }));
        let answer = pipeline.ask("Who?", &details).unwrap();

        assert_eq!(answer, "Invoice Number: 1");
        assert_eq!(provider.call_count(), 3);
        assert_eq!(sleeper.delays().len(), 1);
    }
}
