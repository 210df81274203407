//! Summary Pipeline
//!
//! One generation run: validate inputs → context header → prompt → one
//! completion call → extraction → flat sections and quality report.
//!
//! The pipeline holds no session state. Every run takes its inputs as
//! parameters and returns a [`SummaryRun`]; nothing is retried and nothing
//! partial is returned on failure.

use std::time::Duration;

use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::ai::{
    CompletionReply, CompletionRequest, CostEstimate, CostEstimator, ResponseExtractor,
    SharedProvider, ValidationResult, build_context_header, compose_summary_prompt,
    validation::assess_quality, with_timeout,
};
use crate::config::{Config, CostConfig};
use crate::report::SectionTexts;
use crate::types::{ProjectContext, QualError, Result, RunId, SummaryDocument, ValidationError};

/// Per-run knobs taken from configuration and CLI overrides
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub cost: CostConfig,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model_id: config.llm.model.clone(),
            max_tokens: config.llm.max_tokens,
            timeout: Duration::from_secs(config.llm.timeout_secs),
            cost: config.cost.clone(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything one successful run produced
#[derive(Debug, Clone)]
pub struct SummaryRun {
    pub run_id: RunId,
    pub document: SummaryDocument,
    pub sections: SectionTexts,
    pub quality: ValidationResult,
    pub estimate: CostEstimate,
    pub reply: CompletionReply,
}

/// Request plus estimate, built without contacting the provider
#[derive(Debug, Clone, Serialize)]
pub struct PreparedRequest {
    pub request: CompletionRequest,
    pub estimate: CostEstimate,
}

/// Reject inputs that cannot produce a meaningful summary
pub fn validate_inputs(ctx: &ProjectContext, raw_responses: &str) -> Result<()> {
    if raw_responses.trim().is_empty() {
        return Err(ValidationError::empty_responses().into());
    }
    if ctx.questions.iter().all(|q| q.trim().is_empty()) {
        return Err(ValidationError::no_questions().into());
    }
    Ok(())
}

/// Extract a summary from a reply, attaching the raw reply on failure
pub fn summarize_reply(raw_reply: &str) -> Result<(SummaryDocument, ValidationResult)> {
    let document = ResponseExtractor::new()
        .extract(raw_reply)
        .map_err(|e| QualError::extraction(e, raw_reply))?;
    let quality = assess_quality(&document);
    Ok((document, quality))
}

pub struct SummaryPipeline {
    provider: SharedProvider,
    settings: PipelineSettings,
}

impl SummaryPipeline {
    pub fn new(provider: SharedProvider, settings: PipelineSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Validate inputs and compose the request; no provider call
    pub fn prepare(&self, ctx: &ProjectContext, raw_responses: &str) -> Result<PreparedRequest> {
        prepare_request(&self.settings, ctx, raw_responses)
    }

    /// Run the full pipeline once
    pub async fn run(&self, ctx: &ProjectContext, raw_responses: &str) -> Result<SummaryRun> {
        let run_id = RunId::generate();
        let span = info_span!("summary_run", run_id = %run_id.short());

        async move {
            let prepared = self.prepare(ctx, raw_responses)?;
            info!(
                "Generating summary for project '{}' via {} ({})",
                ctx.project_id,
                self.provider.name(),
                prepared.estimate
            );

            let reply = with_timeout(
                self.settings.timeout,
                self.provider.complete(&prepared.request),
                "summary completion",
            )
            .await?;

            debug!(
                "Reply received: {} chars in {}ms",
                reply.text.len(),
                reply.timing.total_ms
            );

            let (document, quality) = summarize_reply(&reply.text).inspect_err(|e| {
                warn!("{}", e);
            })?;

            for issue in &quality.issues {
                warn!("{}", issue);
            }

            info!(
                "Summary ready: {} executive items, {} ideas, {} quotes",
                document.executive_items.len(),
                document.ideas.len(),
                document.quotes.len()
            );

            Ok::<_, QualError>(SummaryRun {
                run_id,
                sections: SectionTexts::from_document(&document),
                document,
                quality,
                estimate: prepared.estimate,
                reply,
            })
        }
        .instrument(span)
        .await
    }
}

/// Shared by `SummaryPipeline::prepare` and callers without a provider
pub fn prepare_request(
    settings: &PipelineSettings,
    ctx: &ProjectContext,
    raw_responses: &str,
) -> Result<PreparedRequest> {
    validate_inputs(ctx, raw_responses)?;

    let header = build_context_header(ctx);
    let prompt = compose_summary_prompt(&header, raw_responses);

    Ok(PreparedRequest {
        request: CompletionRequest::new(&settings.model_id, settings.max_tokens, prompt),
        estimate: CostEstimator::from_config(&settings.cost).estimate(raw_responses),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CompletionProvider;
    use crate::types::{ErrorCategory, ExtractionError, ProviderError, ValidationErrorKind};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GOOD_REPLY: &str = "Here is your summary:\n<Summary><Executive><Item>A</Item><Item>B</Item></Executive>\
        <Narrative>N</Narrative><Ideas><Idea>I</Idea></Ideas>\
        <Quotes><Quote id=\"R1\">Q1</Quote></Quotes></Summary>\nLet me know!";

    enum Behaviour {
        Reply(&'static str),
        Fail(ErrorCategory),
        Hang,
    }

    struct MockProvider {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> std::result::Result<CompletionReply, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Reply(text) => Ok(CompletionReply::text_only(*text)),
                Behaviour::Fail(category) => Err(ProviderError::new(*category, "provider said no")),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(CompletionReply::text_only(""))
                }
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn ctx() -> ProjectContext {
        ProjectContext::new("24-017")
            .with_client("Acme")
            .with_questions(["Why did you switch?"])
    }

    fn pipeline(provider: Arc<MockProvider>) -> SummaryPipeline {
        SummaryPipeline::new(provider, PipelineSettings::default())
    }

    #[tokio::test]
    async fn test_successful_run() {
        let provider = MockProvider::new(Behaviour::Reply(GOOD_REPLY));
        let run = pipeline(provider.clone())
            .run(&ctx(), "R1: It was too slow.")
            .await
            .unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(run.document.executive_items, vec!["A", "B"]);
        assert_eq!(run.sections.executive, "A\nB");
        assert_eq!(run.sections.quotes, vec!["R1: Q1"]);
        assert!(run.quality.warning_count() > 0);
    }

    #[tokio::test]
    async fn test_zero_questions_rejected_before_provider_call() {
        let provider = MockProvider::new(Behaviour::Reply(GOOD_REPLY));
        let ctx = ProjectContext::new("24-017");

        let err = pipeline(provider.clone())
            .run(&ctx, "R1: responses")
            .await
            .unwrap_err();

        match err {
            QualError::InputValidation(v) => assert_eq!(v.kind, ValidationErrorKind::NoQuestions),
            other => panic!("expected input validation error, got {other}"),
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_responses_rejected_before_provider_call() {
        let provider = MockProvider::new(Behaviour::Reply(GOOD_REPLY));
        let err = pipeline(provider.clone())
            .run(&ctx(), "  \n ")
            .await
            .unwrap_err();

        assert!(err.is_input_validation());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = MockProvider::new(Behaviour::Fail(ErrorCategory::RateLimit));
        let err = pipeline(provider.clone())
            .run(&ctx(), "responses")
            .await
            .unwrap_err();

        match err {
            QualError::Provider(e) => {
                assert_eq!(e.category, ErrorCategory::RateLimit);
                assert_eq!(e.message, "provider said no");
            }
            other => panic!("expected provider error, got {other}"),
        }
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_provider_error() {
        let provider = MockProvider::new(Behaviour::Hang);
        let settings = PipelineSettings {
            timeout: Duration::from_millis(20),
            ..PipelineSettings::default()
        };

        let err = SummaryPipeline::new(provider, settings)
            .run(&ctx(), "responses")
            .await
            .unwrap_err();

        assert!(matches!(err, QualError::Provider(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_extraction_failure_carries_raw_reply() {
        let raw = "Sorry, I cannot produce that format.";
        let provider = MockProvider::new(Behaviour::Reply(raw));
        let err = pipeline(provider).run(&ctx(), "responses").await.unwrap_err();

        assert_eq!(err.raw_reply(), Some(raw));
        assert!(matches!(
            err,
            QualError::Extraction {
                error: ExtractionError::StructureNotFound { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_prepare_composes_request() {
        let settings = PipelineSettings {
            model_id: "claude-test".to_string(),
            max_tokens: 900,
            ..PipelineSettings::default()
        };
        let prepared = prepare_request(&settings, &ctx(), "R1: It was too slow.").unwrap();

        assert_eq!(prepared.request.model_id, "claude-test");
        assert_eq!(prepared.request.max_tokens, 900);
        assert!(prepared.request.prompt_text.starts_with("Project: 24-017"));
        assert!(prepared.request.prompt_text.ends_with("R1: It was too slow.\n"));
        assert_eq!(prepared.estimate.tokens.get(), 5);
    }

    #[test]
    fn test_summarize_reply_offline() {
        let (doc, _) = summarize_reply(GOOD_REPLY).unwrap();
        assert_eq!(doc.narrative, "N");
        assert_eq!(doc.ideas, vec!["I"]);
    }
}
