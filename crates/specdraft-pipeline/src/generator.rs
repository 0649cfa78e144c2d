//! Generation Orchestrator
//!
//! Sequences extraction → prompt rendering → completion → validation within
//! one invocation. The first failing stage short-circuits the remainder; no
//! stage is retried. The orchestrator performs no I/O of its own beyond
//! delegating to the stages and holds no state across invocations.

use crate::config::PipelineConfig;
use crate::prompt::PromptTemplate;
use crate::validator::validate;
use specdraft_domain::traits::CompletionProvider;
use specdraft_domain::{GenerationFailure, GenerationOutcome, RequirementInput, Stage};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The pipeline entry point, generic over the completion provider
pub struct Generator<C: CompletionProvider> {
    provider: Arc<C>,
    template: PromptTemplate,
    config: PipelineConfig,
}

impl<C: CompletionProvider> Clone for Generator<C> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            template: self.template.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C> Generator<C>
where
    C: CompletionProvider + Send + Sync + 'static,
{
    /// Create a generator with the default prompt template
    pub fn new(provider: C, config: PipelineConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            template: PromptTemplate::default(),
            config,
        }
    }

    /// Substitute an alternate prompt template
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Run the pipeline for one input payload.
    ///
    /// Every stage failure is translated into a uniform
    /// `GenerationFailure { stage, message }`; no raw stage error escapes.
    pub async fn generate(&self, input: RequirementInput) -> GenerationOutcome {
        info!(input_len = input.len(), "starting specification generation");

        let doc = specdraft_extract::extract(input)
            .map_err(|e| GenerationFailure::new(Stage::Extraction, e))?;

        if doc.is_empty() {
            // Legitimate degenerate input (e.g. a scanned PDF); the
            // completion stage decides what to make of it.
            warn!("extracted document is empty");
        }

        let prompt = self.template.render(&doc);
        debug!(prompt_len = prompt.len(), "prompt rendered");

        let raw = timeout(
            self.config.completion_timeout(),
            self.provider.complete(prompt.as_str()),
        )
        .await
        .map_err(|_| {
            warn!(
                timeout_secs = self.config.completion_timeout_secs,
                "completion timed out"
            );
            GenerationFailure::new(Stage::Completion, "completion request timed out")
        })?
        .map_err(|e| GenerationFailure::new(Stage::Completion, e))?;

        debug!(response_len = raw.len(), "completion response received");

        let spec = validate(&raw).map_err(|e| GenerationFailure::new(Stage::Validation, e))?;

        info!(
            modules = spec.modules.len(),
            user_stories = spec.user_stories.len(),
            "specification generated"
        );

        Ok(spec)
    }
}
