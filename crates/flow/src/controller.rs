//! Drives one session of the campaign flow: submit the form while the
//! loader ticks, show results, then loop through feedback and regeneration
//! until the merchant accepts the content.

use std::sync::Arc;

use hyperlocal_core::config::FlowConfig;
use hyperlocal_core::locale::LocaleContext;
use hyperlocal_core::types::{CampaignRequest, CampaignResponse};
use hyperlocal_core::{HyperlocalError, ValidationError};
use hyperlocal_generator::outputs::{ChannelOutputs, OutputTab};
use hyperlocal_generator::CampaignBackend;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::form::CampaignForm;
use crate::loader::GenerationLoader;
use crate::state_machine::{FeedbackState, FeedbackStateMachine, TransitionError};

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("form is incomplete: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("a generation request is already in progress")]
    Busy,

    #[error("no campaign has been generated yet")]
    NoCampaign,

    #[error("backend error: {0}")]
    Backend(#[from] HyperlocalError),
}

const INTERRUPTED_MESSAGE: &str = "regeneration was interrupted";

pub struct FlowController {
    backend: Arc<dyn CampaignBackend>,
    config: FlowConfig,
    pub form: CampaignForm,
    pub locale: LocaleContext,
    loader: GenerationLoader,
    feedback: FeedbackStateMachine,
    loading: bool,
    show_results: bool,
    request: Option<CampaignRequest>,
    response: Option<CampaignResponse>,
    feedback_text: String,
    pending_feedback: Option<String>,
    active_tab: OutputTab,
    last_error: Option<String>,
}

impl FlowController {
    pub fn new(backend: Arc<dyn CampaignBackend>, config: FlowConfig, locale: LocaleContext) -> Self {
        Self {
            backend,
            form: CampaignForm::new(config.offer_max_chars),
            loader: GenerationLoader::from_config(&config.loading_steps),
            config,
            locale,
            feedback: FeedbackStateMachine::new(),
            loading: false,
            show_results: false,
            request: None,
            response: None,
            feedback_text: String::new(),
            pending_feedback: None,
            active_tab: OutputTab::default(),
            last_error: None,
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.feedback.state()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loader(&self) -> &GenerationLoader {
        &self.loader
    }

    pub fn results_visible(&self) -> bool {
        self.show_results
    }

    pub fn response(&self) -> Option<&CampaignResponse> {
        self.response.as_ref()
    }

    pub fn request(&self) -> Option<&CampaignRequest> {
        self.request.as_ref()
    }

    pub fn feedback_text(&self) -> &str {
        &self.feedback_text
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn active_tab(&self) -> OutputTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: OutputTab) {
        self.active_tab = tab;
    }

    pub fn outputs(&self) -> Option<ChannelOutputs> {
        match (&self.response, &self.request) {
            (Some(response), Some(request)) => Some(ChannelOutputs::from_response(response, request)),
            _ => None,
        }
    }

    /// Validate the form and create a campaign. The loader advances one
    /// step per step duration until the backend answers.
    pub async fn submit(&mut self) -> Result<&CampaignResponse, FlowError> {
        if self.loading {
            return Err(FlowError::Busy);
        }
        let request = self.form.to_request().map_err(|e| {
            warn!(error = %e, "campaign form rejected");
            e
        })?;

        self.loading = true;
        self.loader.reset();
        self.last_error = None;

        let backend = Arc::clone(&self.backend);
        let result = {
            let _loading = LoadingGuard {
                loading: &mut self.loading,
            };
            let call = backend.submit_campaign(&request);
            tokio::pin!(call);
            loop {
                let step_duration = self.loader.current().map(|s| s.duration).unwrap_or_default();
                tokio::select! {
                    result = &mut call => break result,
                    _ = tokio::time::sleep(step_duration), if !self.loader.is_complete() => {
                        self.loader.advance();
                    }
                }
            }
        };

        match result {
            Ok(response) => {
                info!(campaign_id = %response.data.campaign.id, "campaign ready");
                self.request = Some(request);
                self.response = Some(response);
                self.feedback.reset();
                self.show_results = true;
                self.sync_feedback_state();
                self.response.as_ref().ok_or(FlowError::NoCampaign)
            }
            Err(e) => {
                error!(error = %e, "campaign submission failed");
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Moves idle to generated once results are visible with content.
    fn sync_feedback_state(&mut self) {
        if self.show_results && self.response.is_some() && self.feedback.state() == FeedbackState::Idle {
            // Idle -> Generated is always in the table.
            let _ = self.feedback.transition(FeedbackState::Generated);
        }
    }

    pub fn request_improvement(&mut self) -> Result<(), FlowError> {
        self.feedback.transition(FeedbackState::Feedback)?;
        Ok(())
    }

    pub fn set_feedback_text(&mut self, text: &str) {
        self.feedback_text = text.to_string();
    }

    /// Leave the feedback editor, discarding the draft.
    pub fn cancel_feedback(&mut self) -> Result<(), FlowError> {
        self.feedback.transition(FeedbackState::Generated)?;
        self.feedback_text.clear();
        Ok(())
    }

    /// Send the drafted feedback. A blank draft uses the configured
    /// default instruction.
    pub async fn submit_feedback(&mut self) -> Result<&CampaignResponse, FlowError> {
        if self.response.is_none() {
            return Err(FlowError::NoCampaign);
        }
        let feedback = if self.feedback_text.trim().is_empty() {
            self.config.default_feedback.clone()
        } else {
            self.feedback_text.trim().to_string()
        };
        self.feedback.transition(FeedbackState::Regenerating)?;
        self.pending_feedback = Some(feedback.clone());
        self.regenerate(&feedback).await
    }

    /// Re-send the feedback that last failed.
    pub async fn retry(&mut self) -> Result<&CampaignResponse, FlowError> {
        let feedback = self
            .pending_feedback
            .clone()
            .unwrap_or_else(|| self.config.default_feedback.clone());
        self.feedback.transition(FeedbackState::Regenerating)?;
        self.regenerate(&feedback).await
    }

    /// From a failure, reopen the feedback editor with the last draft.
    pub fn edit_feedback(&mut self) -> Result<(), FlowError> {
        self.feedback.transition(FeedbackState::Feedback)?;
        Ok(())
    }

    /// From a failure, go back to the content already on screen.
    pub fn dismiss_error(&mut self) -> Result<(), FlowError> {
        self.feedback.transition(FeedbackState::Generated)?;
        self.last_error = None;
        Ok(())
    }

    async fn regenerate(&mut self, feedback: &str) -> Result<&CampaignResponse, FlowError> {
        let backend = Arc::clone(&self.backend);
        let guard = RegenerationGuard {
            machine: &mut self.feedback,
            last_error: &mut self.last_error,
        };

        let (existing, context) = match (&self.response, &self.request) {
            (Some(response), Some(request)) => (response.clone(), request.clone()),
            _ => {
                guard.fail(FlowError::NoCampaign.to_string())?;
                return Err(FlowError::NoCampaign);
            }
        };
        let campaign_id = existing.data.campaign.id.clone();
        let previous_output = match serde_json::to_string(&existing.data.ad_content) {
            Ok(json) => json,
            Err(e) => {
                let e = HyperlocalError::from(e);
                guard.fail(e.to_string())?;
                return Err(e.into());
            }
        };

        let result = backend
            .regenerate_campaign(&campaign_id, &previous_output, feedback, &context, &existing)
            .await;

        match result {
            Ok(updated) => {
                guard.succeed()?;
                self.response = Some(updated);
                self.feedback_text.clear();
                self.pending_feedback = None;
                info!(campaign_id = %campaign_id, "content regenerated");
                self.response.as_ref().ok_or(FlowError::NoCampaign)
            }
            Err(e) => {
                error!(campaign_id = %campaign_id, error = %e, "regeneration failed");
                guard.fail(e.to_string())?;
                Err(e.into())
            }
        }
    }

    /// Accept the content as it stands. No further regeneration is offered.
    pub fn accept(&mut self) -> Result<(), FlowError> {
        self.feedback.transition(FeedbackState::Finalized)?;
        if let Some(response) = &self.response {
            info!(campaign_id = %response.data.campaign.id, "campaign finalized");
        }
        Ok(())
    }

    /// Hide the output panel and forget the current campaign.
    pub fn reset(&mut self) {
        self.show_results = false;
        self.response = None;
        self.request = None;
        self.feedback_text.clear();
        self.pending_feedback = None;
        self.last_error = None;
        self.active_tab = OutputTab::default();
        self.loader.reset();
        self.feedback.reset();
    }
}

/// Clears the loading flag when a submission finishes or its future is dropped.
struct LoadingGuard<'a> {
    loading: &'a mut bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.loading = false;
    }
}

/// Settles a regeneration. If the call is dropped while still
/// `Regenerating`, the machine moves to `Failed` so `retry` stays available.
struct RegenerationGuard<'a> {
    machine: &'a mut FeedbackStateMachine,
    last_error: &'a mut Option<String>,
}

impl RegenerationGuard<'_> {
    fn succeed(self) -> Result<(), TransitionError> {
        *self.last_error = None;
        self.machine.transition(FeedbackState::Generated)
    }

    fn fail(self, message: String) -> Result<(), TransitionError> {
        *self.last_error = Some(message);
        self.machine.transition(FeedbackState::Failed)
    }
}

impl Drop for RegenerationGuard<'_> {
    fn drop(&mut self) {
        if self.machine.state() != FeedbackState::Regenerating {
            return;
        }
        warn!("regeneration interrupted before the backend answered");
        // Regenerating -> Failed is always in the table.
        let _ = self.machine.transition(FeedbackState::Failed);
        if self.last_error.is_none() {
            *self.last_error = Some(INTERRUPTED_MESSAGE.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hyperlocal_core::config::{GeneratorConfig, LoadingStepConfig};
    use hyperlocal_core::types::{AnalyticsReport, ApiEnvelope, CampaignStatusReport};
    use hyperlocal_core::HyperlocalResult;
    use hyperlocal_generator::MockBackend;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Delegates to the mock but fails regenerations while `fail` is set.
    struct FlakyBackend {
        inner: MockBackend,
        fail: AtomicBool,
    }

    #[async_trait]
    impl CampaignBackend for FlakyBackend {
        async fn submit_campaign(&self, request: &CampaignRequest) -> HyperlocalResult<CampaignResponse> {
            self.inner.submit_campaign(request).await
        }

        async fn regenerate_campaign(
            &self,
            campaign_id: &str,
            previous_output: &str,
            feedback: &str,
            context: &CampaignRequest,
            existing: &CampaignResponse,
        ) -> HyperlocalResult<CampaignResponse> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(HyperlocalError::Generation("model unavailable".to_string()));
            }
            self.inner
                .regenerate_campaign(campaign_id, previous_output, feedback, context, existing)
                .await
        }

        async fn campaign_status(
            &self,
            campaign_id: &str,
        ) -> HyperlocalResult<ApiEnvelope<CampaignStatusReport>> {
            self.inner.campaign_status(campaign_id).await
        }

        async fn campaign_analytics(
            &self,
            campaign_id: &str,
        ) -> HyperlocalResult<ApiEnvelope<AnalyticsReport>> {
            self.inner.campaign_analytics(campaign_id).await
        }
    }

    fn fast_flow_config() -> FlowConfig {
        FlowConfig {
            loading_steps: vec![
                LoadingStepConfig {
                    text_key: "loader.step1".to_string(),
                    duration_ms: 1,
                },
                LoadingStepConfig {
                    text_key: "loader.step2".to_string(),
                    duration_ms: 1,
                },
            ],
            ..FlowConfig::default()
        }
    }

    fn controller(backend: Arc<dyn CampaignBackend>) -> FlowController {
        let mut flow = FlowController::new(backend, fast_flow_config(), LocaleContext::default());
        flow.form.product_name = "Chai".to_string();
        flow.form.set_category_code("food-beverage");
        flow.form.set_city("Pune");
        flow
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_form() {
        let backend = Arc::new(MockBackend::new(GeneratorConfig::instant()));
        let mut flow = FlowController::new(backend, fast_flow_config(), LocaleContext::default());
        let err = flow.submit().await.unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(flow.state(), FeedbackState::Idle);
        assert!(!flow.results_visible());
    }

    #[tokio::test]
    async fn test_submit_shows_results_and_generates() {
        let backend = Arc::new(MockBackend::new(GeneratorConfig::instant()));
        let mut flow = controller(backend);
        flow.submit().await.unwrap();
        assert!(flow.results_visible());
        assert!(!flow.is_loading());
        assert_eq!(flow.state(), FeedbackState::Generated);
        let outputs = flow.outputs().unwrap();
        assert!(outputs.whatsapp.message.ends_with("📍 Pune"));
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let backend = Arc::new(MockBackend::new(GeneratorConfig::instant()));
        let mut flow = controller(backend);
        flow.submit().await.unwrap();
        flow.request_improvement().unwrap();
        flow.set_feedback_text("shorter");
        flow.cancel_feedback().unwrap();
        assert_eq!(flow.state(), FeedbackState::Generated);
        assert_eq!(flow.feedback_text(), "");
    }

    #[tokio::test]
    async fn test_failed_regeneration_is_surfaced_and_retryable() {
        let backend = Arc::new(FlakyBackend {
            inner: MockBackend::new(GeneratorConfig::instant()),
            fail: AtomicBool::new(true),
        });
        let mut flow = controller(backend.clone());
        flow.submit().await.unwrap();
        let before = flow.response().cloned().unwrap();

        flow.request_improvement().unwrap();
        flow.set_feedback_text("make it longer");
        let err = flow.submit_feedback().await.unwrap_err();
        assert!(matches!(err, FlowError::Backend(HyperlocalError::Generation(_))));
        assert_eq!(flow.state(), FeedbackState::Failed);
        assert!(flow.last_error().unwrap().contains("model unavailable"));
        assert_eq!(flow.response(), Some(&before));

        backend.fail.store(false, Ordering::SeqCst);
        let updated = flow.retry().await.unwrap().clone();
        assert_eq!(flow.state(), FeedbackState::Generated);
        assert!(flow.last_error().is_none());
        assert_eq!(updated.data.campaign.id, before.data.campaign.id);
        assert!(updated.data.ad_content.description.ends_with("keep coming back for more."));
    }

    #[tokio::test]
    async fn test_dismiss_error_keeps_previous_content() {
        let backend = Arc::new(FlakyBackend {
            inner: MockBackend::new(GeneratorConfig::instant()),
            fail: AtomicBool::new(true),
        });
        let mut flow = controller(backend);
        flow.submit().await.unwrap();
        flow.request_improvement().unwrap();
        assert!(flow.submit_feedback().await.is_err());
        flow.dismiss_error().unwrap();
        assert_eq!(flow.state(), FeedbackState::Generated);
        flow.accept().unwrap();
        assert_eq!(flow.state(), FeedbackState::Finalized);
        assert!(flow.request_improvement().is_err());
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle() {
        let backend = Arc::new(MockBackend::new(GeneratorConfig::instant()));
        let mut flow = controller(backend);
        flow.submit().await.unwrap();
        flow.select_tab(OutputTab::Voice);
        flow.reset();
        assert_eq!(flow.state(), FeedbackState::Idle);
        assert!(flow.outputs().is_none());
        assert_eq!(flow.active_tab(), OutputTab::Poster);
    }

    #[tokio::test]
    async fn test_loader_ticks_while_backend_is_slow() {
        let config = GeneratorConfig {
            submit_latency_ms: 30,
            ..GeneratorConfig::instant()
        };
        let backend = Arc::new(MockBackend::new(config));
        let mut flow = controller(backend);
        flow.submit().await.unwrap();
        assert!(flow.loader().is_complete());
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_loading_flag() {
        let config = GeneratorConfig {
            submit_latency_ms: 200,
            ..GeneratorConfig::instant()
        };
        let backend = Arc::new(MockBackend::new(config));
        let mut flow = controller(backend);

        assert!(tokio::time::timeout(Duration::from_millis(10), flow.submit())
            .await
            .is_err());
        assert!(!flow.is_loading());

        flow.submit().await.unwrap();
        assert_eq!(flow.state(), FeedbackState::Generated);
    }

    #[tokio::test]
    async fn test_dropped_regeneration_fails_and_can_retry() {
        let config = GeneratorConfig {
            regenerate_latency_ms: 200,
            ..GeneratorConfig::instant()
        };
        let backend = Arc::new(MockBackend::new(config));
        let mut flow = controller(backend);
        flow.submit().await.unwrap();
        let campaign_id = flow.response().unwrap().data.campaign.id.clone();

        flow.request_improvement().unwrap();
        flow.set_feedback_text("more detail please");
        assert!(tokio::time::timeout(Duration::from_millis(10), flow.submit_feedback())
            .await
            .is_err());
        assert_eq!(flow.state(), FeedbackState::Failed);
        assert_eq!(flow.last_error(), Some(INTERRUPTED_MESSAGE));

        let updated = flow.retry().await.unwrap().clone();
        assert_eq!(flow.state(), FeedbackState::Generated);
        assert!(flow.last_error().is_none());
        assert_eq!(updated.data.campaign.id, campaign_id);
        assert!(updated.data.ad_content.description.ends_with("keep coming back for more."));
    }
}
