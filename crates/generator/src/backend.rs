//! The campaign backend boundary and its local mock implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyperlocal_core::config::GeneratorConfig;
use hyperlocal_core::geo;
use hyperlocal_core::types::{
    AgeRange, AnalyticsReport, ApiEnvelope, Budget, BusinessInfo, CampaignData, CampaignInfo,
    CampaignRequest, CampaignResponse, CampaignSettings, CampaignStatus, CampaignStatusReport,
    ProductInfo, Targeting,
};
use hyperlocal_core::{HyperlocalError, HyperlocalResult};
use rand::Rng;
use tracing::{info, warn};

use crate::feedback::FeedbackEngine;
use crate::generator::ContentGenerator;
use crate::store::CampaignStore;
use crate::synthesis;
use crate::templates;

pub const CREATED_MESSAGE: &str = "Campaign created successfully";
pub const REGENERATED_MESSAGE: &str = "Campaign regenerated successfully";

/// Anything able to create and revise campaigns. The mock implementation
/// lives here; a real generative service would implement the same trait.
#[async_trait]
pub trait CampaignBackend: Send + Sync {
    async fn submit_campaign(&self, request: &CampaignRequest) -> HyperlocalResult<CampaignResponse>;

    /// Produce fresh ad content for an existing campaign, steered by
    /// free-text feedback. `previous_output` is a snapshot of the content
    /// being replaced.
    async fn regenerate_campaign(
        &self,
        campaign_id: &str,
        previous_output: &str,
        feedback: &str,
        context: &CampaignRequest,
        existing: &CampaignResponse,
    ) -> HyperlocalResult<CampaignResponse>;

    async fn campaign_status(
        &self,
        campaign_id: &str,
    ) -> HyperlocalResult<ApiEnvelope<CampaignStatusReport>>;

    async fn campaign_analytics(
        &self,
        campaign_id: &str,
    ) -> HyperlocalResult<ApiEnvelope<AnalyticsReport>>;
}

/// Template-driven stand-in for a content generation service.
#[derive(Debug, Clone)]
pub struct MockBackend {
    config: GeneratorConfig,
    generator: ContentGenerator,
    feedback: FeedbackEngine,
    store: CampaignStore,
}

impl MockBackend {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            generator: ContentGenerator::new(),
            feedback: FeedbackEngine::new(),
            store: CampaignStore::new(),
        }
    }

    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Assemble a full campaign response without any artificial delay.
    pub fn create_campaign<R: Rng + ?Sized>(
        &self,
        request: &CampaignRequest,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> CampaignResponse {
        let category = request.product_category;
        let ad_content = self.generator.generate_with_rng(request, rng);

        CampaignResponse {
            success: true,
            data: CampaignData {
                campaign: CampaignInfo {
                    id: synthesis::campaign_id(now, rng),
                    status: CampaignStatus::Active,
                    created_at: now,
                    expires_at: now + chrono::Duration::days(self.config.campaign_ttl_days),
                },
                product: ProductInfo {
                    name: request.product_name.clone(),
                    category,
                    category_label: category.label().to_string(),
                },
                business: BusinessInfo {
                    business_type: request.business_type,
                    type_label: request.business_type.label().to_string(),
                    city: request.selected_city.clone(),
                    language: request.selected_language.clone(),
                    region: geo::region_for_city(&request.selected_city).to_string(),
                },
                offer: request.offer_text().map(String::from),
                ad_content,
                analytics: synthesis::estimate_analytics(rng),
                settings: CampaignSettings {
                    targeting: Targeting {
                        radius: self.config.targeting_radius_km,
                        age_range: AgeRange {
                            min: self.config.age_min,
                            max: self.config.age_max,
                        },
                        interests: templates::interests(category),
                    },
                    budget: Budget {
                        daily: self.config.daily_budget_inr,
                        total: self.config.total_budget_inr,
                    },
                },
            },
            message: CREATED_MESSAGE.to_string(),
            timestamp: now,
        }
    }

    /// Replace only the ad content of `existing`; every other field is
    /// carried forward untouched.
    pub fn revise_campaign<R: Rng + ?Sized>(
        &self,
        campaign_id: &str,
        feedback: &str,
        context: &CampaignRequest,
        existing: &CampaignResponse,
        rng: &mut R,
    ) -> HyperlocalResult<CampaignResponse> {
        let expected = &existing.data.campaign.id;
        if expected != campaign_id {
            return Err(HyperlocalError::CampaignMismatch {
                expected: expected.clone(),
                actual: campaign_id.to_string(),
            });
        }

        let mut ad_content = self.generator.generate_with_rng(context, rng);
        let fired = self.feedback.apply(&mut ad_content, feedback);

        let mut updated = existing.clone();
        updated.data.ad_content = ad_content;
        updated.message = REGENERATED_MESSAGE.to_string();
        updated.timestamp = Utc::now();

        info!(campaign_id, rules = ?fired, "regenerated campaign content");
        Ok(updated)
    }

    async fn simulate_latency(&self, ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[async_trait]
impl CampaignBackend for MockBackend {
    async fn submit_campaign(&self, request: &CampaignRequest) -> HyperlocalResult<CampaignResponse> {
        self.simulate_latency(self.config.submit_latency_ms).await;

        let response = self.create_campaign(request, Utc::now(), &mut rand::thread_rng());
        let id = self.store.put(request.clone(), response.clone());
        info!(
            campaign_id = %id,
            category = request.product_category.code(),
            city = %request.selected_city,
            "campaign created"
        );
        Ok(response)
    }

    async fn regenerate_campaign(
        &self,
        campaign_id: &str,
        _previous_output: &str,
        feedback: &str,
        context: &CampaignRequest,
        existing: &CampaignResponse,
    ) -> HyperlocalResult<CampaignResponse> {
        self.simulate_latency(self.config.regenerate_latency_ms).await;

        let updated = self
            .revise_campaign(campaign_id, feedback, context, existing, &mut rand::thread_rng())
            .map_err(|e| {
                warn!(campaign_id, error = %e, "regeneration rejected");
                e
            })?;
        self.store.put(context.clone(), updated.clone());
        Ok(updated)
    }

    async fn campaign_status(
        &self,
        campaign_id: &str,
    ) -> HyperlocalResult<ApiEnvelope<CampaignStatusReport>> {
        self.simulate_latency(self.config.status_latency_ms).await;
        let report = synthesis::status_report(campaign_id, Utc::now(), &mut rand::thread_rng());
        Ok(ApiEnvelope::ok(report))
    }

    async fn campaign_analytics(
        &self,
        campaign_id: &str,
    ) -> HyperlocalResult<ApiEnvelope<AnalyticsReport>> {
        self.simulate_latency(self.config.analytics_latency_ms).await;
        let report = synthesis::analytics_report(campaign_id, &mut rand::thread_rng());
        Ok(ApiEnvelope::ok(report))
    }
}
