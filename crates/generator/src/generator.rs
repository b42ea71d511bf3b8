use std::collections::HashMap;

use hyperlocal_core::types::{AdContent, BusinessType, CampaignRequest, TargetAudience};
use rand::Rng;
use tracing::debug;

use crate::templates::{self, TemplateBucket};

/// Builds ad content from the category template buckets.
///
/// The headline is the only randomized element; description, call to
/// action, keywords and audience are fully determined by the request.
#[derive(Debug, Clone, Default)]
pub struct ContentGenerator;

impl ContentGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate content using the thread-local RNG.
    pub fn generate(&self, request: &CampaignRequest) -> AdContent {
        self.generate_with_rng(request, &mut rand::thread_rng())
    }

    /// Generate content with a caller-supplied random source.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &CampaignRequest,
        rng: &mut R,
    ) -> AdContent {
        let bucket = templates::bucket(request.product_category);
        let offer = request.offer_text().unwrap_or(bucket.fallback_offer);

        let vars = HashMap::from([
            ("product", request.product_name.as_str()),
            ("city", request.selected_city.as_str()),
            ("offer", offer),
        ]);

        let pick = rng.gen_range(0..bucket.headlines.len());
        let headline = templates::render(bucket.headlines[pick], &vars);
        let description = templates::render(bucket.description, &vars);

        debug!(
            category = request.product_category.code(),
            headline_template = pick,
            "generated ad content"
        );

        AdContent {
            headline,
            description,
            call_to_action: call_to_action(request.business_type).to_string(),
            keywords: keywords(request, bucket),
            target_audience: TargetAudience {
                location: request.selected_city.clone(),
                language: request.selected_language.clone(),
                interests: templates::interests(request.product_category),
            },
        }
    }
}

pub fn call_to_action(business_type: BusinessType) -> &'static str {
    match business_type {
        BusinessType::Online => "Shop Now",
        BusinessType::Hybrid => "Visit Store or Order Online",
        BusinessType::Retail => "Visit Our Store",
    }
}

/// Product, city and category code first, then the bucket's extras.
fn keywords(request: &CampaignRequest, bucket: &TemplateBucket) -> Vec<String> {
    let mut keywords = vec![
        request.product_name.to_lowercase(),
        request.selected_city.to_lowercase(),
        request.product_category.code().to_string(),
    ];
    keywords.extend(bucket.keywords.iter().map(|k| k.to_string()));
    keywords
}
