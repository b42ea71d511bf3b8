use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Request ────────────────────────────────────────────────────────────

/// Product category selected on the campaign form.
///
/// Unknown codes deserialize to [`ProductCategory::Other`] so the generator
/// always has a template bucket to work with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    FoodBeverage,
    Fashion,
    Services,
    HealthBeauty,
    Electronics,
    #[serde(other)]
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        ProductCategory::FoodBeverage,
        ProductCategory::Fashion,
        ProductCategory::Services,
        ProductCategory::HealthBeauty,
        ProductCategory::Electronics,
        ProductCategory::Other,
    ];

    /// Wire code, e.g. `food-beverage`.
    pub fn code(&self) -> &'static str {
        match self {
            ProductCategory::FoodBeverage => "food-beverage",
            ProductCategory::Fashion => "fashion",
            ProductCategory::Services => "services",
            ProductCategory::HealthBeauty => "health-beauty",
            ProductCategory::Electronics => "electronics",
            ProductCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::FoodBeverage => "Food & Beverages",
            ProductCategory::Fashion => "Fashion & Accessories",
            ProductCategory::Services => "Local Services",
            ProductCategory::HealthBeauty => "Health & Beauty",
            ProductCategory::Electronics => "Electronics & Gadgets",
            ProductCategory::Other => "Other",
        }
    }

    /// Lenient lookup: anything unrecognised maps to `Other`.
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code.trim())
            .unwrap_or(ProductCategory::Other)
    }

    /// Strict lookup used by form inputs that only offer known codes.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code.trim())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Online,
    Hybrid,
    #[default]
    #[serde(other)]
    Retail,
}

impl BusinessType {
    pub fn code(&self) -> &'static str {
        match self {
            BusinessType::Retail => "retail",
            BusinessType::Online => "online",
            BusinessType::Hybrid => "hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::Retail => "Retail Store",
            BusinessType::Online => "Online Only",
            BusinessType::Hybrid => "Online + Store",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "online" => BusinessType::Online,
            "hybrid" => BusinessType::Hybrid,
            _ => BusinessType::Retail,
        }
    }
}

/// Distribution platforms a merchant can tick on the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Whatsapp,
    Google,
}

/// Structured input collected by the campaign form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRequest {
    pub product_name: String,
    pub product_category: ProductCategory,
    #[serde(default)]
    pub business_type: BusinessType,
    pub selected_city: String,
    #[serde(default)]
    pub selected_language: String,
    #[serde(default)]
    pub offer: Option<String>,
    #[serde(default)]
    pub selected_platforms: Vec<Platform>,
}

impl CampaignRequest {
    /// The offer text, treating an empty string as absent.
    pub fn offer_text(&self) -> Option<&str> {
        self.offer.as_deref().filter(|o| !o.is_empty())
    }
}

// ─── Response ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
}

/// Envelope returned by campaign creation and regeneration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub success: bool,
    pub data: CampaignData,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignData {
    pub campaign: CampaignInfo,
    pub product: ProductInfo,
    pub business: BusinessInfo,
    pub offer: Option<String>,
    pub ad_content: AdContent,
    pub analytics: CampaignAnalytics,
    pub settings: CampaignSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInfo {
    pub id: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub name: String,
    pub category: ProductCategory,
    pub category_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    #[serde(rename = "type")]
    pub business_type: BusinessType,
    pub type_label: String,
    pub city: String,
    pub language: String,
    pub region: String,
}

/// Generated headline/description/CTA/keyword bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdContent {
    pub headline: String,
    pub description: String,
    pub call_to_action: String,
    pub keywords: Vec<String>,
    pub target_audience: TargetAudience,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    pub location: String,
    pub language: String,
    pub interests: Vec<String>,
}

/// Independently randomized estimates. No funnel relationship is enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignAnalytics {
    pub estimated_reach: u32,
    pub estimated_impressions: u32,
    pub estimated_clicks: u32,
    pub estimated_conversions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSettings {
    pub targeting: Targeting,
    pub budget: Budget,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Targeting {
    /// Kilometres around the merchant.
    pub radius: u32,
    pub age_range: AgeRange,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

/// Budget in INR.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub daily: u32,
    pub total: u32,
}

// ─── Status / analytics reports ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStatusReport {
    pub campaign_id: String,
    pub status: CampaignStatus,
    pub views: u32,
    pub clicks: u32,
    pub conversions: u32,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub campaign_id: String,
    pub period: String,
    pub metrics: AnalyticsMetrics,
    pub demographics: Demographics,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsMetrics {
    pub impressions: u32,
    pub clicks: u32,
    pub conversions: u32,
    pub spend: u32,
    pub revenue: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// Percentage per age bucket, keyed `18-24`, `25-34`, ...
    pub age_groups: BTreeMap<String, u32>,
    pub top_cities: Vec<CityShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityShare {
    pub city: String,
    pub percentage: u32,
}
