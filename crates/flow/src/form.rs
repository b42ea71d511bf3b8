//! Campaign form state.

use std::collections::BTreeSet;

use hyperlocal_core::geo;
use hyperlocal_core::types::{BusinessType, CampaignRequest, Platform, ProductCategory};
use hyperlocal_core::validation::{self, ValidationError, OFFER_MAX_CHARS};

#[derive(Debug, Clone)]
pub struct CampaignForm {
    pub product_name: String,
    pub product_category: Option<ProductCategory>,
    pub business_type: BusinessType,
    selected_city: String,
    selected_language: String,
    language_overridden: bool,
    offer: String,
    offer_max_chars: usize,
    selected_platforms: BTreeSet<Platform>,
}

impl CampaignForm {
    pub fn new(offer_max_chars: usize) -> Self {
        Self {
            product_name: String::new(),
            product_category: None,
            business_type: BusinessType::default(),
            selected_city: String::new(),
            selected_language: String::new(),
            language_overridden: false,
            offer: String::new(),
            offer_max_chars,
            selected_platforms: BTreeSet::new(),
        }
    }

    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    pub fn selected_language(&self) -> &str {
        &self.selected_language
    }

    pub fn offer(&self) -> &str {
        &self.offer
    }

    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.selected_platforms.iter()
    }

    /// Select a city. The language follows the city table unless the user
    /// picked one by hand; clearing the city clears an auto-filled language.
    pub fn set_city(&mut self, city: &str) {
        self.selected_city = city.trim().to_string();
        if self.language_overridden {
            return;
        }
        self.selected_language = geo::language_for_city(&self.selected_city)
            .unwrap_or_default()
            .to_string();
    }

    pub fn set_language(&mut self, language: &str) {
        self.selected_language = language.to_string();
        self.language_overridden = !language.is_empty();
    }

    /// Characters past the limit are dropped, as the input control does.
    pub fn set_offer(&mut self, offer: &str) {
        self.offer = validation::clamp_offer(offer, self.offer_max_chars);
    }

    pub fn set_category_code(&mut self, code: &str) {
        self.product_category = ProductCategory::parse(code);
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        if !self.selected_platforms.remove(&platform) {
            self.selected_platforms.insert(platform);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.to_request().is_ok()
    }

    pub fn to_request(&self) -> Result<CampaignRequest, ValidationError> {
        let product_category = self
            .product_category
            .ok_or(ValidationError::MissingCategory)?;

        let request = CampaignRequest {
            product_name: self.product_name.trim().to_string(),
            product_category,
            business_type: self.business_type,
            selected_city: self.selected_city.clone(),
            selected_language: self.selected_language.clone(),
            offer: Some(self.offer.clone()).filter(|o| !o.is_empty()),
            selected_platforms: self.selected_platforms.iter().copied().collect(),
        };
        validation::validate_request(&request, self.offer_max_chars)?;
        Ok(request)
    }
}

impl Default for CampaignForm {
    fn default() -> Self {
        Self::new(OFFER_MAX_CHARS)
    }
}
