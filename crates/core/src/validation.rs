//! Boundary checks applied before a request reaches the generator.

use thiserror::Error;

use crate::geo;
use crate::types::CampaignRequest;

/// Maximum offer length accepted by the offer input.
pub const OFFER_MAX_CHARS: usize = 150;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("product name is required")]
    MissingProductName,

    #[error("product category is required")]
    MissingCategory,

    #[error("city is required")]
    MissingCity,

    #[error("unknown city '{0}'")]
    UnknownCity(String),

    #[error("offer is {len} characters, maximum is {max}")]
    OfferTooLong { len: usize, max: usize },
}

pub fn validate_request(request: &CampaignRequest, offer_max: usize) -> Result<(), ValidationError> {
    if request.product_name.trim().is_empty() {
        return Err(ValidationError::MissingProductName);
    }
    let city = request.selected_city.trim();
    if city.is_empty() {
        return Err(ValidationError::MissingCity);
    }
    if !geo::is_known_city(city) {
        return Err(ValidationError::UnknownCity(city.to_string()));
    }
    if let Some(offer) = &request.offer {
        let len = offer.chars().count();
        if len > offer_max {
            return Err(ValidationError::OfferTooLong {
                len,
                max: offer_max,
            });
        }
    }
    Ok(())
}

/// Input-control behaviour: keep at most `max` characters.
pub fn clamp_offer(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
