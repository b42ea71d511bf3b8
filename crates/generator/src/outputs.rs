//! Per-channel renderings of a campaign: poster, Instagram, WhatsApp and a
//! voice script. Each view exposes the plain text a copy action would use.

use hyperlocal_core::types::{CampaignRequest, CampaignResponse};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PosterOutput {
    pub headline: String,
    pub description: String,
    /// The merchant's offer, or the call to action when there is none.
    pub offer: String,
}

impl PosterOutput {
    pub fn text(&self) -> String {
        let mut text = format!("{}\n\n{}", self.headline, self.description);
        if !self.offer.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.offer);
        }
        text
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstagramOutput {
    pub caption: String,
    pub hashtags: Vec<String>,
}

impl InstagramOutput {
    pub fn text(&self) -> String {
        if self.hashtags.is_empty() {
            return self.caption.clone();
        }
        let tags: Vec<String> = self.hashtags.iter().map(|t| format!("#{t}")).collect();
        format!("{}\n\n{}", self.caption, tags.join(" "))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WhatsAppOutput {
    pub message: String,
}

impl WhatsAppOutput {
    pub fn text(&self) -> String {
        self.message.clone()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VoiceOutput {
    pub script: String,
    pub language: String,
}

impl VoiceOutput {
    pub fn text(&self) -> String {
        self.script.clone()
    }
}

/// The four output tabs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputTab {
    #[default]
    Poster,
    Instagram,
    Whatsapp,
    Voice,
}

impl OutputTab {
    pub const ALL: [OutputTab; 4] = [
        OutputTab::Poster,
        OutputTab::Instagram,
        OutputTab::Whatsapp,
        OutputTab::Voice,
    ];
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelOutputs {
    pub poster: PosterOutput,
    pub instagram: InstagramOutput,
    pub whatsapp: WhatsAppOutput,
    pub voice: VoiceOutput,
}

impl ChannelOutputs {
    pub fn from_response(response: &CampaignResponse, request: &CampaignRequest) -> Self {
        let ad = &response.data.ad_content;
        let city = &request.selected_city;

        let hashtag_product: String = request
            .product_name
            .to_lowercase()
            .split_whitespace()
            .collect();

        Self {
            poster: PosterOutput {
                headline: ad.headline.clone(),
                description: ad.description.clone(),
                offer: request
                    .offer_text()
                    .map(String::from)
                    .unwrap_or_else(|| ad.call_to_action.clone()),
            },
            instagram: InstagramOutput {
                caption: format!("{}\n\n{}", ad.headline, ad.description),
                hashtags: vec![
                    hashtag_product,
                    city.to_lowercase(),
                    request.product_category.code().to_string(),
                ],
            },
            whatsapp: WhatsAppOutput {
                message: format!("*{}*\n\n{}\n\n📍 {}", ad.headline, ad.description, city),
            },
            voice: VoiceOutput {
                script: format!("{}. {}. Visit us in {}.", ad.headline, ad.description, city),
                language: request.selected_language.clone(),
            },
        }
    }

    /// Copyable text of one tab.
    pub fn text_for(&self, tab: OutputTab) -> String {
        match tab {
            OutputTab::Poster => self.poster.text(),
            OutputTab::Instagram => self.instagram.text(),
            OutputTab::Whatsapp => self.whatsapp.text(),
            OutputTab::Voice => self.voice.text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use chrono::Utc;
    use hyperlocal_core::types::{BusinessType, ProductCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(offer: Option<&str>) -> CampaignRequest {
        CampaignRequest {
            product_name: "Masala  Dosa Mix".to_string(),
            product_category: ProductCategory::FoodBeverage,
            business_type: BusinessType::Online,
            selected_city: "Bangalore".to_string(),
            selected_language: "Kannada".to_string(),
            offer: offer.map(String::from),
            selected_platforms: vec![],
        }
    }

    #[test]
    fn test_outputs_follow_channel_formats() {
        let req = request(None);
        let response = MockBackend::default().create_campaign(&req, Utc::now(), &mut StdRng::seed_from_u64(2));
        let ad = &response.data.ad_content;
        let outputs = ChannelOutputs::from_response(&response, &req);

        assert_eq!(outputs.poster.offer, "Shop Now");
        assert_eq!(
            outputs.instagram.hashtags,
            vec!["masaladosamix", "bangalore", "food-beverage"]
        );
        assert!(outputs.instagram.text().ends_with("#masaladosamix #bangalore #food-beverage"));
        assert_eq!(
            outputs.whatsapp.message,
            format!("*{}*\n\n{}\n\n📍 Bangalore", ad.headline, ad.description)
        );
        assert!(outputs.voice.script.ends_with("Visit us in Bangalore."));
        assert_eq!(outputs.voice.language, "Kannada");
    }

    #[test]
    fn test_poster_prefers_offer() {
        let req = request(Some("Buy 2 Get 1 Free"));
        let response = MockBackend::default().create_campaign(&req, Utc::now(), &mut StdRng::seed_from_u64(4));
        let outputs = ChannelOutputs::from_response(&response, &req);
        assert_eq!(outputs.poster.offer, "Buy 2 Get 1 Free");
        assert!(outputs.text_for(OutputTab::Poster).ends_with("\n\nBuy 2 Get 1 Free"));
    }
}
