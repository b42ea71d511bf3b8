use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use hyperlocal_core::types::{CampaignRequest, CampaignResponse};
use tracing::{debug, info};

/// A campaign together with the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCampaign {
    pub request: CampaignRequest,
    pub response: CampaignResponse,
}

impl StoredCampaign {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.response.data.campaign.expires_at <= now
    }
}

/// Session-scoped, in-memory campaign map keyed by campaign id.
#[derive(Debug, Clone, Default)]
pub struct CampaignStore {
    campaigns: Arc<DashMap<String, StoredCampaign>>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, dropping expired campaigns first. Returns the
    /// campaign id.
    pub fn put(&self, request: CampaignRequest, response: CampaignResponse) -> String {
        self.purge_expired(Utc::now());
        let id = response.data.campaign.id.clone();
        info!(campaign_id = %id, "storing campaign");
        self.campaigns
            .insert(id.clone(), StoredCampaign { request, response });
        id
    }

    pub fn get(&self, id: &str) -> Option<StoredCampaign> {
        self.get_at(id, Utc::now())
    }

    /// Look up a campaign as of `now`. An expired entry is removed and
    /// reported as absent.
    pub fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<StoredCampaign> {
        let stored = self.campaigns.get(id).map(|entry| entry.clone())?;
        if stored.is_expired(now) {
            self.campaigns.remove_if(id, |_, c| c.is_expired(now));
            debug!(campaign_id = %id, "campaign expired");
            return None;
        }
        Some(stored)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Remove every campaign whose `expires_at` has passed. Returns how
    /// many were dropped.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.campaigns.len();
        self.campaigns.retain(|_, c| !c.is_expired(now));
        let removed = before.saturating_sub(self.campaigns.len());
        if removed > 0 {
            info!(removed, "purged expired campaigns");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use chrono::Duration;
    use hyperlocal_core::config::GeneratorConfig;
    use hyperlocal_core::types::{BusinessType, ProductCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request() -> CampaignRequest {
        CampaignRequest {
            product_name: "Kurtis".to_string(),
            product_category: ProductCategory::Fashion,
            business_type: BusinessType::Hybrid,
            selected_city: "Jaipur".to_string(),
            selected_language: "Hindi".to_string(),
            offer: None,
            selected_platforms: vec![],
        }
    }

    fn response_created_at(created: DateTime<Utc>, seed: u64) -> CampaignResponse {
        MockBackend::new(GeneratorConfig::instant()).create_campaign(
            &request(),
            created,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_live_campaign_is_returned() {
        let store = CampaignStore::new();
        let response = response_created_at(Utc::now(), 1);
        let id = store.put(request(), response.clone());
        assert_eq!(store.get(&id).unwrap().response, response);
        assert!(store.contains(&id));
    }

    #[test]
    fn test_expired_campaign_is_dropped_on_lookup() {
        let store = CampaignStore::new();
        let created = Utc::now();
        let response = response_created_at(created, 2);
        let expires_at = response.data.campaign.expires_at;
        let id = store.put(request(), response);

        assert!(store.get_at(&id, expires_at - Duration::seconds(1)).is_some());
        assert!(store.get_at(&id, expires_at).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_purges_expired_entries() {
        let store = CampaignStore::new();
        let stale = response_created_at(Utc::now() - Duration::days(31), 3);
        let stale_id = stale.data.campaign.id.clone();
        store
            .campaigns
            .insert(stale_id.clone(), StoredCampaign { request: request(), response: stale });
        assert_eq!(store.len(), 1);

        let fresh_id = store.put(request(), response_created_at(Utc::now(), 4));
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&stale_id));
        assert!(store.contains(&fresh_id));
        assert_eq!(store.purge_expired(Utc::now()), 0);
    }
}
