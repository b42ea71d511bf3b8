//! Synthetic campaign identifiers, estimates and reports.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hyperlocal_core::types::{
    AnalyticsMetrics, AnalyticsReport, CampaignAnalytics, CampaignStatus, CampaignStatusReport,
    CityShare, Demographics,
};
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_SUFFIX_LEN: usize = 9;

/// `CAMP-<epoch millis>-<9 upper-case base36 chars>`.
pub fn campaign_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("CAMP-{}-{}", now.timestamp_millis(), suffix)
}

/// Each figure is drawn independently; clicks may exceed impressions.
pub fn estimate_analytics<R: Rng + ?Sized>(rng: &mut R) -> CampaignAnalytics {
    CampaignAnalytics {
        estimated_reach: rng.gen_range(1_000..51_000),
        estimated_impressions: rng.gen_range(5_000..205_000),
        estimated_clicks: rng.gen_range(100..5_100),
        estimated_conversions: rng.gen_range(10..510),
    }
}

pub fn status_report<R: Rng + ?Sized>(
    campaign_id: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> CampaignStatusReport {
    CampaignStatusReport {
        campaign_id: campaign_id.to_string(),
        status: CampaignStatus::Active,
        views: rng.gen_range(0..10_000),
        clicks: rng.gen_range(0..500),
        conversions: rng.gen_range(0..50),
        last_updated: now,
    }
}

pub fn analytics_report<R: Rng + ?Sized>(campaign_id: &str, rng: &mut R) -> AnalyticsReport {
    let metrics = AnalyticsMetrics {
        impressions: rng.gen_range(10_000..60_000),
        clicks: rng.gen_range(100..2_100),
        conversions: rng.gen_range(20..220),
        spend: rng.gen_range(2_000..12_000),
        revenue: rng.gen_range(10_000..60_000),
    };

    let age_groups: BTreeMap<String, u32> = [
        ("18-24", 10..40),
        ("25-34", 20..60),
        ("35-44", 15..45),
        ("45-54", 10..30),
        ("55+", 5..20),
    ]
    .into_iter()
    .map(|(bucket, range)| (bucket.to_string(), rng.gen_range(range)))
    .collect();

    let top_cities = [("Mumbai", 25), ("Delhi", 20), ("Bangalore", 15)]
        .into_iter()
        .map(|(city, percentage)| CityShare {
            city: city.to_string(),
            percentage,
        })
        .collect();

    AnalyticsReport {
        campaign_id: campaign_id.to_string(),
        period: "last_30_days".to_string(),
        metrics,
        demographics: Demographics {
            age_groups,
            top_cities,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_campaign_id_shape() {
        let now = Utc::now();
        let id = campaign_id(now, &mut rand::thread_rng());
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "CAMP");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), ID_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_analytics_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let a = estimate_analytics(&mut rng);
            assert!((1_000..=50_999).contains(&a.estimated_reach));
            assert!((5_000..=204_999).contains(&a.estimated_impressions));
            assert!((100..=5_099).contains(&a.estimated_clicks));
            assert!((10..=509).contains(&a.estimated_conversions));
        }
    }

    #[test]
    fn test_analytics_report_shape() {
        let report = analytics_report("CAMP-1-ABC", &mut StdRng::seed_from_u64(3));
        assert_eq!(report.period, "last_30_days");
        assert_eq!(report.demographics.age_groups.len(), 5);
        assert_eq!(report.demographics.top_cities[0].city, "Mumbai");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["demographics"]["ageGroups"]["55+"].is_number());
        assert_eq!(json["campaignId"], "CAMP-1-ABC");
    }
}
