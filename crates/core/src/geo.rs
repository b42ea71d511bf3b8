//! Static city tables: city → primary language, and city → region.

/// Languages offered on the form, in display order.
pub const SUPPORTED_LANGUAGES: [&str; 12] = [
    "Hindi",
    "Marathi",
    "Gujarati",
    "Tamil",
    "Telugu",
    "Kannada",
    "Malayalam",
    "Bengali",
    "Punjabi",
    "Odia",
    "Assamese",
    "English",
];

const CITY_LANGUAGES: &[(&str, &str)] = &[
    ("Mumbai", "Marathi"),
    ("Pune", "Marathi"),
    ("Nagpur", "Marathi"),
    ("Nashik", "Marathi"),
    ("Delhi", "Hindi"),
    ("Lucknow", "Hindi"),
    ("Jaipur", "Hindi"),
    ("Kanpur", "Hindi"),
    ("Patna", "Hindi"),
    ("Bhopal", "Hindi"),
    ("Indore", "Hindi"),
    ("Varanasi", "Hindi"),
    ("Ahmedabad", "Gujarati"),
    ("Surat", "Gujarati"),
    ("Vadodara", "Gujarati"),
    ("Chennai", "Tamil"),
    ("Coimbatore", "Tamil"),
    ("Madurai", "Tamil"),
    ("Hyderabad", "Telugu"),
    ("Visakhapatnam", "Telugu"),
    ("Vijayawada", "Telugu"),
    ("Bangalore", "Kannada"),
    ("Mysore", "Kannada"),
    ("Mangalore", "Kannada"),
    ("Kochi", "Malayalam"),
    ("Thiruvananthapuram", "Malayalam"),
    ("Kozhikode", "Malayalam"),
    ("Kolkata", "Bengali"),
    ("Siliguri", "Bengali"),
    ("Chandigarh", "Punjabi"),
    ("Amritsar", "Punjabi"),
    ("Ludhiana", "Punjabi"),
    ("Bhubaneswar", "Odia"),
    ("Cuttack", "Odia"),
    ("Guwahati", "Assamese"),
];

const CITY_REGIONS: &[(&str, &str)] = &[
    ("Mumbai", "Maharashtra"),
    ("Delhi", "Delhi"),
    ("Bangalore", "Karnataka"),
    ("Kolkata", "West Bengal"),
    ("Hyderabad", "Telangana"),
];

/// Catch-all region for cities outside the region table.
pub const DEFAULT_REGION: &str = "India";

pub fn all_cities() -> impl Iterator<Item = &'static str> {
    CITY_LANGUAGES.iter().map(|(city, _)| *city)
}

pub fn language_for_city(city: &str) -> Option<&'static str> {
    CITY_LANGUAGES
        .iter()
        .find(|(c, _)| *c == city)
        .map(|(_, lang)| *lang)
}

pub fn is_known_city(city: &str) -> bool {
    language_for_city(city).is_some()
}

pub fn region_for_city(city: &str) -> &'static str {
    CITY_REGIONS
        .iter()
        .find(|(c, _)| *c == city)
        .map(|(_, region)| *region)
        .unwrap_or(DEFAULT_REGION)
}

/// Case-insensitive substring filter; an empty query returns every city.
pub fn search_cities(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    all_cities()
        .filter(|city| needle.is_empty() || city.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        assert_eq!(language_for_city("Chennai"), Some("Tamil"));
        assert_eq!(language_for_city("Pune"), Some("Marathi"));
        assert_eq!(language_for_city("Atlantis"), None);
        assert!(all_cities().all(|c| {
            language_for_city(c).is_some_and(|l| SUPPORTED_LANGUAGES.contains(&l))
        }));
    }

    #[test]
    fn test_region_fallback() {
        assert_eq!(region_for_city("Mumbai"), "Maharashtra");
        assert_eq!(region_for_city("Chennai"), "India");
        assert_eq!(region_for_city(""), "India");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hits = search_cities("BAD");
        assert!(hits.contains(&"Ahmedabad"));
        assert!(hits.contains(&"Hyderabad"));
        assert!(!hits.contains(&"Mumbai"));
        assert_eq!(search_cities("").len(), all_cities().count());
        assert!(search_cities("zzz").is_empty());
    }
}
