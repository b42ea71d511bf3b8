//! Per-category template buckets using `{{variable}}` placeholders.

use std::collections::HashMap;

use hyperlocal_core::types::ProductCategory;

/// Fixed copy for one product category.
#[derive(Debug, Clone, Copy)]
pub struct TemplateBucket {
    pub category: ProductCategory,
    pub headlines: [&'static str; 3],
    pub description: &'static str,
    /// Substituted for `{{offer}}` when the merchant gave no offer.
    pub fallback_offer: &'static str,
    pub keywords: &'static [&'static str],
    pub interests: &'static [&'static str],
}

const FOOD_BEVERAGE: TemplateBucket = TemplateBucket {
    category: ProductCategory::FoodBeverage,
    headlines: [
        "Delicious {{product}} in {{city}} - Order Now!",
        "Taste the Best {{product}} - Fresh & Local",
        "{{product}} Delivered to Your Doorstep in {{city}}",
    ],
    description: "Experience authentic flavors with our {{product}}. Made fresh daily and delivered to your neighborhood in {{city}}. {{offer}}",
    fallback_offer: "Special offers available!",
    keywords: &["food", "delivery", "restaurant", "cuisine"],
    interests: &["Food & Dining", "Local Cuisine", "Restaurants"],
};

const FASHION: TemplateBucket = TemplateBucket {
    category: ProductCategory::Fashion,
    headlines: [
        "Latest {{product}} Collection - Shop Now in {{city}}",
        "Trendy {{product}} - Best Prices in {{city}}",
        "Style Up with {{product}} - Exclusive Collection",
    ],
    description: "Discover the latest trends with our {{product}} collection. Perfect for fashion-forward individuals in {{city}}. {{offer}}",
    fallback_offer: "Great deals await!",
    keywords: &["clothing", "apparel", "style", "trends"],
    interests: &["Fashion", "Shopping", "Style & Trends"],
};

const SERVICES: TemplateBucket = TemplateBucket {
    category: ProductCategory::Services,
    headlines: [
        "Professional {{product}} Services in {{city}}",
        "Expert {{product}} - Trusted by Locals",
        "Quality {{product}} Services - Book Now",
    ],
    description: "Professional {{product}} services right here in {{city}}. Trusted by hundreds of satisfied customers. {{offer}}",
    fallback_offer: "Book your appointment today!",
    keywords: &["service", "professional", "local"],
    interests: &["Local Services", "Professional Services", "Home Services"],
};

const HEALTH_BEAUTY: TemplateBucket = TemplateBucket {
    category: ProductCategory::HealthBeauty,
    headlines: [
        "Premium {{product}} - Your Beauty Partner",
        "Transform with {{product}} - Available in {{city}}",
        "Natural {{product}} - Healthy Choice",
    ],
    description: "Enhance your beauty routine with our premium {{product}}. Natural ingredients, proven results. Available in {{city}}. {{offer}}",
    fallback_offer: "Special pricing available!",
    keywords: &["beauty", "skincare", "wellness"],
    interests: &["Beauty", "Health & Wellness", "Skincare"],
};

const ELECTRONICS: TemplateBucket = TemplateBucket {
    category: ProductCategory::Electronics,
    headlines: [
        "Latest {{product}} - Best Deals in {{city}}",
        "Tech Upgrade: {{product}} - Shop Now",
        "Premium {{product}} - Quality Guaranteed",
    ],
    description: "Upgrade your tech with the latest {{product}}. Best prices and genuine products in {{city}}. {{offer}}",
    fallback_offer: "Limited time offers!",
    keywords: &["tech", "gadgets", "devices"],
    interests: &["Technology", "Gadgets", "Electronics"],
};

const OTHER: TemplateBucket = TemplateBucket {
    category: ProductCategory::Other,
    headlines: [
        "{{product}} - Available Now in {{city}}",
        "Quality {{product}} - Shop Local",
        "Best {{product}} Deals - Limited Time",
    ],
    description: "Quality {{product}} available now in {{city}}. {{offer}}",
    fallback_offer: "Check out our special offers!",
    keywords: &["local", "shop"],
    interests: &["Shopping", "Local Business"],
};

/// The bucket for a category. `Other` doubles as the fallback bucket.
pub fn bucket(category: ProductCategory) -> &'static TemplateBucket {
    match category {
        ProductCategory::FoodBeverage => &FOOD_BEVERAGE,
        ProductCategory::Fashion => &FASHION,
        ProductCategory::Services => &SERVICES,
        ProductCategory::HealthBeauty => &HEALTH_BEAUTY,
        ProductCategory::Electronics => &ELECTRONICS,
        ProductCategory::Other => &OTHER,
    }
}

pub fn interests(category: ProductCategory) -> Vec<String> {
    bucket(category)
        .interests
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Replace every `{{name}}` placeholder present in `vars`. Unknown
/// placeholders are left untouched. The template is scanned once, so text
/// inserted from `vars` is never substituted again.
pub fn render(template: &str, vars: &HashMap<&str, &str>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match vars.get(name) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(name);
                        result.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
