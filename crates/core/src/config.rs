use serde::Deserialize;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `HYPERLOCAL_ADS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

// ─── Generator Config ───────────────────────────────────────────────────

/// Mock backend behaviour: simulated latencies and fixed campaign settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_submit_latency_ms")]
    pub submit_latency_ms: u64,
    #[serde(default = "default_regenerate_latency_ms")]
    pub regenerate_latency_ms: u64,
    #[serde(default = "default_status_latency_ms")]
    pub status_latency_ms: u64,
    #[serde(default = "default_analytics_latency_ms")]
    pub analytics_latency_ms: u64,
    #[serde(default = "default_campaign_ttl_days")]
    pub campaign_ttl_days: i64,
    #[serde(default = "default_targeting_radius_km")]
    pub targeting_radius_km: u32,
    #[serde(default = "default_age_min")]
    pub age_min: u8,
    #[serde(default = "default_age_max")]
    pub age_max: u8,
    #[serde(default = "default_daily_budget_inr")]
    pub daily_budget_inr: u32,
    #[serde(default = "default_total_budget_inr")]
    pub total_budget_inr: u32,
}

fn default_submit_latency_ms() -> u64 {
    1500
}

fn default_regenerate_latency_ms() -> u64 {
    1500
}

fn default_status_latency_ms() -> u64 {
    500
}

fn default_analytics_latency_ms() -> u64 {
    800
}

fn default_campaign_ttl_days() -> i64 {
    30
}

fn default_targeting_radius_km() -> u32 {
    5
}

fn default_age_min() -> u8 {
    18
}

fn default_age_max() -> u8 {
    65
}

fn default_daily_budget_inr() -> u32 {
    500
}

fn default_total_budget_inr() -> u32 {
    15000
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            submit_latency_ms: default_submit_latency_ms(),
            regenerate_latency_ms: default_regenerate_latency_ms(),
            status_latency_ms: default_status_latency_ms(),
            analytics_latency_ms: default_analytics_latency_ms(),
            campaign_ttl_days: default_campaign_ttl_days(),
            targeting_radius_km: default_targeting_radius_km(),
            age_min: default_age_min(),
            age_max: default_age_max(),
            daily_budget_inr: default_daily_budget_inr(),
            total_budget_inr: default_total_budget_inr(),
        }
    }
}

impl GeneratorConfig {
    /// All latencies zeroed, for tests and one-shot CLI runs.
    pub fn instant() -> Self {
        Self {
            submit_latency_ms: 0,
            regenerate_latency_ms: 0,
            status_latency_ms: 0,
            analytics_latency_ms: 0,
            ..Self::default()
        }
    }
}

// ─── Flow Config ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    #[serde(default = "default_offer_max_chars")]
    pub offer_max_chars: usize,
    #[serde(default = "default_feedback_text")]
    pub default_feedback: String,
    #[serde(default = "default_loading_steps")]
    pub loading_steps: Vec<LoadingStepConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoadingStepConfig {
    pub text_key: String,
    pub duration_ms: u64,
}

fn default_offer_max_chars() -> usize {
    crate::validation::OFFER_MAX_CHARS
}
fn default_feedback_text() -> String {
    "Please improve this ad content".to_string()
}
fn default_loading_steps() -> Vec<LoadingStepConfig> {
    [
        ("loader.step1", 2000),
        ("loader.step2", 2000),
        ("loader.step3", 2500),
        ("loader.step4", 1500),
    ]
    .into_iter()
    .map(|(key, ms)| LoadingStepConfig {
        text_key: key.to_string(),
        duration_ms: ms,
    })
    .collect()
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            offer_max_chars: default_offer_max_chars(),
            default_feedback: default_feedback_text(),
            loading_steps: default_loading_steps(),
        }
    }
}

// ─── Locale Config ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// JSON file holding persisted UI preferences. In-memory when unset.
    #[serde(default)]
    pub preference_path: Option<String>,
}

fn default_locale() -> String {
    "hi".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            preference_path: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            generator: GeneratorConfig::default(),
            flow: FlowConfig::default(),
            locale: LocaleConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file and environment
    /// variables. Environment values win.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("HYPERLOCAL_ADS")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
