//! Hyperlocal Ads: mock ad content generator for local merchants.
//!
//! `serve` exposes the campaign API over HTTP; `generate` runs a single
//! form → generate → feedback session from the command line.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hyperlocal_api::ApiServer;
use hyperlocal_core::config::AppConfig;
use hyperlocal_core::locale::{
    FilePreferenceStore, Locale, LocaleContext, MemoryPreferenceStore, PreferenceStore,
};
use hyperlocal_core::types::BusinessType;
use hyperlocal_flow::FlowController;
use hyperlocal_generator::MockBackend;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "hyperlocal-ads")]
#[command(about = "Mock hyperlocal ad campaign generator")]
#[command(version)]
struct Cli {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "HYPERLOCAL_ADS_CONFIG")]
    config: Option<String>,

    /// Human-readable logs instead of JSON
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API and metrics exporter
    Serve {
        /// HTTP port (overrides config)
        #[arg(long, env = "HYPERLOCAL_ADS__API__HTTP_PORT")]
        http_port: Option<u16>,

        /// Metrics port (overrides config)
        #[arg(long, env = "HYPERLOCAL_ADS__METRICS__PORT")]
        metrics_port: Option<u16>,
    },
    /// Generate one campaign and print the response JSON
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    product: String,

    /// Category code, e.g. `food-beverage`
    #[arg(long)]
    category: String,

    #[arg(long)]
    city: String,

    /// Ad language (defaults to the city's language)
    #[arg(long)]
    language: Option<String>,

    /// `retail`, `online` or `hybrid`
    #[arg(long, default_value = "retail")]
    business_type: String,

    #[arg(long)]
    offer: Option<String>,

    /// Request one regeneration with this feedback
    #[arg(long)]
    feedback: Option<String>,

    /// Finalize the campaign after generation
    #[arg(long, default_value_t = false)]
    accept: bool,

    /// Interface locale to store as the preferred one (`hi`, `en`, `ta`, ...)
    #[arg(long)]
    ui_locale: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.pretty);

    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    match cli.command {
        Command::Serve {
            http_port,
            metrics_port,
        } => {
            if let Some(port) = http_port {
                config.api.http_port = port;
            }
            if let Some(port) = metrics_port {
                config.metrics.port = port;
            }
            serve(config).await
        }
        Command::Generate(args) => generate(config, args).await,
    }
}

fn init_tracing(pretty: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "hyperlocal_ads=info,hyperlocal_api=info,hyperlocal_generator=info,hyperlocal_flow=info,tower_http=info"
            .into()
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if pretty {
        builder.init();
    } else {
        builder.json().init();
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        "Configuration loaded"
    );

    let backend = Arc::new(MockBackend::new(config.generator.clone()));
    let api_server = ApiServer::new(config, backend.clone());

    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    // Spawn expired campaign sweep
    let store = backend.store().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            store.purge_expired(chrono::Utc::now());
        }
    });

    info!("Hyperlocal Ads is ready to serve traffic");
    api_server.start_http().await
}

async fn generate(config: AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let store: Box<dyn PreferenceStore> = match &config.locale.preference_path {
        Some(path) => Box::new(
            FilePreferenceStore::open(path)
                .with_context(|| format!("opening preference store {path}"))?,
        ),
        None => Box::new(MemoryPreferenceStore::new()),
    };
    let default_locale = Locale::parse(&config.locale.default_locale).unwrap_or_default();
    let mut locale = LocaleContext::from_store(store.as_ref(), default_locale)?;
    if let Some(code) = &args.ui_locale {
        let chosen = Locale::parse(code)
            .with_context(|| format!("unsupported interface locale '{code}'"))?;
        locale.set_locale(chosen);
        locale.persist(store.as_ref())?;
    }
    info!(locale = locale.locale.code(), "interface locale");

    let backend = Arc::new(MockBackend::new(config.generator.clone()));
    let mut flow = FlowController::new(backend, config.flow.clone(), locale);

    flow.form.product_name = args.product;
    flow.form.set_category_code(&args.category);
    flow.form.business_type = BusinessType::from_code(&args.business_type);
    flow.form.set_city(&args.city);
    if let Some(language) = &args.language {
        flow.form.set_language(language);
    }
    if let Some(offer) = &args.offer {
        flow.form.set_offer(offer);
    }

    flow.submit().await?;

    if let Some(feedback) = &args.feedback {
        flow.request_improvement()?;
        flow.set_feedback_text(feedback);
        flow.submit_feedback().await?;
    }
    if args.accept {
        flow.accept()?;
    }

    let response = flow.response().context("no campaign was generated")?;
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
