//! Lingoflow server entry point.

use std::sync::Arc;

use lingoflow::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use lingoflow::adapters::gateways::{
    DictionaryWordTranslator, LlmCorrectionGateway, LlmSummaryGateway, LlmTranslationGateway,
};
use lingoflow::adapters::http::{practice_router, PracticeAppState, RouterOptions};
use lingoflow::adapters::storage::{
    IdleSessionSweeper, IdleSessionSweeperConfig, InMemorySessionRegistry,
};
use lingoflow::config::{AiConfig, AiProvider, AppConfig, ConfigError, WordLookup};
use lingoflow::domain::scenario::ScenarioCatalog;
use lingoflow::ports::{AIProvider, SessionRegistry, WordTranslator};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    let provider = build_provider(&config.ai)?;
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "AI provider configured");

    let catalog = match config.tutor.catalog_path() {
        Some(path) => ScenarioCatalog::from_file(path)?,
        None => ScenarioCatalog::builtin()?,
    };
    tracing::info!(scenarios = catalog.scenarios().count(), "Scenario catalog loaded");

    let translation = Arc::new(LlmTranslationGateway::new(provider.clone()));
    let word_translator: Arc<dyn WordTranslator> = match config.tutor.word_lookup {
        WordLookup::Llm => translation.clone(),
        WordLookup::Dictionary => Arc::new(DictionaryWordTranslator::new()),
    };

    let registry: Arc<dyn SessionRegistry> = Arc::new(InMemorySessionRegistry::new());
    let sweeper = IdleSessionSweeper::new(
        registry.clone(),
        IdleSessionSweeperConfig::default().with_max_idle(config.tutor.session_idle_ttl()),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    let state = PracticeAppState::new(
        registry,
        Arc::new(catalog),
        Arc::new(LlmCorrectionGateway::new(provider.clone())),
        Arc::new(LlmSummaryGateway::new(provider)),
        word_translator,
        translation,
    )
    .with_reply_delay(config.tutor.reply_delay());

    let app = practice_router(
        state,
        RouterOptions {
            request_timeout: std::time::Duration::from_secs(config.server.request_timeout_secs),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Lingoflow listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The sweeper may already be gone; nothing to report then.
    let _ = shutdown_tx.send(true);
    if let Err(err) = sweeper_task.await {
        tracing::warn!(error = %err, "Session sweeper did not stop cleanly");
    }
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

fn build_provider(ai: &AiConfig) -> Result<Arc<dyn AIProvider>, Box<dyn std::error::Error>> {
    let key = ai
        .primary_api_key()
        .ok_or("no API key for the primary AI provider")?
        .to_string();

    let provider: Arc<dyn AIProvider> = match ai.primary_provider {
        AiProvider::Anthropic => {
            let mut provider_config = AnthropicConfig::new(key).with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(AnthropicProvider::new(provider_config)?)
        }
        AiProvider::OpenAI => {
            let mut provider_config = OpenAIConfig::new(key).with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(OpenAIProvider::new(provider_config)?)
        }
    };
    Ok(provider)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
