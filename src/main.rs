//! AqaarGate web server binary.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aqaargate_web::adapters::http::middleware::{AuthState, CsrfError};
use aqaargate_web::adapters::http::{build_router, csrf_guard, AppState, CookieSettings};
use aqaargate_web::adapters::{
    EmbeddedMessageSource, FileMessageSource, HttpCatalogConfig, HttpCatalogReader,
    JwtClaimsValidator,
};
use aqaargate_web::application::handlers::page::{
    RenderPageHandler, ResolveMetadataHandler, SiteInfo,
};
use aqaargate_web::application::handlers::i18n::Translator;
use aqaargate_web::config::{AppConfig, ConfigError, ValidationError};
use aqaargate_web::ports::{CatalogError, I18nError, MessageSource};

/// Failures that stop the server from starting.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("default message bundle unavailable: {0}")]
    Messages(#[from] I18nError),

    #[error("catalog client: {0}")]
    Catalog(#[from] CatalogError),

    #[error("csrf guard: {0}")]
    Csrf(#[from] CsrfError),

    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        site = %config.site.origin(),
        api = %config.api.base_url,
        "starting aqaargate-web"
    );

    let source: Arc<dyn MessageSource> = match &config.i18n.messages_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading message bundles from disk");
            Arc::new(FileMessageSource::new(dir.clone()))
        }
        None => Arc::new(EmbeddedMessageSource::new()),
    };
    let translator = Arc::new(Translator::load(source).await?);

    let mut catalog_config =
        HttpCatalogConfig::new(config.api.base_url.clone()).with_timeout(config.api.timeout());
    if let Some(api_key) = &config.api.api_key {
        catalog_config = catalog_config.with_api_key(api_key.clone());
    }
    let catalog = Arc::new(HttpCatalogReader::new(catalog_config)?);

    let site = SiteInfo {
        base_url: config.site.origin().to_string(),
        name: config.site.name.clone(),
        default_share_image: config.site.share_image(),
    };
    let pages = Arc::new(RenderPageHandler::new(
        translator,
        ResolveMetadataHandler::new(catalog, site),
    ));

    let csrf = Arc::new(csrf_guard(&config)?);
    let state = AppState::new(pages, csrf, CookieSettings::from_config(&config));
    let auth = AuthState::new(Arc::new(JwtClaimsValidator::new()), config.auth.session_cookie.clone());
    let app = build_router(state, auth, &config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Received shutdown signal");
}
