//! Styleboard API server.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use styleboard::adapters::ai::{OpenAIAssistantAgent, OpenAIChatKitProvider, OpenAIConfig};
use styleboard::adapters::auth::{SupabaseAuthConfig, SupabaseSessionValidator};
use styleboard::adapters::email::{ResendConfig, ResendEmailSender};
use styleboard::adapters::http::{build_router, AppSettings, AppState, RouterOptions};
use styleboard::adapters::memory::InMemoryRoleCache;
use styleboard::adapters::postgres::{
    PostgresAccountRepository, PostgresProfessionalRepository, PostgresReviewRepository,
    PostgresRoleRepository, PostgresUsageStore,
};
use styleboard::adapters::redis::RedisRoleCache;
use styleboard::adapters::storage::{LocalImageStore, SupabaseImageStore, SupabaseStorageConfig};
use styleboard::application::handlers::{SearchTiming, UsagePolicy};
use styleboard::config::{AppConfig, StorageBackend};
use styleboard::domain::search::QuotaLimits;
use styleboard::ports::{ChatKitProvider, EmailSender, ImageStore, RoleCache, SearchAgent};

type BoxError = Box<dyn Error + Send + Sync>;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn settings(config: &AppConfig) -> AppSettings {
    AppSettings {
        usage: UsagePolicy {
            limits: QuotaLimits {
                daily: config.usage.daily_limit,
                monthly: config.usage.monthly_limit,
            },
            utc_offset_minutes: config.usage.utc_offset_minutes,
        },
        search: SearchTiming {
            poll_interval: config.ai.poll_interval(),
            timeout: config.ai.search_timeout(),
        },
        max_upload_bytes: config.storage.max_upload_bytes,
        dispatch_secret: config
            .email
            .as_ref()
            .and_then(|e| e.dispatch_secret.clone()),
        maps_api_key: config.client.maps_api_key.clone(),
    }
}

fn image_store(config: &AppConfig) -> Result<Arc<dyn ImageStore>, BoxError> {
    match config.storage.backend() {
        Some(StorageBackend::Local { dir, url_prefix }) => {
            tracing::info!(dir = %dir, "storing images on local disk");
            Ok(Arc::new(LocalImageStore::new(dir, url_prefix)))
        }
        Some(StorageBackend::Supabase {
            url,
            service_key,
            bucket,
        }) => {
            let store =
                SupabaseImageStore::new(SupabaseStorageConfig::new(url, service_key, bucket))?;
            Ok(Arc::new(store))
        }
        None => Err("no image store configured".into()),
    }
}

async fn role_cache(config: &AppConfig) -> Result<Arc<dyn RoleCache>, BoxError> {
    match &config.redis {
        Some(redis) => {
            let cache = RedisRoleCache::connect(&redis.url, redis.role_cache_ttl_secs).await?;
            tracing::info!("role cache: redis");
            Ok(Arc::new(cache))
        }
        None => {
            tracing::info!("role cache: in-process");
            Ok(Arc::new(InMemoryRoleCache::new(Duration::from_secs(3600))))
        }
    }
}

fn ai_adapters(
    config: &AppConfig,
) -> Result<(Option<Arc<dyn SearchAgent>>, Option<Arc<dyn ChatKitProvider>>), BoxError> {
    let openai = |key: &str| {
        OpenAIConfig::new(key)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.search_timeout())
    };

    let mut search: Option<Arc<dyn SearchAgent>> = None;
    if let Some((key, assistant)) = config.ai.search() {
        let agent = OpenAIAssistantAgent::new(openai(key), assistant)?;
        search = Some(Arc::new(agent));
    }
    let mut chatkit: Option<Arc<dyn ChatKitProvider>> = None;
    if let Some((key, workflow)) = config.ai.chatkit() {
        let provider = OpenAIChatKitProvider::new(openai(key), workflow)?;
        chatkit = Some(Arc::new(provider));
    }
    tracing::info!(
        ai_search = search.is_some(),
        chatkit = chatkit.is_some(),
        "AI features"
    );
    Ok((search, chatkit))
}

fn email_sender(config: &AppConfig) -> Result<Option<Arc<dyn EmailSender>>, BoxError> {
    let Some(email) = &config.email else {
        tracing::info!("reminder email disabled");
        return Ok(None);
    };
    let sender = ResendEmailSender::new(
        ResendConfig::new(&email.resend_api_key, &email.from_email)
            .with_from_name(&email.from_name),
    )?;
    Ok(Some(Arc::new(sender)))
}

async fn build_state(config: &AppConfig) -> Result<AppState, BoxError> {
    let mut auth = SupabaseAuthConfig::new(&config.auth.jwt_secret)
        .with_audience(&config.auth.audience);
    if let Some(issuer) = &config.auth.issuer {
        auth = auth.with_issuer(issuer);
    }
    let validator = Arc::new(SupabaseSessionValidator::new(auth));

    let mut state = AppState::in_memory(validator, image_store(config)?, settings(config));

    if let Some(database) = &config.database {
        let pool = database.connect().await?;
        if database.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("migrations applied");
        }

        let reviews = Arc::new(PostgresReviewRepository::new(pool.clone()));
        let professionals = Arc::new(PostgresProfessionalRepository::new(pool.clone()));
        let accounts = Arc::new(PostgresAccountRepository::new(pool.clone()));
        state.reviews = reviews.clone();
        state.ratings = reviews;
        state.roles = Arc::new(PostgresRoleRepository::new(pool.clone()));
        state.profiles = professionals.clone();
        state.services = professionals.clone();
        state.portfolio = professionals;
        state.usage = Arc::new(PostgresUsageStore::new(pool));
        state.usernames = accounts.clone();
        state.reminders = accounts;
        tracing::info!("persistence: postgres");
    } else {
        tracing::warn!("no database configured, data lives in memory only");
    }

    state.role_cache = role_cache(config).await?;
    let (search_agent, chatkit) = ai_adapters(config)?;
    state.search_agent = search_agent;
    state.chatkit = chatkit;
    state.email = email_sender(config)?;
    Ok(state)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let state = build_state(&config).await?;
    let options = RouterOptions {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };

    let mut app = build_router(state, &options);
    if let Some(StorageBackend::Local { dir, url_prefix }) = config.storage.backend() {
        app = app.nest_service(url_prefix, ServeDir::new(dir));
    }

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "styleboard listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
