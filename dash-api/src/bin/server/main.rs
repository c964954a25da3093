use std::sync::Arc;

use auth::Authenticator;
use dash_api::config::Config;
use dash_api::domain::account::service::AccountService;
use dash_api::inbound::http::router::create_router;
use dash_api::keys::load_key_pair;
use dash_api::outbound::repositories::InMemoryAccountRepository;
use dash_api::outbound::PasswordPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dash_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "dash-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_concurrent_hashes = config.auth.max_concurrent_hashes,
        "Configuration loaded"
    );

    // Key generation is CPU-bound and can take seconds.
    let auth_config = config.auth.clone();
    let key_pair = tokio::task::spawn_blocking(move || load_key_pair(&auth_config)).await??;
    let authenticator = Arc::new(Authenticator::new(&key_pair)?);

    let password_pool = PasswordPool::new(
        Arc::clone(&authenticator),
        config.auth.max_concurrent_hashes,
    );
    tracing::info!(
        permits = password_pool.available_permits(),
        memory_mib = password_pool.available_permits() * 64,
        "Password hashing pool created"
    );

    let account_repository = Arc::new(InMemoryAccountRepository::new());
    let account_service = Arc::new(AccountService::new(account_repository, password_pool));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
