use std::env;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

use stadium::api::{self, AppState};
use stadium::auth::{AccessGuard, AuthorizationPolicy, SiwsAuthenticator, Sr25519Verifier};
use stadium::store::redis::RedisProjectStore;

#[derive(Debug, Clone)]
struct ServerSettings {
    port: u16,
    redis_url: String,
    admin_wallets: String,
    expected_domain: String,
}

fn load_config() -> Result<ServerSettings, Box<dyn std::error::Error>> {
    Ok(ServerSettings {
        port: env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?,
        redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        admin_wallets: env::var("ADMIN_WALLETS").unwrap_or_default(),
        expected_domain: env::var("EXPECTED_DOMAIN").unwrap_or_else(|_| "localhost".to_string()),
    })
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Load configuration
    let settings = load_config()?;

    let policy = AuthorizationPolicy::from_comma_list(&settings.admin_wallets);
    let authenticator =
        SiwsAuthenticator::new(settings.expected_domain.clone(), Arc::new(Sr25519Verifier::new()));
    let guard = Arc::new(AccessGuard::new(authenticator, policy));

    let redis_client = Arc::new(redis::Client::open(settings.redis_url.clone())?);
    let store = Arc::new(RedisProjectStore::new(redis_client));

    let state = AppState { guard, store };
    let app = api::router(state);

    // Bind the server
    let listener = TcpListener::bind(format!("0.0.0.0:{}", settings.port)).await?;
    info!(
        "Listening on 0.0.0.0:{} for domain {:?}",
        settings.port, settings.expected_domain
    );

    axum::serve(listener, app).await?;

    Ok(())
}
