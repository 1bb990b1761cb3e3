use anyhow::Context;
use axum::http::HeaderValue;
use tokio::net::TcpListener;

use trap_backend::auth::{AuthService, JwtHandler};
use trap_backend::config::Settings;
use trap_backend::http::{app, AppState};
use trap_backend::store::{RefreshTokenStore, UserStore};
use trap_backend::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let settings = Settings::from_env()?;
    let jwt = JwtHandler::new(&settings.jwt).context("building the token codec failed")?;
    let auth = AuthService::new(jwt, UserStore::new(), RefreshTokenStore::new());

    let cors_origin: HeaderValue = settings
        .cors_allow_origin
        .parse()
        .context("CORS_ALLOW_ORIGIN is not a valid origin")?;
    let app = app(AppState { auth }, cors_origin);

    let addr = settings.server_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
