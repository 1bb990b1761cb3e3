//! Configuration (ports, CORS, JWT key material) loaded from env vars.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use rand::RngCore;

/// Signing algorithms the token layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JwtAlgorithm {
    Hs256,
    Rs256,
}

/// Immutable JWT settings, shared read-only across all requests.
///
/// `secret` doubles as the HS256 shared secret or the RS256 private key PEM.
/// For RS256 verification the `public_key` PEM is used when present,
/// otherwise verification falls back to `secret`.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub algorithm: JwtAlgorithm,
    pub secret: String,
    pub public_key: Option<String>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub leeway_secs: u64,
}

/// Process-wide settings, built once in `main` and passed down by handle.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub cors_allow_origin: String,
    pub jwt: JwtConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let cors_allow_origin = env::var("CORS_ALLOW_ORIGIN")
            .ok()
            .unwrap_or_else(|| "http://localhost:5173".to_string());
        Ok(Self { port, cors_allow_origin, jwt: JwtConfig::from_env()? })
    }

    /// Socket address to bind the server to. `PORT` env var, 0.0.0.0.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl JwtConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let issuer = env::var("JWT_ISSUER")
            .ok()
            .unwrap_or_else(|| "trap-mafia".to_string());
        let audience = env::var("JWT_AUDIENCE")
            .ok()
            .unwrap_or_else(|| "trap-mafia".to_string());
        let algorithm = match env::var("JWT_ALGORITHM").ok().as_deref() {
            None | Some("HS256") => JwtAlgorithm::Hs256,
            Some("RS256") => JwtAlgorithm::Rs256,
            Some(other) => anyhow::bail!("unsupported JWT_ALGORITHM: {other}"),
        };
        let secret = match env::var("JWT_SECRET").ok() {
            Some(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("JWT_SECRET not set; using an ephemeral signing secret");
                ephemeral_secret()
            }
        };
        let public_key = env::var("JWT_PUBLIC_KEY").ok().filter(|s| !s.is_empty());
        let access_minutes = env::var("JWT_ACCESS_EXPIRES_MINUTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15);
        let refresh_days = env::var("JWT_REFRESH_EXPIRES_DAYS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);
        let leeway_secs = env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        Ok(Self {
            issuer,
            audience,
            algorithm,
            secret,
            public_key,
            access_ttl: Duration::from_secs(access_minutes * 60),
            refresh_ttl: Duration::from_secs(refresh_days * 24 * 60 * 60),
            leeway_secs,
        })
    }
}

/// Random secret for secret-less dev runs. Sessions do not survive a restart.
fn ephemeral_secret() -> String {
    let mut bytes = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
