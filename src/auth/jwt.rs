//! JWT codec for the session cookie pair.
//!
//! One [`JwtHandler`] owns the key material and validation rules for both
//! token kinds. Access and refresh tokens share the claim layout; refresh
//! tokens additionally carry a `jti` so they can be tracked server-side.

use std::collections::HashMap;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::config::{JwtAlgorithm, JwtConfig};

/// Claim names the issuer controls. Extra claims may not shadow them.
const RESERVED_CLAIMS: [&str; 7] = ["iss", "aud", "sub", "iat", "exp", "typ", "jti"];

/// Discriminates the two tokens of a session pair via the `typ` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Payload of both token kinds.
///
/// `iat` and `typ` are plain fields rather than options, so a token missing
/// either fails deserialization and verifies as invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Clone)]
pub struct JwtHandler {
    issuer: String,
    audience: String,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: std::time::Duration,
    refresh_ttl: std::time::Duration,
}

impl JwtHandler {
    /// Builds the codec from config. Fails only on unparseable RS256 PEMs.
    pub fn new(config: &JwtConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let algorithm = match config.algorithm {
            JwtAlgorithm::Hs256 => Algorithm::HS256,
            JwtAlgorithm::Rs256 => Algorithm::RS256,
        };
        let (encoding_key, decoding_key) = match config.algorithm {
            JwtAlgorithm::Hs256 => (
                EncodingKey::from_secret(config.secret.as_bytes()),
                DecodingKey::from_secret(config.secret.as_bytes()),
            ),
            JwtAlgorithm::Rs256 => {
                let encoding = EncodingKey::from_rsa_pem(config.secret.as_bytes())?;
                // Without a public key, verification falls back to the secret
                // and rejects every RS256 token at decode time.
                let decoding = match &config.public_key {
                    Some(pem) => DecodingKey::from_rsa_pem(pem.as_bytes())?,
                    None => DecodingKey::from_secret(config.secret.as_bytes()),
                };
                (encoding, decoding)
            }
        };
        // Issuer and audience registration also marks those claims required,
        // so the base required set has to be installed first.
        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.leeway = config.leeway_secs;
        Ok(Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            algorithm,
            encoding_key,
            decoding_key,
            validation,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        })
    }

    pub fn access_ttl(&self) -> std::time::Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> std::time::Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token(
        &self,
        sub: &str,
        extra_claims: Option<&HashMap<String, Value>>,
    ) -> Result<String, AuthError> {
        self.issue(sub, TokenType::Access, self.access_ttl, None, extra_claims)
    }

    /// Returns the encoded token together with its `jti` so callers can
    /// record the issued token without re-decoding it. A caller-supplied
    /// `jti` is honored as-is (rotation keeps the old id alive that way);
    /// otherwise a fresh random one is generated.
    pub fn issue_refresh_token(
        &self,
        sub: &str,
        jti: Option<String>,
        extra_claims: Option<&HashMap<String, Value>>,
    ) -> Result<(String, String), AuthError> {
        let jti = jti.unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let token = self.issue(
            sub,
            TokenType::Refresh,
            self.refresh_ttl,
            Some(jti.clone()),
            extra_claims,
        )?;
        Ok((token, jti))
    }

    fn issue(
        &self,
        sub: &str,
        typ: TokenType,
        ttl: std::time::Duration,
        jti: Option<String>,
        extra_claims: Option<&HashMap<String, Value>>,
    ) -> Result<String, AuthError> {
        let extra = match extra_claims {
            Some(map) => {
                if map.keys().any(|k| RESERVED_CLAIMS.contains(&k.as_str())) {
                    return Err(AuthError::InvalidExtraClaims);
                }
                map.clone()
            }
            None => HashMap::new(),
        };
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: sub.to_owned(),
            iat,
            exp: iat + ttl.as_secs() as i64,
            typ,
            jti,
            extra,
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|_| AuthError::EncodingFailed)
    }

    /// Decodes and validates a token, then checks its kind.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::TokenMissing);
        }
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        if data.claims.typ != expected {
            return Err(AuthError::TokenInvalid);
        }
        Ok(data.claims)
    }

    /// Verifies a token and pulls the user id out of `sub`.
    pub fn extract_user_id(&self, token: &str, expected: TokenType) -> Result<Uuid, AuthError> {
        let claims = self.verify(token, expected)?;
        if claims.sub.is_empty() {
            return Err(AuthError::TokenPayloadInvalid);
        }
        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::TokenPayloadInvalid)
    }
}
