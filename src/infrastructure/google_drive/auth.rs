//! Service-account OAuth for the Drive API
//!
//! A service-account JSON key signs an RS256 JWT that Google's token
//! endpoint exchanges for a short-lived bearer token. Share the target
//! Drive folders with the service account's email to grant access.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::application::errors::DriveError;
use crate::infrastructure::config::GoogleDriveConfig;

const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Service account credentials from the JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountCredentials {
    /// The service account email (used as issuer in the JWT)
    client_email: String,
    /// The private key in PEM format
    private_key: String,
    /// Where to exchange the JWT for an access token
    token_uri: String,
}

/// JWT claims for Google OAuth2.
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

struct CachedToken {
    token: String,
    expires_at: SystemTime,
}

/// Authenticator that mints and caches Drive access tokens.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    /// Build from the configured key source: inline JSON wins over the file.
    pub fn from_config(config: &GoogleDriveConfig) -> Result<Self, DriveError> {
        if let Some(json) = &config.service_account_json {
            return Self::from_json(json);
        }
        if let Some(path) = &config.service_account_key {
            let content = std::fs::read_to_string(path)
                .map_err(|e| DriveError::InvalidKey(format!("{}: {}", path.display(), e)))?;
            return Self::from_json(&content);
        }
        Err(DriveError::InvalidKey("no service account key configured".to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, DriveError> {
        let credentials: ServiceAccountCredentials =
            serde_json::from_str(json).map_err(|e| DriveError::InvalidKey(e.to_string()))?;
        Ok(Self {
            credentials,
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// A valid access token, refreshed when the cached one is near expiry.
    pub async fn access_token(&self) -> Result<String, DriveError> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > SystemTime::now() + Duration::from_secs(60) {
                    return Ok(token.token.clone());
                }
            }
        }

        let new_token = self.fetch_new_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(CachedToken {
                token: new_token.clone(),
                expires_at: SystemTime::now() + Duration::from_secs(55 * 60),
            });
        }

        Ok(new_token)
    }

    async fn fetch_new_token(&self) -> Result<String, DriveError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DriveError::Auth(e.to_string()))?
            .as_secs();

        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            scope: DRIVE_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| DriveError::InvalidKey(e.to_string()))?;
        let jwt = encode(&header, &claims, &key).map_err(|e| DriveError::Auth(e.to_string()))?;

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", &jwt),
            ])
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api { status, body });
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| DriveError::Parse(e.to_string()))?;
        Ok(token_response.access_token)
    }
}
