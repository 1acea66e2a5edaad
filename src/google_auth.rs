use std::sync::Arc;
use tracing::{debug, info};

/// OAuth scope covering Vertex AI and Cloud Storage
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no Google credentials found: {0}")]
    Credentials(#[source] gcp_auth::Error),
    #[error("token request failed: {0}")]
    Token(#[source] gcp_auth::Error),
}

enum TokenSource {
    Static(String),
    /// Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
    /// gcloud user credentials, then the GCE metadata server
    Provider(Arc<dyn gcp_auth::TokenProvider>),
}

/// Bearer tokens for Google Cloud APIs (Vertex AI, Cloud Storage)
pub struct GoogleAuth {
    source: TokenSource,
}

impl GoogleAuth {
    /// Always hand out the given token
    pub fn with_static_token(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Static(token.into()),
        }
    }

    /// Discover Application Default Credentials. The provider caches and
    /// refreshes tokens itself.
    pub async fn application_default() -> Result<Self, AuthError> {
        let provider = gcp_auth::provider().await.map_err(AuthError::Credentials)?;
        info!("Using Google application default credentials");
        Ok(Self::from_provider(provider))
    }

    pub fn from_provider(provider: Arc<dyn gcp_auth::TokenProvider>) -> Self {
        Self {
            source: TokenSource::Provider(provider),
        }
    }

    /// Pick the static token when one is configured, otherwise ADC
    pub async fn from_config(token: Option<&str>) -> Result<Self, AuthError> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => {
                info!("Using static Google access token from GOOGLE_ACCESS_TOKEN");
                Ok(Self::with_static_token(token))
            }
            None => Self::application_default().await,
        }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        match &self.source {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Provider(provider) => {
                let token = provider
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(AuthError::Token)?;
                debug!("Obtained access token from application default credentials");
                Ok(token.as_str().to_string())
            }
        }
    }
}

impl std::fmt::Debug for GoogleAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self.source {
            TokenSource::Static(_) => "static",
            TokenSource::Provider(_) => "application-default",
        };
        f.debug_struct("GoogleAuth").field("source", &source).finish()
    }
}
