// @zen-component: SCHED-CalendlyClient
//
//! Scheduling provider (Calendly) client.
//!
//! Exchanges OAuth2 client credentials for a bearer token once at process
//! start and lists bookable event types with it. The token is written before
//! the server accepts traffic and only read afterwards, so no lock guards it.
//! It is never refreshed and goes stale with the provider's TTL; when no
//! token is cached the booking branch degrades to a static link.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};
use url::Url;

/// Default OAuth token endpoint base.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://auth.calendly.com";

/// Default REST API base.
pub const DEFAULT_API_BASE_URL: &str = "https://api.calendly.com";

/// Errors from the scheduling client.
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Invalid scheduling base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("Scheduling request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Scheduling API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No scheduling access token cached")]
    NoToken,
}

/// Settings for the scheduling client.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// OAuth base URL (overridable so tests can point at a local stub).
    pub auth_base_url: String,
    /// REST API base URL.
    pub api_base_url: String,
    /// OAuth client id; booking degrades to the static link when unset.
    pub client_id: Option<String>,
    /// OAuth client secret.
    pub client_secret: Option<String>,
}

impl SchedulingConfig {
    /// Reads settings from environment variables with the documented defaults.
    ///
    /// | Variable | Default |
    /// |--------------------------|-----------------------------|
    /// | `CALENDLY_AUTH_BASE_URL` | `https://auth.calendly.com` |
    /// | `CALENDLY_API_BASE_URL`  | `https://api.calendly.com`  |
    /// | `CALENDLY_CLIENT_ID`     | unset                       |
    /// | `CALENDLY_CLIENT_SECRET` | unset                       |
    pub fn from_env() -> Self {
        Self {
            auth_base_url: std::env::var("CALENDLY_AUTH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_BASE_URL.into()),
            api_base_url: std::env::var("CALENDLY_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            client_id: std::env::var("CALENDLY_CLIENT_ID").ok(),
            client_secret: std::env::var("CALENDLY_CLIENT_SECRET").ok(),
        }
    }
}

/// Response from the provider's OAuth token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// One bookable event type.
#[derive(Debug, Clone, Deserialize)]
pub struct EventType {
    pub name: String,
    pub scheduling_url: String,
}

#[derive(Debug, Deserialize)]
struct EventTypesResponse {
    collection: Vec<EventType>,
}

/// Client for the scheduling provider.
#[derive(Debug, Clone)]
pub struct SchedulingClient {
    http: Client,
    event_types_url: Url,
    token: Option<String>,
}

impl SchedulingClient {
    /// Build a client and perform the one-time client-credentials exchange.
    ///
    /// Runs before the listener binds. A failed exchange is logged and leaves
    /// the cache empty; the caller still gets a usable client whose booking
    /// path reports [`SchedulingError::NoToken`]. Only unparseable base URLs
    /// abort startup.
    pub async fn connect(config: &SchedulingConfig) -> Result<Self, SchedulingError> {
        let http = Client::new();
        let token_url = Url::parse(&config.auth_base_url)?.join("oauth/token")?;
        let event_types_url = Url::parse(&config.api_base_url)?.join("event_types")?;

        let token = match (&config.client_id, &config.client_secret) {
            (Some(id), Some(secret)) => {
                match fetch_access_token(&http, token_url, id, secret).await {
                    Ok(token) => {
                        info!("scheduling access token acquired");
                        Some(token)
                    }
                    Err(e) => {
                        error!("scheduling token exchange failed, booking degrades to the static link: {e}");
                        None
                    }
                }
            }
            _ => {
                info!("scheduling credentials not configured, booking uses the static link");
                None
            }
        };

        Ok(Self {
            http,
            event_types_url,
            token,
        })
    }

    /// Explicit read accessor for the cached bearer token.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// List bookable event types with the cached token.
    pub async fn list_event_types(&self) -> Result<Vec<EventType>, SchedulingError> {
        let token = self.bearer_token().ok_or(SchedulingError::NoToken)?;

        let resp = self
            .http
            .get(self.event_types_url.clone())
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SchedulingError::Api { status, body });
        }

        let data: EventTypesResponse = resp.json().await?;
        Ok(data.collection)
    }
}

/// Exchange client credentials for an access token.
async fn fetch_access_token(
    http: &Client,
    token_url: Url,
    client_id: &str,
    client_secret: &str,
) -> Result<String, SchedulingError> {
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let resp = http.post(token_url).form(&params).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(SchedulingError::Api { status, body });
    }

    let data: TokenResponse = resp.json().await?;
    Ok(data.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_config(base_url: String, with_credentials: bool) -> SchedulingConfig {
        SchedulingConfig {
            auth_base_url: base_url.clone(),
            api_base_url: base_url,
            client_id: with_credentials.then(|| "client-id".into()),
            client_secret: with_credentials.then(|| "client-secret".into()),
        }
    }

    // @zen-test: SCHED-1 — startup exchange caches the returned token
    #[tokio::test]
    async fn connect_caches_token_on_successful_exchange() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("grant_type=client_credentials")
                .body_contains("client_id=client-id");
            then.status(200).json_body(serde_json::json!({
                "access_token": "sched-token",
                "token_type": "Bearer",
                "expires_in": 7200
            }));
        });

        let client = SchedulingClient::connect(&test_config(server.base_url(), true))
            .await
            .unwrap();

        assert_eq!(client.bearer_token(), Some("sched-token"));
        mock.assert();
    }

    // @zen-test: SCHED-1 — a failed exchange leaves the cache empty but
    // still yields a client
    #[tokio::test]
    async fn connect_survives_failed_exchange_with_empty_cache() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(401).body("bad credentials");
        });

        let client = SchedulingClient::connect(&test_config(server.base_url(), true))
            .await
            .unwrap();

        assert_eq!(client.bearer_token(), None);
    }

    // @zen-test: SCHED-1 — missing credentials skip the exchange entirely
    #[tokio::test]
    async fn connect_without_credentials_makes_no_exchange() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200);
        });

        let client = SchedulingClient::connect(&test_config(server.base_url(), false))
            .await
            .unwrap();

        assert_eq!(client.bearer_token(), None);
        mock.assert_hits(0);
    }

    // @zen-test: SCHED-2 — event types are listed with the cached bearer token
    #[tokio::test]
    async fn list_event_types_parses_collection() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200)
                .json_body(serde_json::json!({"access_token": "sched-token"}));
        });
        let events_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/event_types")
                .header("authorization", "Bearer sched-token");
            then.status(200).json_body(serde_json::json!({
                "collection": [
                    {"name": "Discovery Call", "scheduling_url": "https://calendly.com/acme/discovery"},
                    {"name": "Strategy Session", "scheduling_url": "https://calendly.com/acme/strategy"}
                ]
            }));
        });

        let client = SchedulingClient::connect(&test_config(server.base_url(), true))
            .await
            .unwrap();
        let event_types = client.list_event_types().await.unwrap();

        assert_eq!(event_types.len(), 2);
        assert_eq!(event_types[0].name, "Discovery Call");
        assert_eq!(
            event_types[1].scheduling_url,
            "https://calendly.com/acme/strategy"
        );
        events_mock.assert();
    }

    // @zen-test: SCHED-2 — listing without a cached token never goes upstream
    #[tokio::test]
    async fn list_event_types_without_token_is_an_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/event_types");
            then.status(200);
        });

        let client = SchedulingClient::connect(&test_config(server.base_url(), false))
            .await
            .unwrap();
        let err = client.list_event_types().await.unwrap_err();

        assert!(matches!(err, SchedulingError::NoToken));
        mock.assert_hits(0);
    }

    // @zen-test: SCHED-2 — upstream non-2xx maps to Api with status
    #[tokio::test]
    async fn list_event_types_surfaces_non_2xx() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200)
                .json_body(serde_json::json!({"access_token": "sched-token"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/event_types");
            then.status(500).body("provider down");
        });

        let client = SchedulingClient::connect(&test_config(server.base_url(), true))
            .await
            .unwrap();
        let err = client.list_event_types().await.unwrap_err();

        match err {
            SchedulingError::Api { status, .. } => assert_eq!(status.as_u16(), 500),
            other => panic!("expected Api error, got: {other}"),
        }
    }
}
