//! Provider tokens.
//!
//! Every provider key is issued by one token endpoint in exchange for the
//! master access token. A fresh token is fetched for each provider call.

use serde_json::Value;

use crate::api::{quote_plus, Transport};
use crate::error::{Error, Result};

pub const DEFAULT_TOKEN_BASE_URL: &str = "https://www.apitutor.org";

/// The third-party APIs a token can be issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Spotify,
    Yelp,
    SendGrid,
    YouTube,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Spotify => "spotify",
            Provider::Yelp => "yelp",
            Provider::SendGrid => "sendgrid",
            Provider::YouTube => "youtube",
        }
    }
}

/// Transport plus the credentials needed to reach any provider.
pub struct Gateway<T> {
    transport: T,
    master_token: String,
    token_base_url: String,
}

impl<T: Transport> Gateway<T> {
    /// `config_hint` is shown to the user when no master token is available.
    pub fn new(
        transport: T,
        master_token: Option<String>,
        token_base_url: impl Into<String>,
        config_hint: &str,
    ) -> Result<Self> {
        let master_token = master_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::MissingToken {
                path: config_hint.to_string(),
            })?;
        Ok(Gateway {
            transport,
            master_token,
            token_base_url: token_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL of the key endpoint for `provider`.
    pub fn token_url(&self, provider: Provider) -> String {
        format!(
            "{}/{}/key?auth_manager_token={}",
            self.token_base_url,
            provider.as_str(),
            quote_plus(&self.master_token)
        )
    }

    /// Fetch the provider's bearer token.
    pub fn token(&self, provider: Provider) -> Result<String> {
        let url = self.token_url(provider);
        let data = self.transport.get_json(&url, None)?;
        match data.get("token").and_then(Value::as_str) {
            Some(token) => Ok(token.to_string()),
            None => Err(Error::MissingField {
                url: format!("{}/{}/key", self.token_base_url, provider.as_str()),
                field: "token",
            }),
        }
    }

    /// GET `url` authorized with a fresh `provider` token.
    pub fn get(&self, provider: Provider, url: &str) -> Result<Value> {
        let token = self.token(provider)?;
        self.transport.get_json(url, Some(&token))
    }

    /// POST `body` to `url` authorized with a fresh `provider` token.
    pub fn post(&self, provider: Provider, url: &str, body: &Value) -> Result<()> {
        let token = self.token(provider)?;
        self.transport.post_json(url, &token, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;
    use serde_json::json;

    fn gateway(transport: FakeTransport) -> Gateway<FakeTransport> {
        Gateway::new(
            transport,
            Some("API.master".into()),
            "https://tokens.test/",
            "config.toml",
        )
        .unwrap()
    }

    #[test]
    fn test_token_url() {
        let gw = gateway(FakeTransport::new());
        assert_eq!(
            gw.token_url(Provider::Spotify),
            "https://tokens.test/spotify/key?auth_manager_token=API.master"
        );
        assert_eq!(
            gw.token_url(Provider::SendGrid),
            "https://tokens.test/sendgrid/key?auth_manager_token=API.master"
        );
    }

    #[test]
    fn test_token_is_read_from_response() {
        let gw = gateway(FakeTransport::new());
        assert_eq!(gw.token(Provider::Yelp).unwrap(), "token-yelp");
    }

    #[test]
    fn test_token_missing_field() {
        let transport = FakeTransport::new().route("/youtube/key", json!({"error": "nope"}));
        let gw = gateway(transport);
        let err = gw.token(Provider::YouTube).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "token", .. }));
        // the master token must not leak into the message
        assert!(!err.to_string().contains("API.master"));
    }

    #[test]
    fn test_get_sends_provider_bearer() {
        let transport = FakeTransport::new().route("/v1/thing", json!({"ok": true}));
        let gw = gateway(transport);
        let data = gw.get(Provider::Spotify, "https://api.test/v1/thing").unwrap();
        assert_eq!(data["ok"], true);
        let calls = gw.transport().api_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].bearer.as_deref(), Some("token-spotify"));
    }

    #[test]
    fn test_missing_master_token() {
        let err = Gateway::new(FakeTransport::new(), None, DEFAULT_TOKEN_BASE_URL, "cfg")
            .err()
            .unwrap();
        assert!(matches!(err, Error::MissingToken { .. }));

        let blank = Gateway::new(
            FakeTransport::new(),
            Some("  ".into()),
            DEFAULT_TOKEN_BASE_URL,
            "cfg",
        );
        assert!(blank.is_err());
    }
}
