//! Test fixtures shared by the provider tests.
//!
//! [`FakeTransport`] answers requests from canned JSON and records every
//! call, so a test can assert on the exact URL a provider built.
//!
//! ```ignore
//! let transport = FakeTransport::new().route("/search", json!({"tracks": {"items": []}}));
//! let gw = test_gateway(transport);
//! Spotify::new(&gw).search_tracks("beyonce")?;
//! assert_eq!(gw.transport().last_url(), "https://api.spotify.com/v1/search?q=beyonce&type=track");
//! ```

use std::cell::RefCell;

use serde_json::{json, Value};

use crate::api::Transport;
use crate::auth::Gateway;
use crate::error::{Error, Result};

/// One request seen by [`FakeTransport`].
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl Call {
    fn is_token_request(&self) -> bool {
        self.url.contains("/key?auth_manager_token=")
    }
}

/// Recording transport with routes matched by URL substring.
#[derive(Default)]
pub struct FakeTransport {
    routes: Vec<(String, Value)>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    /// Token requests are answered with `token-<provider>` unless a route
    /// overrides them.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any URL containing `pattern` with `body`. First match wins.
    pub fn route(mut self, pattern: &str, body: Value) -> Self {
        self.routes.push((pattern.to_string(), body));
        self
    }

    /// Every call except token fetches.
    pub fn api_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !c.is_token_request())
            .cloned()
            .collect()
    }

    /// URL of the most recent non-token call.
    pub fn last_url(&self) -> String {
        self.api_calls()
            .last()
            .map(|c| c.url.clone())
            .unwrap_or_default()
    }

    fn respond(&self, call: Call) -> Result<Value> {
        let url = call.url.clone();
        let token_request = call.is_token_request();
        self.calls.borrow_mut().push(call);

        if let Some((_, body)) = self.routes.iter().find(|(p, _)| url.contains(p.as_str())) {
            return Ok(body.clone());
        }
        if token_request {
            let provider = url
                .split("/key?")
                .next()
                .and_then(|head| head.rsplit('/').next())
                .unwrap_or_default();
            return Ok(json!({ "token": format!("token-{provider}") }));
        }
        Err(Error::Status {
            url,
            status: 404,
            body: "no route".into(),
        })
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value> {
        self.respond(Call {
            method: "GET",
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body: None,
        })
    }

    fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<()> {
        self.respond(Call {
            method: "POST",
            url: url.to_string(),
            bearer: Some(bearer.to_string()),
            body: Some(body.clone()),
        })
        .map(|_| ())
    }
}

/// Gateway over `transport` with a dummy master token.
pub fn test_gateway(transport: FakeTransport) -> Gateway<FakeTransport> {
    Gateway::new(
        transport,
        Some("API.test".into()),
        "https://tokens.test",
        "config.toml",
    )
    .expect("test gateway")
}
