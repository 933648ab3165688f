// HTTP transport: a small blocking client that every provider goes through.
// Providers only see the `Transport` trait so tests can swap in a recorder.

use crate::error::{Error, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One GET or POST against a provider endpoint.
pub trait Transport {
    /// GET `url` and parse the body as JSON. Sends `Authorization: Bearer`
    /// when a token is given.
    fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value>;

    /// POST `body` as JSON to `url`. The response body is discarded.
    fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<()>;
}

/// Blocking HTTP client used against the real providers.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(ApiClient { client })
    }

    fn auth_headers(token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(t) = token {
            let val = format!("Bearer {}", t);
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&val)?);
        }
        Ok(headers)
    }

    /// Turn a non-success status into an error carrying the response body.
    fn check(url: &str, res: Response) -> Result<Response> {
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(Error::Status {
                url: redact(url),
                status: status.as_u16(),
                body,
            });
        }
        Ok(res)
    }

    /// reqwest errors embed the full URL, credentials included.
    fn request_error(url: &str) -> impl FnOnce(reqwest::Error) -> Error + '_ {
        move |e| Error::Request {
            url: redact(url),
            source: e.without_url(),
        }
    }
}

impl Transport for ApiClient {
    fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value> {
        debug!("GET {}", redact(url));
        let res = self
            .client
            .get(url)
            .headers(Self::auth_headers(bearer)?)
            .send()
            .map_err(Self::request_error(url))?;
        let res = Self::check(url, res)?;
        res.json().map_err(Self::request_error(url))
    }

    fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<()> {
        debug!("POST {}", redact(url));
        let res = self
            .client
            .post(url)
            .headers(Self::auth_headers(Some(bearer))?)
            .json(body)
            .send()
            .map_err(Self::request_error(url))?;
        Self::check(url, res)?;
        Ok(())
    }
}

/// Form-style percent encoding: spaces become `+`, everything outside the
/// unreserved set is `%XX` escaped.
pub fn quote_plus(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

/// Mask credential-carrying query parameters before a URL is logged.
fn redact(url: &str) -> String {
    let Some((path, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((k @ ("key" | "auth_manager_token"), _)) => format!("{k}=***"),
            _ => pair.to_string(),
        })
        .collect();
    format!("{}?{}", path, params.join("&"))
}
