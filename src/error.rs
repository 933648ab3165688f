//! Library error type.
//!
//! Provider modules return [`Error`] through the crate [`Result`] alias.
//! The binary and the interactive menu wrap these in `anyhow` for context.

use serde_json::Value;
use std::path::PathBuf;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a provider call can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be sent or its body could not be read.
    /// `url` has credentials masked and `source` carries no URL.
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status
    #[error("This URL is invalid: {url} (HTTP {status}): {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// No master access token was configured
    #[error(
        "\n\n\n************************************\n\
         IMPORTANT: You Need an Access Token!\n\
         ************************************\n\
         Set api_tutor_token in {path} or export MUSIC_FINDER_TOKEN.\n\n"
    )]
    MissingToken { path: String },

    /// An expected key was absent from a provider response
    #[error("Response from {url} has no `{field}` field")]
    MissingField { url: String, field: &'static str },

    #[error(
        "\"{token}\" is not a valid category because it isn't in the yelp.get_categories() list. \
         Please make sure that the following categories are valid \
         (with a comma separating each of them): {categories}"
    )]
    InvalidCategory { token: String, categories: String },

    #[error("{0} not in ['best_match', 'rating', 'review_count', 'distance']")]
    InvalidSortBy(String),

    #[error(
        "The price parameter can be 1, 2, 3, 4, or some comma-separated combination \
         (e.g. 1,2,3). You used: {0}"
    )]
    InvalidPrice(String),

    #[error("Either artist_ids or track_ids or genres required")]
    NoSeeds,

    #[error(
        "You can only have 5 \"seed values\" in your recommendations query.\n\
         In other words, (len(artist_ids) + len(track_ids) + len(genres)) \
         must be less than or equal to 5."
    )]
    TooManySeeds,

    /// A response could not be reduced to its display fields. `response`
    /// is the whole unmodified payload for callers that fall back to it.
    #[error("The following {kind} data structure could not be simplified:\n{data}")]
    Simplify {
        kind: &'static str,
        data: Value,
        response: Value,
    },

    #[error("At least one recipient is required")]
    NoRecipients,

    #[error("Failed to read config file {}: {}", .0.display(), .1)]
    ConfigRead(PathBuf, std::io::Error),

    #[error("Failed to parse config file {}: {}", .0.display(), .1)]
    ConfigParse(PathBuf, toml::de::Error),
}

impl Error {
    /// Build a simplify error that echoes the offending JSON.
    pub fn simplify(kind: &'static str, data: &Value) -> Self {
        Self::Simplify {
            kind,
            data: data.clone(),
            response: data.clone(),
        }
    }

    /// Attach the full response a failed simplification came from.
    pub fn with_response(self, full: &Value) -> Self {
        match self {
            Self::Simplify { kind, data, .. } => Self::Simplify {
                kind,
                data,
                response: full.clone(),
            },
            other => other,
        }
    }

    /// The unmodified response behind a failed simplification.
    pub fn unmodified_response(&self) -> Option<&Value> {
        match self {
            Self::Simplify { response, .. } => Some(response),
            _ => None,
        }
    }
}
