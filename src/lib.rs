// Library root
// -----------
// Thin clients for a handful of third-party REST APIs (Spotify, Yelp,
// YouTube, SendGrid) plus the terminal front-end built on top of them.
//
// Module responsibilities:
// - `api`: blocking HTTP transport and URL helpers.
// - `auth`: exchanges the master access token for per-provider keys.
// - `providers`: one module per API, each with simplify and render helpers.
// - `render`: HTML and text fragments shared by the providers.
// - `config`: TOML configuration.
// - `cli` / `ui`: argument parsing and the interactive menu.
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod providers;
pub mod render;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, Result};
