//! YouTube video search.
//!
//! The YouTube token is an API key sent as the `key` query parameter rather
//! than a bearer header.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{quote_plus, Transport};
use crate::auth::{Gateway, Provider};
use crate::error::Result;
use crate::providers::simplify_list;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub thumb_url: String,
    pub title: String,
    pub url: String,
    pub embed_url: String,
    pub share_url: String,
}

mod dto {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchItem {
        pub id: VideoRef,
        pub snippet: Snippet,
    }

    #[derive(Debug, Deserialize)]
    pub struct VideoRef {
        #[serde(rename = "videoId")]
        pub video_id: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Snippet {
        pub title: String,
        pub thumbnails: Thumbnails,
    }

    #[derive(Debug, Deserialize)]
    pub struct Thumbnails {
        pub high: Thumbnail,
    }

    #[derive(Debug, Deserialize)]
    pub struct Thumbnail {
        pub url: String,
    }
}

pub fn simplify_videos(items: &Value) -> Result<Vec<Video>> {
    simplify_list("video", items, |item: dto::SearchItem| {
        let id = item.id.video_id;
        Video {
            thumb_url: item.snippet.thumbnails.high.url,
            title: item.snippet.title,
            url: format!("https://www.youtube.com/watch?v={id}"),
            embed_url: format!("https://www.youtube.com/embed/{id}"),
            share_url: format!("https://www.youtube.com/{id}"),
            video_id: id,
        }
    })
}

pub fn video_player_html(embed_url: &str, width: u32, height: u32) -> String {
    format!(
        r#"<iframe width="{width}" height="{height}" src="{embed_url}" frameborder="0" allow="accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>"#
    )
}

pub struct YouTube<'a, T> {
    gateway: &'a Gateway<T>,
    base_url: String,
}

impl<'a, T: Transport> YouTube<'a, T> {
    pub fn new(gateway: &'a Gateway<T>) -> Self {
        Self::with_base_url(gateway, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(gateway: &'a Gateway<T>, base_url: impl Into<String>) -> Self {
        YouTube {
            gateway,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn search_videos_raw(&self, search_term: &str) -> Result<Value> {
        let key = self.gateway.token(Provider::YouTube)?;
        let url = format!(
            "{}/search?part=snippet&q={}&type=video&key={}",
            self.base_url,
            quote_plus(search_term),
            quote_plus(&key)
        );
        self.gateway.transport().get_json(&url, None)
    }

    pub fn search_videos(&self, search_term: &str) -> Result<Vec<Video>> {
        let data = self.search_videos_raw(search_term)?;
        simplify_videos(&data["items"]).map_err(|e| e.with_response(&data))
    }
}
