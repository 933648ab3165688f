//! Spotify catalog: search, top tracks, related artists, playlists and
//! recommendations.

mod dto;
pub mod render;
pub mod simplify;

pub use render::{
    album_player_html, playlist_player_html, track_player_html, tracklist_table,
    tracklist_table_html,
};
pub use simplify::{
    simplify_artists, simplify_playlists, simplify_tracks, Album, Artist, ArtistRef, Playlist,
    Track,
};

use serde_json::Value;

use crate::api::{quote_plus, Transport};
use crate::auth::{Gateway, Provider};
use crate::error::{Error, Result};
use crate::providers::string_list;

pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Genres that are always valid recommendation seeds.
pub const GENRES_ABRIDGED: [&str; 25] = [
    "alternative", "ambient", "blues", "chill", "country", "dance", "electronic", "folk",
    "funk", "happy", "hip-hop", "indie-pop", "jazz", "k-pop", "metal", "new-release", "pop",
    "punk", "reggae", "rock", "soul", "study", "trance", "work-out", "world-music",
];

/// Seed values for a recommendation query. At most [`Seeds::MAX`] in total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seeds {
    pub artist_ids: Vec<String>,
    pub track_ids: Vec<String>,
    pub genres: Vec<String>,
}

impl Seeds {
    pub const MAX: usize = 5;

    pub fn len(&self) -> usize {
        self.artist_ids.len() + self.track_ids.len() + self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Query string for `/recommendations`: artists, then tracks, then genres.
    pub fn query(&self) -> Result<String> {
        if self.is_empty() {
            return Err(Error::NoSeeds);
        }
        if self.len() > Self::MAX {
            return Err(Error::TooManySeeds);
        }
        let params: Vec<String> = [
            ("seed_artists", &self.artist_ids),
            ("seed_tracks", &self.track_ids),
            ("seed_genres", &self.genres),
        ]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| format!("{}={}", name, values.join(",")))
        .collect();
        Ok(params.join("&"))
    }
}

pub fn genres_abridged() -> Vec<String> {
    GENRES_ABRIDGED.iter().map(|g| g.to_string()).collect()
}

/// Spotify Web API client.
pub struct Spotify<'a, T> {
    gateway: &'a Gateway<T>,
    base_url: String,
}

impl<'a, T: Transport> Spotify<'a, T> {
    pub fn new(gateway: &'a Gateway<T>) -> Self {
        Self::with_base_url(gateway, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(gateway: &'a Gateway<T>, base_url: impl Into<String>) -> Self {
        Spotify {
            gateway,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> Result<Value> {
        self.gateway.get(Provider::Spotify, &self.url(path))
    }

    /// Every genre Spotify accepts as a recommendation seed.
    pub fn genres(&self) -> Result<Vec<String>> {
        let path = "/recommendations/available-genre-seeds";
        let data = self.get(path)?;
        string_list(&data, &self.url(path), "genres")
    }

    pub fn search_tracks_raw(&self, search_term: &str) -> Result<Value> {
        self.get(&format!("/search?q={}&type=track", quote_plus(search_term)))
    }

    pub fn search_tracks(&self, search_term: &str) -> Result<Vec<Track>> {
        let data = self.search_tracks_raw(search_term)?;
        simplify_tracks(&data["tracks"]["items"]).map_err(|e| e.with_response(&data))
    }

    pub fn top_tracks_by_artist_raw(&self, artist_id: &str) -> Result<Value> {
        self.get(&format!("/artists/{artist_id}/top-tracks?country=us"))
    }

    pub fn top_tracks_by_artist(&self, artist_id: &str) -> Result<Vec<Track>> {
        let data = self.top_tracks_by_artist_raw(artist_id)?;
        simplify_tracks(&data["tracks"]).map_err(|e| e.with_response(&data))
    }

    pub fn tracks_by_playlist_raw(&self, playlist_id: &str) -> Result<Value> {
        self.get(&format!("/playlists/{playlist_id}/tracks"))
    }

    pub fn tracks_by_playlist(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let data = self.tracks_by_playlist_raw(playlist_id)?;
        let items = data["items"]
            .as_array()
            .ok_or_else(|| Error::simplify("playlist track", &data))?;
        let tracks: Vec<Value> = items.iter().map(|item| item["track"].clone()).collect();
        simplify_tracks(&Value::Array(tracks)).map_err(|e| e.with_response(&data))
    }

    pub fn related_artists_raw(&self, artist_id: &str) -> Result<Value> {
        self.get(&format!("/artists/{artist_id}/related-artists"))
    }

    pub fn related_artists(&self, artist_id: &str) -> Result<Vec<Artist>> {
        let data = self.related_artists_raw(artist_id)?;
        simplify_artists(&data["artists"]).map_err(|e| e.with_response(&data))
    }

    pub fn search_artists_raw(&self, search_term: &str) -> Result<Value> {
        self.get(&format!("/search?q={}&type=artist", quote_plus(search_term)))
    }

    pub fn search_artists(&self, search_term: &str) -> Result<Vec<Artist>> {
        let data = self.search_artists_raw(search_term)?;
        simplify_artists(&data["artists"]["items"]).map_err(|e| e.with_response(&data))
    }

    pub fn search_playlists_raw(&self, search_term: &str) -> Result<Value> {
        self.get(&format!("/search?q={}&type=playlist", quote_plus(search_term)))
    }

    pub fn search_playlists(&self, search_term: &str) -> Result<Vec<Playlist>> {
        let data = self.search_playlists_raw(search_term)?;
        simplify_playlists(&data["playlists"]["items"]).map_err(|e| e.with_response(&data))
    }

    pub fn playlists_by_user_raw(&self, user_id: &str) -> Result<Value> {
        self.get(&format!("/users/{user_id}/playlists"))
    }

    pub fn playlists_by_user(&self, user_id: &str) -> Result<Vec<Playlist>> {
        let data = self.playlists_by_user_raw(user_id)?;
        simplify_playlists(&data["items"]).map_err(|e| e.with_response(&data))
    }

    /// Spotify's audio analysis of a track, unmodified.
    pub fn audio_features(&self, track_id: &str) -> Result<Value> {
        self.get(&format!("/audio-features/{track_id}"))
    }

    /// Fails before any request when the seeds are empty or too many.
    pub fn similar_tracks_raw(&self, seeds: &Seeds) -> Result<Value> {
        let query = seeds.query()?;
        self.get(&format!("/recommendations?{query}"))
    }

    pub fn similar_tracks(&self, seeds: &Seeds) -> Result<Vec<Track>> {
        let data = self.similar_tracks_raw(seeds)?;
        simplify_tracks(&data["tracks"]).map_err(|e| e.with_response(&data))
    }
}
