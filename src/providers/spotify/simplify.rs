//! Reduce Spotify objects to their display fields.
//!
//! The DTOs in `dto.rs` are only ever turned into the records here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dto;
use crate::error::Result;
use crate::providers::simplify_list;

const OPEN_URL: &str = "https://open.spotify.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub preview_url: Option<String>,
    pub share_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<Album>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub image_url_small: String,
    pub share_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
    pub share_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// Comma separated genre names
    pub genres: String,
    pub share_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url_small: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner_display_name: Option<String>,
    pub owner_id: String,
    pub share_url: String,
}

pub fn share_url(kind: &str, id: &str) -> String {
    format!("{OPEN_URL}/{kind}/{id}")
}

pub fn simplify_tracks(tracks: &Value) -> Result<Vec<Track>> {
    simplify_list("track", tracks, to_track)
}

pub fn simplify_artists(artists: &Value) -> Result<Vec<Artist>> {
    simplify_list("artist", artists, to_artist)
}

pub fn simplify_playlists(playlists: &Value) -> Result<Vec<Playlist>> {
    simplify_list("playlist", playlists, to_playlist)
}

fn to_track(item: dto::Track) -> Track {
    let album = item.album.as_ref().and_then(to_album);
    // the credited artist is the album's first artist
    let artist = item
        .album
        .as_ref()
        .and_then(|a| a.get("artists"))
        .and_then(|a| a.get(0))
        .and_then(|a| serde_json::from_value::<dto::ArtistRef>(a.clone()).ok())
        .map(|a| ArtistRef {
            share_url: share_url("artist", &a.id),
            id: a.id,
            name: a.name,
        });

    Track {
        share_url: share_url("track", &item.id),
        id: item.id,
        name: item.name,
        preview_url: item.preview_url,
        album,
        artist,
    }
}

fn to_album(value: &Value) -> Option<Album> {
    let album: dto::Album = serde_json::from_value(value.clone()).ok()?;
    let large = album.images.first()?.url.clone();
    let small = album.images.last()?.url.clone();
    Some(Album {
        share_url: share_url("album", &album.id),
        id: album.id,
        name: album.name,
        image_url: large,
        image_url_small: small,
    })
}

fn to_artist(item: dto::Artist) -> Artist {
    Artist {
        share_url: share_url("artist", &item.id),
        genres: item.genres.join(", "),
        image_url: item.images.first().map(|i| i.url.clone()),
        image_url_small: item.images.last().map(|i| i.url.clone()),
        id: item.id,
        name: item.name,
    }
}

fn to_playlist(item: dto::Playlist) -> Playlist {
    Playlist {
        share_url: share_url("playlist", &item.id),
        id: item.id,
        name: item.name,
        owner_display_name: item.owner.display_name,
        owner_id: item.owner.id,
    }
}
