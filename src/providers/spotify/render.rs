//! Embeddable players and tracklist tables.

use super::simplify::Track;
use crate::render::{rule, CELL_CSS, TABLE_CSS};

const LINE_WIDTH: usize = 95;

pub fn track_player_html(track_id: &str) -> String {
    format!(
        r#"<iframe src="https://open.spotify.com/embed?uri=spotify:track:{track_id}&amp;theme=white" width="300" height="80" frameborder="0" allowtransparency="true" allow="encrypted-media" data-testid="audio-player"></iframe>"#
    )
}

/// Playlist player. Callers usually pass 400x280.
pub fn playlist_player_html(playlist_id: &str, width: u32, height: u32) -> String {
    format!(
        r#"<iframe src="https://open.spotify.com/embed/playlist/{playlist_id}" width="{width}" height="{height}" frameborder="0" allowtransparency="true" allow="encrypted-media"></iframe>"#
    )
}

/// Album player. Callers usually pass 300x380.
pub fn album_player_html(album_id: &str, width: u32, height: u32) -> String {
    format!(
        r#"<iframe src="https://open.spotify.com/embed/album/{album_id}" width="{width}" height="{height}" frameborder="0" allowtransparency="true" allow="encrypted-media"></iframe>"#
    )
}

fn artist_name(track: &Track) -> &str {
    track.artist.as_ref().map_or("", |a| a.name.as_str())
}

fn album_name(track: &Track) -> &str {
    track.album.as_ref().map_or("", |a| a.name.as_str())
}

/// Fixed-width text table of tracks for the terminal. Long names are cut.
pub fn tracklist_table(tracks: &[Track]) -> String {
    let mut text = rule(LINE_WIDTH);
    text += &format!(
        "{:2} | {:<22.22} | {:<30.30} | {:<30.30}\n",
        "", "Name", "Artist", "Album"
    );
    text += &rule(LINE_WIDTH);
    for (i, track) in tracks.iter().enumerate() {
        text += &format!(
            "{:2} | {:<22.22} | {:<30.30} | {:<30.30}\n",
            i + 1,
            track.name,
            artist_name(track),
            album_name(track)
        );
    }
    text += &rule(LINE_WIDTH);
    text
}

/// HTML table of tracks, suitable for an email body. `None` when empty.
pub fn tracklist_table_html(tracks: &[Track]) -> Option<String> {
    if tracks.is_empty() {
        return None;
    }
    let rows: String = tracks
        .iter()
        .map(|track| {
            let image_url = track.album.as_ref().map_or("", |a| a.image_url_small.as_str());
            format!(
                r#"
        <tr>
            <td {css}>{name}</td>
            <td {css}><img src="{image_url}" /></td>
            <td {css}>{artist}</td>
            <td {css}>{album}</td>
            <td {css}><a href="{share_url}">Listen on Spotify</a></td>
        </tr>"#,
                css = CELL_CSS,
                name = track.name,
                artist = artist_name(track),
                album = album_name(track),
                share_url = track.share_url,
            )
        })
        .collect();

    Some(format!(
        r#"
    <table {table_css}>
        <tr>
            <th {css}>Name</th>
            <th {css}>Image</th>
            <th {css}>Artist</th>
            <th {css}>Album</th>
            <th {css}>More</th>
        </tr>{rows}
    </table>
"#,
        table_css = TABLE_CSS,
        css = CELL_CSS,
    ))
}
