// UI layer: an interactive menu built on `dialoguer`.
// The user collects favourite genres and artists, then asks Spotify for
// recommendations and can email the result through SendGrid.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::api::Transport;
use crate::auth::Gateway;
use crate::config::EmailConfig;
use crate::providers::sendgrid::{Mail, SendGrid};
use crate::providers::spotify::{
    genres_abridged, tracklist_table, tracklist_table_html, Artist, Seeds, Spotify,
};

/// Most genres or artists taken from a single pick.
const MAX_PICKS: usize = 3;
const MAIL_SUBJECT: &str = "Spotify recommendation list";

/// Genres and artists chosen so far. Both lists grow across menu visits
/// until the user clears them.
#[derive(Debug, Default)]
pub struct Selections {
    pub genres: Vec<String>,
    pub artists: Vec<Artist>,
}

impl Selections {
    pub fn add_genres(&mut self, genres: impl IntoIterator<Item = String>) {
        for genre in genres {
            if !self.genres.contains(&genre) {
                self.genres.push(genre);
            }
        }
    }

    pub fn add_artists(&mut self, artists: impl IntoIterator<Item = Artist>) {
        for artist in artists {
            if !self.artists.iter().any(|a| a.id == artist.id) {
                self.artists.push(artist);
            }
        }
    }

    /// Recommendation seeds from everything selected.
    pub fn seeds(&self) -> Seeds {
        Seeds {
            artist_ids: self.artists.iter().map(|a| a.id.clone()).collect(),
            track_ids: Vec::new(),
            genres: self.genres.clone(),
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn heading(text: &str) {
    println!();
    println!("{}", text.bold().cyan());
}

fn artist_label(artist: &Artist) -> String {
    if artist.genres.is_empty() {
        artist.name.clone()
    } else {
        format!("{} ({})", artist.name, artist.genres)
    }
}

/// Main interactive menu. Runs until the user picks "Quit".
pub fn main_menu<T: Transport>(gateway: &Gateway<T>, email: &EmailConfig) -> Result<()> {
    let spotify = Spotify::new(gateway);
    let sendgrid = SendGrid::new(gateway);
    let mut selections = Selections::default();

    loop {
        heading("Settings / Browse Options");
        let items = [
            "Select your favorite genres",
            "Select your favorite artists",
            "Discover new music",
            "Quit",
        ];
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => handle_genres(&mut selections)?,
            1 => handle_artists(&spotify, &mut selections)?,
            2 => handle_discover(&spotify, &sendgrid, &selections, email)?,
            3 => {
                println!("Quitting...");
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

fn handle_genres(selections: &mut Selections) -> Result<()> {
    let available = genres_abridged();
    loop {
        let picked = MultiSelect::new()
            .with_prompt("Pick one to three genres (space toggles, enter confirms)")
            .items(&available)
            .interact()?;
        if picked.is_empty() || picked.len() > MAX_PICKS {
            println!("{}", "Please pick between one and three genres.".yellow());
            continue;
        }
        selections.add_genres(picked.into_iter().map(|i| available[i].clone()));

        heading("Your genre choices");
        for genre in &selections.genres {
            println!("  {genre}");
        }
        let clear = Confirm::new()
            .with_prompt("Clear the list and pick again?")
            .default(false)
            .interact()?;
        if !clear {
            return Ok(());
        }
        selections.genres.clear();
    }
}

fn handle_artists<T: Transport>(spotify: &Spotify<'_, T>, selections: &mut Selections) -> Result<()> {
    loop {
        let name: String = Input::new()
            .with_prompt("Name of an artist")
            .interact_text()?;

        let pb = spinner("Searching Spotify...");
        let found = spotify.search_artists(&name);
        pb.finish_and_clear();

        match found {
            Err(e) => println!("Artist search failed: {e}"),
            Ok(found) if found.is_empty() => println!("No artists found for \"{name}\"."),
            Ok(found) => {
                let labels: Vec<String> = found.iter().map(artist_label).collect();
                let picked = MultiSelect::new()
                    .with_prompt("Pick up to three artists")
                    .items(&labels)
                    .interact()?;
                if picked.len() > MAX_PICKS {
                    println!("Only the first {MAX_PICKS} were kept.");
                }
                selections.add_artists(
                    picked
                        .into_iter()
                        .take(MAX_PICKS)
                        .map(|i| found[i].clone()),
                );
            }
        }

        heading("Your artist choices");
        for artist in &selections.artists {
            println!("  {}", artist.name);
        }
        let choices = ["Done", "Search for more artists", "Clear the list"];
        match Select::new().items(&choices).default(0).interact()? {
            1 => continue,
            2 => selections.artists.clear(),
            _ => return Ok(()),
        }
    }
}

fn handle_discover<T: Transport>(
    spotify: &Spotify<'_, T>,
    sendgrid: &SendGrid<'_, T>,
    selections: &Selections,
    email: &EmailConfig,
) -> Result<()> {
    let pb = spinner("Fetching recommendations...");
    let result = spotify.similar_tracks(&selections.seeds());
    pb.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => {
            println!("{}", e.to_string().yellow());
            return Ok(());
        }
    };
    if tracks.is_empty() {
        println!("Spotify returned no recommendations.");
        return Ok(());
    }
    print!("{}", tracklist_table(&tracks));

    let send = Confirm::new()
        .with_prompt("Email this list?")
        .default(false)
        .interact()?;
    if !send {
        return Ok(());
    }
    let Some(html) = tracklist_table_html(&tracks) else {
        return Ok(());
    };

    let mut from_input = Input::<String>::new();
    from_input.with_prompt("Sender email");
    if let Some(from) = &email.from {
        from_input.default(from.clone());
    }
    let from = from_input.interact_text()?;

    let mut to_input = Input::<String>::new();
    to_input.with_prompt("Recipients (comma separated)");
    if !email.to.is_empty() {
        to_input.default(email.to.join(", "));
    }
    let to = parse_recipients(&to_input.interact_text()?);

    let mail = Mail {
        from,
        to,
        subject: MAIL_SUBJECT.to_string(),
        html_content: html,
    };
    let pb = spinner("Sending...");
    let sent = sendgrid.send_mail(&mail);
    pb.finish_and_clear();
    match sent {
        Ok(()) => println!("Email sent. It may land in the spam folder."),
        Err(e) => println!("Email failed: {e}"),
    }
    Ok(())
}

fn parse_recipients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
