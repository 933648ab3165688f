//! Command-line interface.
//!
//! With no subcommand the interactive menu starts. Every other subcommand
//! makes one provider call and prints a table, or JSON with `--raw`.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::auth::Gateway;
use crate::config::{config_path, Config};
use crate::providers::sendgrid::{Mail, SendGrid};
use crate::providers::spotify::{self, tracklist_table, tracklist_table_html, Seeds, Spotify};
use crate::providers::yelp::{
    self, business_list_table, business_table, reviews_table, BusinessQuery, Format, Yelp,
};
use crate::providers::youtube::YouTube;
use crate::ui::main_menu;

/// Music Finder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/music-finder/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Master access token, overrides the config file
    #[arg(long, env = "MUSIC_FINDER_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Print the unmodified provider JSON
    #[arg(long, global = true)]
    pub raw: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Interactive genre/artist picker and recommendations (default)
    Menu,
    /// List recommendation genres
    Genres {
        /// Ask Spotify for the full list instead of the built-in short one
        #[arg(long)]
        all: bool,
    },
    /// Search Spotify tracks
    Tracks { term: String },
    /// Search Spotify artists
    Artists { term: String },
    /// Artists related to an artist
    RelatedArtists { artist_id: String },
    /// Search Spotify playlists
    Playlists {
        term: String,
        /// Treat the term as a user id and list that user's playlists
        #[arg(long)]
        user: bool,
    },
    /// Tracks in a playlist
    PlaylistTracks { playlist_id: String },
    /// An artist's top tracks
    TopTracks { artist_id: String },
    /// Audio analysis summary for a track
    AudioFeatures { track_id: String },
    /// Recommendations from up to five seeds
    Recommend {
        /// Seed genre, repeatable
        #[arg(long)]
        genre: Vec<String>,
        /// Seed artist id, repeatable
        #[arg(long)]
        artist: Vec<String>,
        /// Seed track id, repeatable
        #[arg(long)]
        track: Vec<String>,
        /// Print the HTML table instead of text
        #[arg(long)]
        html: bool,
    },
    /// List the Yelp categories accepted by `businesses --categories`
    Categories,
    /// Search Yelp businesses
    Businesses {
        #[arg(short, long, default_value = yelp::DEFAULT_LOCATION)]
        location: String,
        /// Number of results, at most 50
        #[arg(long, default_value_t = yelp::DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long)]
        term: Option<String>,
        /// Comma separated category aliases
        #[arg(long)]
        categories: Option<String>,
        /// best_match, rating, review_count or distance
        #[arg(long)]
        sort_by: Option<String>,
        /// 1 to 4, or a combination such as 1,2
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        open_now: bool,
        /// Show each business with its reviews
        #[arg(long)]
        details: bool,
        /// With --details, print HTML instead of text
        #[arg(long)]
        html: bool,
    },
    /// Reviews of a Yelp business
    Reviews {
        business_id: String,
        #[arg(long)]
        html: bool,
    },
    /// Search YouTube videos
    Videos { term: String },
    /// Send an HTML email through SendGrid
    SendMail {
        /// Sender (default: email.from in the config)
        #[arg(long)]
        from: Option<String>,
        /// Recipient, repeatable (default: email.to in the config)
        #[arg(long)]
        to: Vec<String>,
        #[arg(long)]
        subject: String,
        /// File holding the HTML body
        #[arg(long)]
        body: PathBuf,
    },
}

/// Run the command described by `cli`.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?.with_token_override(cli.token.clone());
    let out = Output { raw: cli.raw };

    match &cli.command {
        None | Some(Commands::Menu) => {
            let gw = gateway(cli, &config)?;
            main_menu(&gw, &config.email)
        }
        Some(Commands::Genres { all: false }) => out.lines(&spotify::genres_abridged()),
        Some(Commands::Genres { all: true }) => {
            let gw = gateway(cli, &config)?;
            out.lines(&Spotify::new(&gw).genres()?)
        }
        Some(Commands::Categories) => out.lines(&yelp::categories()),
        Some(Commands::Tracks { term }) => {
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            if cli.raw {
                return out.json(&sp.search_tracks_raw(term)?);
            }
            out.records(sp.search_tracks(term), |tracks| {
                print!("{}", tracklist_table(tracks));
                Ok(())
            })
        }
        Some(Commands::Artists { term }) => {
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            if cli.raw {
                return out.json(&sp.search_artists_raw(term)?);
            }
            out.records(sp.search_artists(term), |artists| out.json(&artists))
        }
        Some(Commands::RelatedArtists { artist_id }) => {
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            if cli.raw {
                return out.json(&sp.related_artists_raw(artist_id)?);
            }
            out.records(sp.related_artists(artist_id), |artists| out.json(&artists))
        }
        Some(Commands::Playlists { term, user }) => {
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            match (*user, cli.raw) {
                (true, true) => out.json(&sp.playlists_by_user_raw(term)?),
                (true, false) => out.records(sp.playlists_by_user(term), |p| out.json(&p)),
                (false, true) => out.json(&sp.search_playlists_raw(term)?),
                (false, false) => out.records(sp.search_playlists(term), |p| out.json(&p)),
            }
        }
        Some(Commands::PlaylistTracks { playlist_id }) => {
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            if cli.raw {
                return out.json(&sp.tracks_by_playlist_raw(playlist_id)?);
            }
            out.records(sp.tracks_by_playlist(playlist_id), |tracks| {
                print!("{}", tracklist_table(tracks));
                Ok(())
            })
        }
        Some(Commands::TopTracks { artist_id }) => {
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            if cli.raw {
                return out.json(&sp.top_tracks_by_artist_raw(artist_id)?);
            }
            out.records(sp.top_tracks_by_artist(artist_id), |tracks| {
                print!("{}", tracklist_table(tracks));
                Ok(())
            })
        }
        Some(Commands::AudioFeatures { track_id }) => {
            let gw = gateway(cli, &config)?;
            out.json(&Spotify::new(&gw).audio_features(track_id)?)
        }
        Some(Commands::Recommend {
            genre,
            artist,
            track,
            html,
        }) => {
            let seeds = Seeds {
                artist_ids: artist.clone(),
                track_ids: track.clone(),
                genres: genre.clone(),
            };
            // Checked before a token is fetched
            seeds.query()?;
            let gw = gateway(cli, &config)?;
            let sp = Spotify::new(&gw);
            if cli.raw {
                return out.json(&sp.similar_tracks_raw(&seeds)?);
            }
            out.records(sp.similar_tracks(&seeds), |tracks| {
                if *html {
                    println!("{}", tracklist_table_html(tracks).unwrap_or_default());
                } else {
                    print!("{}", tracklist_table(tracks));
                }
                Ok(())
            })
        }
        Some(Commands::Businesses {
            location,
            limit,
            term,
            categories,
            sort_by,
            price,
            open_now,
            details,
            html,
        }) => {
            let query = BusinessQuery {
                location: location.clone(),
                limit: *limit,
                term: term.clone(),
                categories: categories.clone(),
                sort_by: sort_by.clone(),
                price: price.clone(),
                open_now: *open_now,
            };
            // Whitelist errors surface before any network call
            query.search_url(yelp::DEFAULT_BASE_URL)?;
            let gw = gateway(cli, &config)?;
            let yp = Yelp::new(&gw);
            if cli.raw {
                return out.json(&yp.businesses_raw(&query)?);
            }
            out.records(yp.businesses(&query), |businesses| {
                if !*details {
                    print!("{}", business_list_table(businesses));
                    return Ok(());
                }
                let format = if *html { Format::Html } else { Format::Text };
                for business in businesses {
                    let reviews = yp
                        .reviews(&business.id)
                        .with_context(|| format!("Fetching reviews for {}", business.id))?;
                    print!("{}", business_table(business, &reviews, format));
                    println!();
                }
                Ok(())
            })
        }
        Some(Commands::Reviews { business_id, html }) => {
            let gw = gateway(cli, &config)?;
            let yp = Yelp::new(&gw);
            if cli.raw {
                return out.json(&yp.reviews_raw(business_id)?);
            }
            let format = if *html { Format::Html } else { Format::Text };
            out.records(yp.reviews(business_id), |reviews| {
                print!("{}", reviews_table(reviews, format));
                Ok(())
            })
        }
        Some(Commands::Videos { term }) => {
            let gw = gateway(cli, &config)?;
            let yt = YouTube::new(&gw);
            if cli.raw {
                return out.json(&yt.search_videos_raw(term)?);
            }
            out.records(yt.search_videos(term), |videos| out.json(&videos))
        }
        Some(Commands::SendMail {
            from,
            to,
            subject,
            body,
        }) => {
            let html_content = std::fs::read_to_string(body)
                .with_context(|| format!("Reading email body from {}", body.display()))?;
            let from = from
                .clone()
                .or_else(|| config.email.from.clone())
                .context("No sender: pass --from or set email.from in the config file")?;
            let to = if to.is_empty() {
                config.email.to.clone()
            } else {
                to.clone()
            };
            let mail = Mail {
                from,
                to,
                subject: subject.clone(),
                html_content,
            };
            let gw = gateway(cli, &config)?;
            SendGrid::new(&gw).send_mail(&mail)?;
            println!("Email sent to {}.", mail.to.join(", "));
            Ok(())
        }
    }
}

fn gateway(cli: &Cli, config: &Config) -> anyhow::Result<Gateway<ApiClient>> {
    let hint = cli
        .config
        .clone()
        .or_else(config_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "config.toml".to_string());
    debug!("Token endpoint: {}", config.endpoints.token_base_url);
    let gateway = Gateway::new(
        ApiClient::new()?,
        config.credentials.api_tutor_token.clone(),
        config.endpoints.token_base_url.clone(),
        &hint,
    )?;
    Ok(gateway)
}

struct Output {
    raw: bool,
}

impl Output {
    fn json(&self, value: &impl Serialize) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Show simplified records, or the unmodified response when it could
    /// not be simplified.
    fn records<T>(
        &self,
        result: crate::Result<Vec<T>>,
        show: impl FnOnce(&[T]) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        match result {
            Ok(records) => show(&records),
            Err(e) => match e.unmodified_response() {
                Some(response) => {
                    warn!("Response could not be simplified, printing it unmodified");
                    self.json(response)
                }
                None => Err(e.into()),
            },
        }
    }

    /// One entry per line, or a JSON array with `--raw`.
    fn lines(&self, items: &[String]) -> anyhow::Result<()> {
        if self.raw {
            return self.json(&items);
        }
        for item in items {
            println!("{item}");
        }
        Ok(())
    }
}
