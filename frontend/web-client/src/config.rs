//! Command-line configuration of the client.

use crate::background::load_background;
use crate::controller::ClientConfig;
use crate::http_api::DEFAULT_SERVER_URL;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use ticket_to_ride::city::CityRegistry;
use ticket_to_ride::render::{BackgroundMap, MapCanvas, Size};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(about = "Play Ticket to Ride against a bot, from the terminal")]
pub struct Args {
    /// Base URL of the game server's API
    #[arg(long, env = "TTR_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// ID of the player controlled from the terminal
    #[arg(long, default_value = "1")]
    pub human_player: String,

    /// ID of the player controlled by the bot
    #[arg(long, default_value = "2")]
    pub bot_player: String,

    /// How long the bot waits before playing, in milliseconds
    #[arg(long, default_value_t = 1500)]
    pub bot_delay_ms: u64,

    /// How long the bot's status stays up after it played, in milliseconds
    #[arg(long, default_value_t = 3200)]
    pub status_clear_ms: u64,

    /// JSON file mapping city names to their coordinates on the map.
    /// Defaults to the built-in map of the United States
    #[arg(long)]
    pub cities: Option<PathBuf>,

    /// Background image of the map, referenced from the SVG
    #[arg(long, default_value = "assets/map.png")]
    pub map_image: String,

    /// Width of the map, in pixels, if the background image cannot be read
    #[arg(long, default_value_t = 1000)]
    pub map_width: u32,

    /// Height of the map, in pixels, if the background image cannot be read
    #[arg(long, default_value_t = 700)]
    pub map_height: u32,

    /// Where to write the map after every update
    #[arg(long, default_value = "map.svg")]
    pub svg_out: PathBuf,

    /// RNG seed of the bot
    #[arg(long)]
    pub seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            human_player: self.human_player.clone(),
            bot_player: self.bot_player.clone(),
            bot_delay: Duration::from_millis(self.bot_delay_ms),
            status_clear_delay: Duration::from_millis(self.status_clear_ms),
        }
    }

    pub fn load_registry(&self) -> anyhow::Result<CityRegistry> {
        match &self.cities {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                CityRegistry::from_json(&json)
                    .with_context(|| format!("Invalid city registry in {}", path.display()))
            }
            None => Ok(CityRegistry::us_map().clone()),
        }
    }

    /// The map's canvas, sized after the background image.
    ///
    /// `--map-width` and `--map-height` are only used when the image cannot be read.
    pub fn canvas(&self) -> MapCanvas {
        let mut canvas = MapCanvas::new(BackgroundMap {
            href: self.map_image.clone(),
            natural_size: Size::new(self.map_width, self.map_height),
        });
        load_background(&mut canvas);

        canvas
    }
}
