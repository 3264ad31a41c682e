use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tourguide_core::models::Coordinates;

/// Tour guide - location-aware travel companion
#[derive(Parser, Debug)]
#[command(name = "tourguide")]
#[command(about = "Location-aware tour guide with voice chat and an offline phrasebook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./tourguide.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Two-letter language code (en, es, fr, ja)
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Destination id used as chat context (e.g. paris)
    #[arg(long, global = true)]
    pub destination: Option<String>,

    /// Base URL of the guide endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Path or URL of the offline knowledge document
    #[arg(long, global = true)]
    pub knowledge: Option<String>,

    /// Start offline and skip the connectivity probe
    #[arg(long, global = true)]
    pub offline: bool,

    /// Start with voice mode on
    #[arg(long, global = true)]
    pub voice: bool,

    /// Interpret trigger phrases ("navigate to ...") in dictated speech
    #[arg(long, global = true)]
    pub voice_commands: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat session (default)
    Chat(ChatArgs),

    /// Ask a single question and print the reply
    Ask(AskArgs),

    /// Distance, direction and instructions to a destination
    Navigate(NavigateArgs),

    /// Show the offline phrasebook
    Phrases(PhrasesArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Replay a GPX file as the location source
    #[arg(long, value_name = "FILE")]
    pub gpx: Option<PathBuf>,

    /// Seconds between replayed GPX fixes
    #[arg(long, default_value = "1")]
    pub gpx_interval: u64,
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to send
    #[arg(required = true)]
    pub message: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct NavigateArgs {
    /// Destination id (paris, tokyo, newyork)
    #[arg(long)]
    pub to: String,

    /// Starting point as "lat,lon" (defaults to the configured coordinates)
    #[arg(long, value_name = "LAT,LON")]
    pub from: Option<Coordinates>,
}

#[derive(Parser, Debug)]
pub struct PhrasesArgs {
    /// Only show one category (greetings, directions, emergency, food)
    #[arg(long)]
    pub category: Option<String>,

    /// Show every language instead of the configured one
    #[arg(long)]
    pub all: bool,
}
