//! Vidsonic CLI — Command-line interface for metric extraction.
//!
//! Usage:
//!   vidsonic extract <RAW_VIDEO>        Extract metrics into an event file
//!   vidsonic info <RAW_VIDEO>           Show frame count, rate and duration
//!   vidsonic change-points <EVENTS>     Detect change points in one feature
//!   vidsonic tracks <SETTINGS>          Validate a track settings file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vidsonic_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "vidsonic",
    about = "Turn per-frame video and audio metrics into sonification events",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/vidsonic/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract brightness, histogram, amplitude, contrast and joint metrics
    Extract {
        /// Raw RGB24 frame dump of the video
        video: PathBuf,

        /// Frame width in pixels
        #[arg(long)]
        width: u32,

        /// Frame height in pixels
        #[arg(long)]
        height: u32,

        /// Frame rate of the original video (0 if unknown)
        #[arg(long, default_value = "0")]
        fps: f64,

        /// PCM WAV audio track for the amplitude metric
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// Output event file (defaults to the video path with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Recompute even if the output file already exists
        #[arg(long)]
        force: bool,
    },

    /// Show video frame count, frame rate and duration
    Info {
        /// Raw RGB24 frame dump of the video
        video: PathBuf,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        #[arg(long, default_value = "0")]
        fps: f64,
    },

    /// Detect change points in one feature of an event file
    ChangePoints {
        /// Event file written by `extract`
        events: PathBuf,

        /// Feature to analyze
        #[arg(short, long, default_value = "joint")]
        feature: String,

        /// Print the result as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Validate a track settings file and list the active tracks
    Tracks {
        /// JSON array of track settings
        settings: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    vidsonic_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Extract {
            video,
            width,
            height,
            fps,
            audio,
            output,
            force,
        } => commands::extract::run(&config, video, width, height, fps, audio, output, force),
        Commands::Info {
            video,
            width,
            height,
            fps,
        } => commands::info::run(&config, video, width, height, fps),
        Commands::ChangePoints {
            events,
            feature,
            json,
        } => commands::change_points::run(&config, events, feature, json),
        Commands::Tracks { settings } => commands::tracks::run(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_arguments_parse() {
        let cli = Cli::parse_from([
            "vidsonic", "extract", "clip.rgb", "--width", "640", "--height", "360", "--audio",
            "clip.wav", "--force",
        ]);
        match cli.command {
            Commands::Extract {
                width,
                height,
                fps,
                audio,
                force,
                output,
                ..
            } => {
                assert_eq!((width, height), (640, 360));
                assert_eq!(fps, 0.0);
                assert_eq!(audio, Some(PathBuf::from("clip.wav")));
                assert!(force);
                assert!(output.is_none());
            }
            _ => panic!("expected extract"),
        }
    }
}
