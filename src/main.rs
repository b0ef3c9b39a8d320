//! Memeforge - meme generator CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod logger;
mod meme;
mod model;
mod output;
mod params;
mod ports;
mod render;
#[cfg(test)]
mod test_support;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::meme::{CaptionSource, ImageSource, MemeForge, MemeOutcome};
use crate::output::{resolve_output_path, save_meme};
use crate::params::validate_format;
use crate::render::MemeFont;

#[tokio::main]
async fn main() {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), error::MemeError> {
    logger::init(logger::level_for(cli.verbose))?;

    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::MemeError::Config)?;
    debug!(path = %config_path.display(), "config loaded");

    validate_format(&cli.format).map_err(error::MemeError::InvalidArgument)?;
    let topic = cli.resolve_topic()?;

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("MEMEFORGE_REPLAY").ok();
    let is_recording = std::env::var("MEMEFORGE_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        debug!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        debug!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let font_path = cli.font.as_deref().map(Path::new).or(config.render.font.as_deref());
    let forge = MemeForge::new(
        ImageSource::new(ctx.images),
        CaptionSource::new(ctx.captions),
        MemeFont::select(font_path),
        config.render.font_size,
    );

    let outcome = forge.generate_meme(&topic).await;
    // Releases the ports' handles on the recorder.
    drop(forge);

    match outcome {
        MemeOutcome::EmptyTopic { message } => eprintln!("{message}"),
        MemeOutcome::Meme(meme) => {
            if let Some(ref reason) = meme.image_fallback {
                eprintln!("Warning: image generation failed ({reason}); using a blank canvas");
            }
            if let Some(ref reason) = meme.caption_fallback {
                eprintln!("Warning: caption generation failed ({reason}); using fallback captions");
            }

            let output_path = resolve_output_path(cli.output.as_deref(), &topic, &cli.format);
            save_meme(&meme.image, &cli.format, &output_path)?;
            eprintln!("Saved: {}", output_path.display());
            println!("{}", meme.caption);
        }
    }

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok((path, count)) => {
                eprintln!("Cassette saved: {} ({count} interactions)", path.display());
            }
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(())
}
