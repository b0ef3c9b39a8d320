//! CLI argument parsing with clap.

use clap::Parser;

/// Meme generator - Stable Diffusion backgrounds with Gemini captions.
#[derive(Parser, Debug)]
#[command(name = "memeforge", version, about)]
pub struct Cli {
    /// Meme topic, e.g. "zoom fatigue".
    #[arg(conflicts_with = "topic_file")]
    pub topic: Option<String>,

    /// Path to a file containing the topic.
    #[arg(short = 't', long, conflicts_with = "topic")]
    pub topic_file: Option<String>,

    /// Output file path (auto-generated from the topic if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format: jpeg, png, webp.
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Outline font file (overrides the config file).
    #[arg(long)]
    pub font: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the topic from either the positional argument or the file flag.
    ///
    /// A missing topic resolves to an empty string; the pipeline answers it
    /// with a prompt for input.
    ///
    /// # Errors
    ///
    /// Returns an error if the topic file cannot be read.
    pub fn resolve_topic(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.topic {
            Ok(text.clone())
        } else if let Some(ref path) = self.topic_file {
            std::fs::read_to_string(path)
        } else {
            Ok(String::new())
        }
    }
}
