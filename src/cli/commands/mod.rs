//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod extract;
mod speak;
mod summarize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::LectorConfig;

#[derive(Parser)]
#[command(name = "lector")]
#[command(about = "PDF to spoken-audio summarizer")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a PDF and optionally speak the result
    Summarize {
        /// PDF file to summarize
        pdf: PathBuf,
        /// Target summary length in words (default from config, 1000)
        #[arg(short, long)]
        length: Option<usize>,
        /// Write the summary text to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Synthesize the summary to an audio artifact
        #[arg(short = 'A', long)]
        audio: bool,
        /// Copy the audio artifact to this file (implies --audio)
        #[arg(long)]
        audio_out: Option<PathBuf>,
    },

    /// Extract and clean a PDF's text without summarizing
    Extract {
        /// PDF file to extract
        pdf: PathBuf,
        /// Write the cleaned text to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Synthesize speech from a text file
    Speak {
        /// Text file to speak
        text_file: PathBuf,
        /// Write the audio to this file instead of the artifact dir
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check external tool and capability service availability
    Check,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = LectorConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summarize {
            pdf,
            length,
            out,
            audio,
            audio_out,
        } => {
            summarize::cmd_summarize(&config, &pdf, length, out.as_deref(), audio, audio_out)
                .await
        }
        Commands::Extract { pdf, out } => extract::cmd_extract(&config, &pdf, out.as_deref()).await,
        Commands::Speak { text_file, out } => {
            speak::cmd_speak(&config, &text_file, out.as_deref()).await
        }
        Commands::Check => check::cmd_check(&config).await,
    }
}
