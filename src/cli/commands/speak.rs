//! `lector speak` - synthesis only, from a text file.

use std::path::Path;

use console::style;
use indicatif::ProgressBar;

use crate::audio::AudioStore;
use crate::config::LectorConfig;
use crate::tts::{HttpTtsService, SpeechSynthesizer};

pub async fn cmd_speak(
    config: &LectorConfig,
    text_file: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(text_file)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", text_file.display(), e))?;

    if text.trim().is_empty() {
        anyhow::bail!("Nothing to speak: {} is empty", text_file.display());
    }

    let tts = HttpTtsService::new(config.tts.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Synthesizing speech...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let bytes = tts.synthesize(&text).await?;
    spinner.finish_and_clear();

    match out {
        Some(out_path) => {
            std::fs::write(out_path, &bytes)?;
            println!(
                "{} Audio saved to {} ({} bytes)",
                style("✓").green(),
                out_path.display(),
                bytes.len()
            );
        }
        None => {
            let store = AudioStore::new(&config.pipeline.audio_dir);
            let artifact = store.store(&bytes)?;
            println!(
                "{} Audio generated: {} ({}, {} bytes)",
                style("✓").green(),
                artifact.path.display(),
                artifact.media_type,
                artifact.len
            );
        }
    }

    Ok(())
}
