use anyhow::{Context, Result};

use kisskh::KissKhExtension;

use super::output::print_json;
use crate::OutputFormat;

pub async fn cmd_resolve(
    ext: &KissKhExtension,
    episode_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let sources = ext
        .resolve_streamable(episode_id)
        .await
        .with_context(|| format!("playback failed for episode {episode_id}"))?;

    if format == OutputFormat::Json {
        return print_json(&sources);
    }

    eprintln!("📺 {} source(s) for episode {episode_id}", sources.len());
    for source in &sources {
        println!("{source}");
        for (name, value) in &source.headers {
            println!("    {name}: {value}");
        }
    }
    Ok(())
}

pub async fn cmd_subkey(ext: &KissKhExtension, episode_id: &str) -> Result<()> {
    let key = ext.subtitle_key(episode_id).await?;
    println!("{}", key.as_str());
    Ok(())
}
