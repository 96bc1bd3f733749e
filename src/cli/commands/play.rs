//! Play command implementation.

use crate::core::context::Context;
use crate::models::media::{Media, MediaFile};
use crate::{Error, Result};
use colored::Colorize;
use std::path::Path;

/// Send `file` to the named display, or the first one registered.
pub async fn play(ctx: &Context, file: &Path, display: Option<&str>) -> Result<()> {
    if !file.is_file() {
        return Err(Error::PathNotFound(file.display().to_string()));
    }

    let media = Media::classify(file)?;
    let label = match &media {
        Media::Movie(movie) => movie.title(),
        Media::Show(show) => show.identifier().to_string(),
    };

    let target = ctx.displays.resolve(display)?;
    if target.is_off().await {
        println!("{} {} is off", "⚠️ ".yellow(), target.name().bold());
        return Ok(());
    }

    target.send_video(media.path()).await?;
    println!(
        "▶ {} on {} ({})",
        label.bold(),
        target.name().cyan(),
        media.resolution()
    );

    Ok(())
}
