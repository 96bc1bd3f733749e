//! Shows / movies listing command.

use crate::core::catalog::{CatalogRegistry, SkippedFile};
use crate::core::context::Context;
use crate::models::media::MediaType;
use crate::Result;
use colored::Colorize;
use std::collections::HashSet;

/// Listing lines for one media type, deduplicated in first-seen order.
#[derive(Debug, Default)]
pub struct Listing {
    pub lines: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Build the listing for `media_type` from every catalog.
pub fn build_listing(catalogs: &CatalogRegistry, media_type: MediaType) -> Result<Listing> {
    let scan = catalogs.scan()?;

    let infos = match media_type {
        MediaType::Movies => scan.movies.iter().map(|m| m.info()).collect::<Vec<_>>(),
        MediaType::Shows => scan
            .shows
            .iter()
            .map(|s| s.info(catalogs))
            .collect::<Result<Vec<_>>>()?,
    };

    let mut seen = HashSet::new();
    let lines = infos
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect();

    Ok(Listing {
        lines,
        skipped: scan.skipped,
    })
}

/// Power off every display, print the listing, then stop the loop.
///
/// Displays are switched off before the reconciliation loop starts, so a
/// listing never casts anything.
pub async fn list(ctx: &Context, media_type: MediaType) -> Result<()> {
    ctx.power_off_all().await;
    let handle = ctx.start_reconciler();

    let result = print_listing(ctx, media_type);
    handle.abort();
    result
}

fn print_listing(ctx: &Context, media_type: MediaType) -> Result<()> {
    let listing = build_listing(&ctx.catalogs, media_type)?;
    tracing::debug!("Listing {} {}", listing.lines.len(), media_type);

    if !listing.lines.is_empty() {
        println!("{}", listing.lines.join("\n"));
    }

    if !listing.skipped.is_empty() {
        eprintln!(
            "{}",
            format!("⚠️  {} file(s) skipped:", listing.skipped.len()).yellow()
        );
        for skipped in &listing.skipped {
            eprintln!("  {} - {}", skipped.path.display(), skipped.reason);
        }
    }

    Ok(())
}
