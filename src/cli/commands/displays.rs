//! Displays command implementation.

use crate::core::context::Context;
use crate::Result;
use colored::Colorize;

/// Print configured displays and their current state.
pub async fn list_displays(ctx: &Context) -> Result<()> {
    if ctx.displays.is_empty() {
        println!("No displays configured.");
        return Ok(());
    }

    println!("{:<20} {:<24} {}", "Name".bold(), "Address".bold(), "State".bold());
    println!("{}", "-".repeat(60));

    for display in ctx.displays.snapshot() {
        println!(
            "{:<20} {:<24} {}",
            display.name(),
            display.address(),
            display.state().await
        );
    }

    Ok(())
}
