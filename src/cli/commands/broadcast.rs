//! Broadcast command implementation.
//!
//! Keeps the reconciliation loop running until Ctrl-C.

use crate::core::context::Context;
use crate::core::reconciler::ReconcilerHandle;
use crate::Result;
use colored::Colorize;

/// Wait for Ctrl-C, then stop the loop after its current tick.
pub async fn broadcast(ctx: &Context, handle: ReconcilerHandle) -> Result<()> {
    println!(
        "{}",
        format!(
            "📡 Broadcasting to {} display(s): {}",
            ctx.displays.len(),
            ctx.displays.names().join(", ")
        )
        .bold()
        .cyan()
    );
    println!("Press Ctrl-C to stop.");

    let result = tokio::signal::ctrl_c().await;
    println!();

    let ticks = handle.shutdown().await;
    println!("{} after {} ticks", "Stopped".green(), ticks);

    result?;
    Ok(())
}
