//! Advertising identifier reset handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;

/// Replace the stored advertising identifier and print the new value.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let id = ctx
        .advertising
        .reset()
        .context("Failed to reset advertising identifier")?;
    println!("{id}");
    Ok(())
}
