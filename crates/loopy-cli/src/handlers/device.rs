//! Device command handler.

use anyhow::Result;
use serde_json::Value;

use crate::bootstrap::CliContext;

/// Print the device dictionary as pretty JSON.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let dictionary = Value::Object(ctx.settings.device_dictionary());
    println!("{}", serde_json::to_string_pretty(&dictionary)?);
    Ok(())
}
