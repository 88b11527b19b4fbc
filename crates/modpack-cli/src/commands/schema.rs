//! Schema command: print the JSON schema of modpack.config.json.

use crate::config::ModpackConfig;
use crate::error::Result;

pub async fn execute() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&ModpackConfig::json_schema())?);
    Ok(())
}
