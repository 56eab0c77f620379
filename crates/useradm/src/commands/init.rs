use crate::cli::OutputFormat;
use crate::config::{Config, LOCAL_CONFIG_FILE_NAME};
use anyhow::{anyhow, Result};
use serde_json::json;

pub fn handle_init(
    url: &str,
    timeout_secs: Option<u64>,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    let path = std::env::current_dir()?.join(LOCAL_CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let config = Config {
        url: Some(url.to_string()),
        timeout_secs,
        log: None,
    };
    config.validate()?;
    config.save(&path)?;

    match format {
        OutputFormat::Json => {
            let result = json!({ "success": true, "path": path.display().to_string() });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => println!("Wrote {}", path.display()),
    }
    Ok(())
}
