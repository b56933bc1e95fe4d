//! `kioku config` — Configuration display.

use kioku_config::AppConfig;

pub async fn show(default: bool) -> Result<(), Box<dyn std::error::Error>> {
    if default {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("# {}", AppConfig::config_dir().join("config.toml").display());
    print!("{}", config.to_toml());
    Ok(())
}
