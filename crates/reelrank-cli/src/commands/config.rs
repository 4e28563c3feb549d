use crate::output::{styled_table, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use std::path::Path;
use watchlist_config::{Config, PathManager};

pub fn run_config(cmd: ConfigCommands, config: &Config, config_path: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(config, config_path, full, output),
        ConfigCommands::Init { force } => init_config(config_path, force, output),
    }
}

fn show_config(config: &Config, config_path: &Path, full: bool, output: &Output) -> Result<()> {
    if !config_path.exists() {
        output.warn(format!("Configuration file not found at: {}", config_path.display()));
        output.info("Showing defaults. Run 'reelrank config init' to create the file.");
    }

    let api_key = if full {
        config.provider.api_key.clone()
    } else {
        mask_string(&config.provider.api_key)
    };
    let database_url = config.database.resolved_url(&PathManager::default());
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_path.display().to_string(),
            "database": {
                "url": database_url,
                "max_connections": config.database.max_connections,
                "busy_timeout_ms": config.database.busy_timeout_ms,
            },
            "provider": {
                "kind": config.provider.kind,
                "api_key": api_key,
                "base_url": config.provider.base_url,
                "timeout_secs": config.provider.timeout_secs,
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": log_file,
            },
        }));
        return Ok(());
    }

    let mut table = styled_table(&["Setting", "Value"]);
    let rows = [
        ("Config file", config_path.display().to_string()),
        ("database.url", database_url),
        ("database.max_connections", config.database.max_connections.to_string()),
        ("database.busy_timeout_ms", config.database.busy_timeout_ms.to_string()),
        ("provider.kind", format!("{:?}", config.provider.kind).to_lowercase()),
        ("provider.api_key", api_key),
        ("provider.base_url", config.provider.base_url.clone()),
        ("provider.timeout_secs", config.provider.timeout_secs.to_string()),
        ("logging.level", config.logging.level.clone()),
        ("logging.json", config.logging.json.to_string()),
        ("logging.file", log_file),
    ];
    for (key, value) in rows {
        table.add_row(vec![key.to_string(), value]);
    }
    output.table(&table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is incomplete: {}", e));
    }
    Ok(())
}

fn init_config(config_path: &Path, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
        return Ok(());
    }

    Config::template()
        .save_to_file(config_path)
        .map_err(|e| eyre!("Failed to write {}: {}", config_path.display(), e))?;
    output.success(format!("Wrote {}", config_path.display()));
    output.info("Set provider.api_key (or OMDB_API_KEY) before fetching movies.");
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "(not set)".to_string();
    }
    if s.chars().count() <= 4 {
        return "****".to_string();
    }
    format!("{}****", s.chars().take(4).collect::<String>())
}
