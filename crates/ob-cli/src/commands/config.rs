//! Config command implementations

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::output::{print_error, print_info, print_success, print_warning};
use ob_core::config::{self, parse_port, StateFile};

fn resolve(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_state_path)
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {:?}", path))?;
    toml::from_str(&content).with_context(|| "Failed to parse state file")
}

/// Print the state file path
pub fn config_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", resolve(config_path).display());
    Ok(())
}

/// Get a value by dotted key (e.g. `console.idle_timeout_ms`)
pub fn config_get(config_path: Option<&Path>, key: &str) -> Result<()> {
    let path = resolve(config_path);

    if !path.exists() {
        print_error(&format!("State file not found: {:?}", path));
        print_info("Run 'obsbind config init' to create one");
        return Ok(());
    }

    let table = read_table(&path)?;
    let mut current = &toml::Value::Table(table);

    for part in key.split('.') {
        match current.as_table().and_then(|t| t.get(part)) {
            Some(v) => current = v,
            None => {
                print_error(&format!("Key not found: {}", key));
                return Ok(());
            }
        }
    }

    match current {
        toml::Value::String(s) => println!("{}", s),
        toml::Value::Table(_) => println!("{}", toml::to_string_pretty(current)?),
        other => println!("{}", other),
    }

    Ok(())
}

/// Set a value by dotted key
///
/// The edited document must still load as a state file, otherwise nothing
/// is written.
pub fn config_set(config_path: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let path = resolve(config_path);

    if !path.exists() {
        print_info("Creating default state file...");
        StateFile::default().save(&path)?;
    }

    let mut table = read_table(&path)?;

    let parts: Vec<&str> = key.split('.').collect();
    let Some((last_key, parents)) = parts.split_last() else {
        bail!("Invalid key");
    };
    if last_key.is_empty() {
        bail!("Invalid key: {:?}", key);
    }

    let mut current = &mut table;
    for part in parents {
        current = current
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("Cannot navigate to key: {}", key))?;
    }

    let toml_value = match key {
        "port" => toml::Value::Integer(i64::from(parse_port(value)?)),
        "hosts" => toml::Value::String(value.to_string()),
        _ if parents.first() == Some(&"bindings") => toml::Value::String(value.to_string()),
        _ => {
            if let Ok(i) = value.parse::<i64>() {
                toml::Value::Integer(i)
            } else if let Ok(b) = value.parse::<bool>() {
                toml::Value::Boolean(b)
            } else {
                toml::Value::String(value.to_string())
            }
        }
    };

    current.insert(last_key.to_string(), toml_value);

    let rendered = toml::to_string_pretty(&table)?;
    if let Err(e) = toml::from_str::<StateFile>(&rendered) {
        bail!("Refusing to write an invalid state file: {}", e);
    }

    config::save_config(&path, &table)
        .with_context(|| format!("Failed to write state file: {:?}", path))?;

    print_success(&format!("Set {} = {}", key, value));
    Ok(())
}

/// Show the current state file
pub fn config_show(config_path: Option<&Path>) -> Result<()> {
    let path = resolve(config_path);

    if !path.exists() {
        print_warning(&format!("No state file found at {:?}", path));
        print_info("Run 'obsbind config init' to create one");
        return Ok(());
    }

    print_info(&format!("State file: {:?}", path));
    println!();

    let state = StateFile::load(&path)?;
    println!("{}", toml::to_string_pretty(&state)?);

    Ok(())
}

/// Write a default state file
pub fn config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve(config_path);

    if path.exists() && !force {
        print_error(&format!("State file already exists: {:?}", path));
        print_info("Use --force to overwrite");
        return Ok(());
    }

    StateFile::default()
        .save(&path)
        .with_context(|| format!("Failed to write state file: {:?}", path))?;

    print_success(&format!("Created state file: {:?}", path));
    Ok(())
}
