use anyhow::{Context, Result};
use spectracard_schemas::{
    file_formats::{CardFile, SnapshotFile, SCHEMA_VERSION},
    host::StateSnapshot,
};
use std::{fs, path::Path};
use tracing::{info, warn};

/// Loads a card definition from a YAML file.
pub fn load_card(path: &Path) -> Result<CardFile> {
    info!("Loading card configuration from '{}'", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read card file: {:?}", path))?;
    let card = parse_card(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
    if card.schema_version != SCHEMA_VERSION {
        warn!(
            "Card file {:?} declares schema version '{}', expected '{}'",
            path, card.schema_version, SCHEMA_VERSION
        );
    }
    Ok(card)
}

pub fn parse_card(content: &str) -> Result<CardFile> {
    Ok(serde_yaml::from_str(content)?)
}

/// Loads a host state snapshot. Files ending in `.yaml`/`.yml` are read as
/// YAML, everything else as JSON.
pub fn load_snapshot(path: &Path) -> Result<StateSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {:?}", path))?;
    let is_yaml = path
        .extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml");

    let file: SnapshotFile = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?
    };

    info!(
        "Loaded {} entity states from '{}'{}",
        file.states.len(),
        path.display(),
        file.captured_at
            .as_deref()
            .map(|at| format!(" (captured {})", at))
            .unwrap_or_default()
    );
    Ok(file.into())
}
