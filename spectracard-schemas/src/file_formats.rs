use crate::{config::CardConfig, host::EntityState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Version written by `spectracard stub` and expected when loading.
pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct CardFile {
    pub schema_version: String,
    pub card: CardConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    pub states: HashMap<String, EntityState>,
}

impl From<SnapshotFile> for crate::host::StateSnapshot {
    fn from(file: SnapshotFile) -> Self {
        Self { states: file.states }
    }
}
