use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute name carrying an entity's display unit.
pub const UNIT_ATTRIBUTE: &str = "unit_of_measurement";

/// The live state of a single host entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub state: String,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EntityState {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.attributes
            .insert(UNIT_ATTRIBUTE.to_string(), serde_json::Value::String(unit.into()));
        self
    }

    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.attributes.get(UNIT_ATTRIBUTE).and_then(|v| v.as_str())
    }
}

/// A point-in-time view of the host's entity states, keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub states: HashMap<String, EntityState>,
}

impl StateSnapshot {
    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.states.insert(entity_id.into(), state);
    }
}
