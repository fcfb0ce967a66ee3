//! Resolves host entity states into channel readings.
//!
//! Every failure mode (missing entity, `unknown`, `unavailable`, a state that
//! is not a finite number) collapses to a value of 0 with `available = false`.
//! Nothing here returns an error.

use spectracard_schemas::{
    channel::{ChannelKey, ChannelReading},
    config::ChannelEntities,
    host::{EntityState, StateSnapshot},
};
use std::collections::HashMap;
use tracing::debug;

pub const UNKNOWN_STATE: &str = "unknown";
pub const UNAVAILABLE_STATE: &str = "unavailable";

/// Read access to the host's live entity states.
pub trait StateLookup {
    fn entity(&self, entity_id: &str) -> Option<&EntityState>;
}

impl StateLookup for StateSnapshot {
    fn entity(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }
}

impl StateLookup for HashMap<String, EntityState> {
    fn entity(&self, entity_id: &str) -> Option<&EntityState> {
        self.get(entity_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub value: f64,
    pub unit: String,
    pub available: bool,
}

/// Parses an entity's state into a numeric value.
pub fn resolve_entity(entity: Option<&EntityState>) -> ResolvedValue {
    let Some(entity) = entity else {
        return ResolvedValue {
            value: 0.0,
            unit: String::new(),
            available: false,
        };
    };

    let unit = entity.unit_of_measurement().unwrap_or_default().to_string();
    let parsed = match entity.state.trim() {
        UNKNOWN_STATE | UNAVAILABLE_STATE => None,
        state => state.parse::<f64>().ok().filter(|v| v.is_finite()),
    };

    match parsed {
        Some(value) => ResolvedValue {
            value,
            unit,
            available: true,
        },
        None => ResolvedValue {
            value: 0.0,
            unit,
            available: false,
        },
    }
}

pub fn resolve_channel<L: StateLookup + ?Sized>(
    key: ChannelKey,
    entity_id: &str,
    lookup: &L,
) -> ChannelReading {
    let resolved = resolve_entity(lookup.entity(entity_id));
    debug!(
        channel = key.label(),
        entity_id,
        value = resolved.value,
        available = resolved.available,
        "resolved channel"
    );
    ChannelReading::from_key(key, resolved.value, resolved.unit, resolved.available)
}

/// Channel readings for one update tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChannels {
    /// Configured narrow-band channels, ascending by wavelength.
    pub spectral: Vec<ChannelReading>,
    pub clear: Option<ChannelReading>,
    pub nir: Option<ChannelReading>,
}

pub fn resolve_channels<L: StateLookup + ?Sized>(
    entities: &ChannelEntities,
    lookup: &L,
) -> ResolvedChannels {
    let spectral = entities
        .core()
        .map(|(key, entity_id)| resolve_channel(key, entity_id, lookup))
        .collect();

    let auxiliary = |key: ChannelKey| {
        entities
            .get(key)
            .map(|entity_id| resolve_channel(key, entity_id, lookup))
    };

    ResolvedChannels {
        spectral,
        clear: auxiliary(ChannelKey::Clear),
        nir: auxiliary(ChannelKey::Nir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, EntityState)]) -> StateSnapshot {
        let mut snapshot = StateSnapshot::default();
        for (id, state) in entries {
            snapshot.insert(*id, state.clone());
        }
        snapshot
    }

    #[test]
    fn numeric_state_is_available() {
        let state = EntityState::new(" 1234.5 ").with_unit("counts");
        let resolved = resolve_entity(Some(&state));
        assert_eq!(resolved.value, 1234.5);
        assert_eq!(resolved.unit, "counts");
        assert!(resolved.available);
    }

    #[test]
    fn unusable_states_resolve_to_zero() {
        for raw in [UNKNOWN_STATE, UNAVAILABLE_STATE, "", "bright", "NaN", "inf"] {
            let resolved = resolve_entity(Some(&EntityState::new(raw).with_unit("lx")));
            assert_eq!(resolved.value, 0.0, "state {raw:?}");
            assert!(!resolved.available, "state {raw:?}");
            assert_eq!(resolved.unit, "lx");
        }

        let missing = resolve_entity(None);
        assert_eq!(missing.value, 0.0);
        assert!(!missing.available);
        assert!(missing.unit.is_empty());
    }

    #[test]
    fn only_configured_channels_are_resolved_in_wavelength_order() {
        let entities = ChannelEntities {
            f6: Some("sensor.orange".to_string()),
            f2: Some("sensor.blue".to_string()),
            nir: Some("sensor.nir".to_string()),
            ..Default::default()
        };
        let states = snapshot(&[
            ("sensor.blue", EntityState::new("20")),
            ("sensor.orange", EntityState::new("unavailable")),
            ("sensor.nir", EntityState::new("7")),
        ]);

        let resolved = resolve_channels(&entities, &states);

        let names: Vec<&str> = resolved.spectral.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["F2", "F6"]);
        assert_eq!(resolved.spectral[0].value, 20.0);
        assert!(!resolved.spectral[1].available);
        assert!(resolved.clear.is_none());
        assert_eq!(resolved.nir.map(|r| r.value), Some(7.0));
    }
}
