//! Card configuration: which host entities feed which channels, and the
//! thresholds used to judge sensor health.

use crate::channel::ChannelKey;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Light Spectrum";
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Host entity ids per channel. A channel is present only when its entity is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelEntities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f6: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f7: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f8: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nir: Option<String>,
}

impl ChannelEntities {
    pub fn get(&self, key: ChannelKey) -> Option<&str> {
        let entity = match key {
            ChannelKey::F1 => &self.f1,
            ChannelKey::F2 => &self.f2,
            ChannelKey::F3 => &self.f3,
            ChannelKey::F4 => &self.f4,
            ChannelKey::F5 => &self.f5,
            ChannelKey::F6 => &self.f6,
            ChannelKey::F7 => &self.f7,
            ChannelKey::F8 => &self.f8,
            ChannelKey::Clear => &self.clear,
            ChannelKey::Nir => &self.nir,
        };
        entity.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Configured narrow-band channels, in ascending wavelength order.
    pub fn core(&self) -> impl Iterator<Item = (ChannelKey, &str)> + '_ {
        ChannelKey::CORE
            .into_iter()
            .filter_map(move |key| self.get(key).map(|id| (key, id)))
    }

    pub fn has_core_channels(&self) -> bool {
        self.core().next().is_some()
    }
}

/// Empirical limits for the sensor health classifier.
///
/// The defaults match the 16-bit ADC range of the AS7341 reference hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Peak value above which flat readings are treated as clipped.
    pub saturation_level: f64,
    /// Coefficient of variation below which readings count as flat.
    pub saturation_cv: f64,
    /// Peak value below which the signal is too weak to be useful.
    pub weak_level: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            saturation_level: 50_000.0,
            saturation_cv: 0.1,
            weak_level: 100.0,
        }
    }
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

/// The complete configuration of one spectrum card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub entities: ChannelEntities,
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Number of interpolation intervals; the curve has one more point.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
}

impl CardConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// An example configuration wiring every channel to a conventionally named sensor.
    pub fn stub() -> Self {
        let sensor = |name: &str| Some(format!("sensor.{name}"));
        Self {
            title: Some(DEFAULT_TITLE.to_string()),
            entities: ChannelEntities {
                f1: sensor("415nm"),
                f2: sensor("445nm"),
                f3: sensor("480nm"),
                f4: sensor("515nm"),
                f5: sensor("555nm"),
                f6: sensor("590nm"),
                f7: sensor("630nm"),
                f8: sensor("680nm"),
                clear: sensor("clear"),
                nir: sensor("nir"),
            },
            thresholds: Thresholds::default(),
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "entities:\n  f1: sensor.violet\n  f4: sensor.green\n";
        let config: CardConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.title(), DEFAULT_TITLE);
        assert_eq!(config.sample_count, DEFAULT_SAMPLE_COUNT);
        assert_eq!(config.thresholds, Thresholds::default());
        let core: Vec<_> = config.entities.core().collect();
        assert_eq!(core, vec![(ChannelKey::F1, "sensor.violet"), (ChannelKey::F4, "sensor.green")]);
    }

    #[test]
    fn partial_thresholds_keep_remaining_defaults() {
        let yaml = "entities: { f2: sensor.a }\nthresholds:\n  weak_level: 250\n";
        let config: CardConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.thresholds.weak_level, 250.0);
        assert_eq!(config.thresholds.saturation_level, 50_000.0);
        assert_eq!(config.thresholds.saturation_cv, 0.1);
    }

    #[test]
    fn blank_entity_ids_are_not_configured() {
        let entities = ChannelEntities {
            f1: Some("  ".to_string()),
            clear: Some("sensor.clear".to_string()),
            ..Default::default()
        };
        assert!(!entities.has_core_channels());
        assert_eq!(entities.get(ChannelKey::Clear), Some("sensor.clear"));
    }

    #[test]
    fn stub_configures_every_channel() {
        let stub = CardConfig::stub();
        assert_eq!(stub.entities.core().count(), 8);
        assert_eq!(stub.entities.get(ChannelKey::Nir), Some("sensor.nir"));
    }
}
