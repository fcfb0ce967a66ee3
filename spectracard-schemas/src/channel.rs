//! Defines the channels of the 8-band spectral sensor and the per-tick reading
//! value object built from them.

use serde::{Deserialize, Serialize};

/// Lower bound of the visible reference domain, in nanometers.
pub const VISIBLE_MIN_NM: f64 = 400.0;
/// Upper bound of the visible reference domain, in nanometers.
pub const VISIBLE_MAX_NM: f64 = 700.0;

/// Logical channel keys as they appear in a card configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    Clear,
    Nir,
}

impl ChannelKey {
    /// The eight narrow-band channels, ordered by ascending wavelength.
    pub const CORE: [ChannelKey; 8] = [
        ChannelKey::F1,
        ChannelKey::F2,
        ChannelKey::F3,
        ChannelKey::F4,
        ChannelKey::F5,
        ChannelKey::F6,
        ChannelKey::F7,
        ChannelKey::F8,
    ];

    /// Broadband channels reported only as standalone values.
    pub const AUXILIARY: [ChannelKey; 2] = [ChannelKey::Clear, ChannelKey::Nir];

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            ChannelKey::F1 => "F1",
            ChannelKey::F2 => "F2",
            ChannelKey::F3 => "F3",
            ChannelKey::F4 => "F4",
            ChannelKey::F5 => "F5",
            ChannelKey::F6 => "F6",
            ChannelKey::F7 => "F7",
            ChannelKey::F8 => "F8",
            ChannelKey::Clear => "Clear",
            ChannelKey::Nir => "NIR",
        }
    }

    /// Center wavelength in nm. Clear is broadband and carries 0.
    pub const fn wavelength_nm(self) -> f64 {
        match self {
            ChannelKey::F1 => 415.0,
            ChannelKey::F2 => 445.0,
            ChannelKey::F3 => 480.0,
            ChannelKey::F4 => 515.0,
            ChannelKey::F5 => 555.0,
            ChannelKey::F6 => 590.0,
            ChannelKey::F7 => 630.0,
            ChannelKey::F8 => 680.0,
            ChannelKey::Clear => 0.0,
            ChannelKey::Nir => 910.0,
        }
    }

    /// Looks a key up by its display label, as carried in `ChannelReading::name`.
    pub fn from_label(label: &str) -> Option<ChannelKey> {
        ChannelKey::CORE
            .into_iter()
            .chain(ChannelKey::AUXILIARY)
            .find(|key| key.label() == label)
    }

    /// RGB color for per-channel markers and value labels.
    pub const fn display_color(self) -> (u8, u8, u8) {
        match self {
            ChannelKey::F1 => (0x8B, 0x00, 0xFF),
            ChannelKey::F2 => (0x41, 0x69, 0xE1),
            ChannelKey::F3 => (0x00, 0xBF, 0xFF),
            ChannelKey::F4 => (0x00, 0xFF, 0x00),
            ChannelKey::F5 => (0x9A, 0xCD, 0x32),
            ChannelKey::F6 => (0xFF, 0xD7, 0x00),
            ChannelKey::F7 => (0xFF, 0x8C, 0x00),
            ChannelKey::F8 => (0xFF, 0x00, 0x00),
            ChannelKey::Clear => (0xFF, 0xFF, 0xFF),
            ChannelKey::Nir => (0x8B, 0x00, 0x00),
        }
    }

    pub const fn is_auxiliary(self) -> bool {
        matches!(self, ChannelKey::Clear | ChannelKey::Nir)
    }

    pub const fn kind(self) -> ChannelKind {
        if self.is_auxiliary() {
            ChannelKind::Broadband
        } else {
            ChannelKind::Spectral
        }
    }
}

/// Whether a channel is wavelength-localized or broadband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Spectral,
    Broadband,
}

/// One physical sensor channel, resolved for a single update tick.
///
/// Readings are rebuilt on every tick and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelReading {
    /// Short label (e.g. "F1").
    pub name: String,
    /// Center wavelength in nanometers.
    pub wavelength: f64,
    /// Intensity in source units; 0 when the upstream value was unusable.
    pub value: f64,
    /// Display unit, possibly empty.
    pub unit: String,
    /// True only if the upstream state was a valid number.
    pub available: bool,
    pub kind: ChannelKind,
}

impl ChannelReading {
    /// Builds a reading for one of the sensor's fixed channels.
    pub fn from_key(key: ChannelKey, value: f64, unit: impl Into<String>, available: bool) -> Self {
        Self {
            name: key.label().to_string(),
            wavelength: key.wavelength_nm(),
            value,
            unit: unit.into(),
            available,
            kind: key.kind(),
        }
    }

    /// Builds an available spectral reading at an arbitrary wavelength.
    pub fn spectral(name: impl Into<String>, wavelength: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            wavelength,
            value,
            unit: String::new(),
            available: true,
            kind: ChannelKind::Spectral,
        }
    }

    pub fn is_spectral(&self) -> bool {
        self.kind == ChannelKind::Spectral
    }

    /// True when the wavelength falls in the 400-700 nm visible band.
    pub fn is_visible(&self) -> bool {
        (VISIBLE_MIN_NM..=VISIBLE_MAX_NM).contains(&self.wavelength)
    }
}
