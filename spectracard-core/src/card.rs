use crate::{
    classifier::{self, Classification},
    error::SpectraError,
    interpolate::{self, InterpolatedPoint},
    mapping,
    par::{self, ParAggregate},
    resolve::{self, StateLookup},
};
use serde::Serialize;
use spectracard_schemas::{channel::ChannelReading, config::CardConfig};
use tracing::debug;

pub const CARD_TYPE: &str = "spectrum-card";

/// Upper bound on `sample_count`; the curve holds `sample_count + 1` points.
pub const MAX_SAMPLE_COUNT: usize = 10_000;

/// Descriptor handed to the host once, when the card type is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRegistration {
    pub card_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn registration() -> CardRegistration {
    CardRegistration {
        card_type: CARD_TYPE,
        name: "Spectrum Card",
        description: "Display 8-channel spectral sensor data as a spectrum chart",
    }
}

/// Everything the presentation shell needs to draw one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardFrame {
    pub tick: u64,
    pub title: String,
    /// Narrow-band readings in wavelength order, for per-channel labels.
    pub readings: Vec<ChannelReading>,
    pub curve: Vec<InterpolatedPoint>,
    /// Vertical scale divisor, at least 1.
    pub peak: f64,
    pub classification: Classification,
    pub par: ParAggregate,
    pub clear: Option<ChannelReading>,
    pub nir: Option<ChannelReading>,
}

/// A configured spectrum card.
///
/// Holds the configuration and the last broadband readings; every other value
/// is rebuilt from scratch on each update.
#[derive(Debug, Clone)]
pub struct SpectrumCard {
    config: CardConfig,
    tick: u64,
    clear: Option<ChannelReading>,
    nir: Option<ChannelReading>,
}

impl SpectrumCard {
    /// Validates `config` and returns a card ready for updates.
    ///
    /// # Errors
    ///
    /// Returns a `SpectraError` if no narrow-band channel is configured, the
    /// sample count is zero or above `MAX_SAMPLE_COUNT`, or a threshold is
    /// negative or not a number.
    pub fn configure(config: CardConfig) -> Result<Self, SpectraError> {
        if !config.entities.has_core_channels() {
            return Err(SpectraError::NoChannelsConfigured);
        }
        if config.sample_count == 0 {
            return Err(SpectraError::InvalidSampleCount);
        }
        if config.sample_count > MAX_SAMPLE_COUNT {
            return Err(SpectraError::ConfigError(format!(
                "sample_count {} exceeds the maximum of {}",
                config.sample_count, MAX_SAMPLE_COUNT
            )));
        }
        let thresholds = &config.thresholds;
        for (name, value) in [
            ("saturation_level", thresholds.saturation_level),
            ("saturation_cv", thresholds.saturation_cv),
            ("weak_level", thresholds.weak_level),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(SpectraError::ConfigError(format!(
                    "threshold '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            config,
            tick: 0,
            clear: None,
            nir: None,
        })
    }

    pub fn title(&self) -> &str {
        self.config.title()
    }

    pub fn clear(&self) -> Option<&ChannelReading> {
        self.clear.as_ref()
    }

    pub fn nir(&self) -> Option<&ChannelReading> {
        self.nir.as_ref()
    }

    /// Runs the full pipeline against the host's current state.
    pub fn on_readings_updated<L: StateLookup + ?Sized>(
        &mut self,
        states: &L,
    ) -> Result<CardFrame, SpectraError> {
        let resolved = resolve::resolve_channels(&self.config.entities, states);
        self.clear = resolved.clear;
        self.nir = resolved.nir;

        let readings = resolved.spectral;
        let curve = interpolate::interpolate(&readings, self.config.sample_count)?;
        let classification = classifier::classify_with(&readings, &self.config.thresholds);
        let par = par::compute_par(&readings);
        let peak = mapping::peak_intensity(&readings);

        self.tick += 1;
        debug!(
            tick = self.tick,
            channels = readings.len(),
            state = ?classification.state,
            par_total = par.total,
            "card updated"
        );

        Ok(CardFrame {
            tick: self.tick,
            title: self.title().to_string(),
            readings,
            curve,
            peak,
            classification,
            par,
            clear: self.clear.clone(),
            nir: self.nir.clone(),
        })
    }
}
