//! Sensor health classification from raw channel values.
//!
//! Rules are evaluated in priority order and the first match wins:
//!
//! 1. **Dark** - no channel reads above zero.
//! 2. **Saturated** - readings are nearly uniform (low coefficient of
//!    variation) and the peak sits near the ADC ceiling. A real spectrum has
//!    channel-to-channel variation, so flat high readings indicate clipping.
//! 3. **Weak** - the peak is too low to be useful.
//! 4. **Nominal** - no advisory.

use serde::Serialize;
use spectracard_schemas::{channel::ChannelReading, config::Thresholds};

pub const DARK_MESSAGE: &str = "No light detected. Ensure sensor is exposed to light source.";
pub const SATURATED_MESSAGE: &str =
    "Sensors may be saturated! Reduce gain or integration time (atime).";
pub const WEAK_MESSAGE: &str = "Signal weak. Increase gain or integration time (atime).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Dark,
    Weak,
    Saturated,
    Nominal,
}

/// How prominently an advisory should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

impl HealthState {
    pub fn message(self) -> Option<&'static str> {
        match self {
            HealthState::Dark => Some(DARK_MESSAGE),
            HealthState::Saturated => Some(SATURATED_MESSAGE),
            HealthState::Weak => Some(WEAK_MESSAGE),
            HealthState::Nominal => None,
        }
    }

    pub fn severity(self) -> Option<Severity> {
        match self {
            HealthState::Dark | HealthState::Weak => Some(Severity::Info),
            HealthState::Saturated => Some(Severity::Warning),
            HealthState::Nominal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub state: HealthState,
    pub message: Option<String>,
}

impl From<HealthState> for Classification {
    fn from(state: HealthState) -> Self {
        Self {
            state,
            message: state.message().map(str::to_string),
        }
    }
}

/// Summary statistics over the positive channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStatistics {
    pub count: usize,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
}

impl ChannelStatistics {
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let n = count as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            max,
            min,
            mean,
            variance,
            std_dev,
            coefficient_of_variation: std_dev / mean,
        })
    }

    /// Statistics over the spectral readings whose value is strictly positive.
    pub fn from_readings(readings: &[ChannelReading]) -> Option<Self> {
        let values: Vec<f64> = readings
            .iter()
            .filter(|r| r.is_spectral())
            .map(|r| r.value)
            .filter(|v| *v > 0.0)
            .collect();
        Self::from_values(&values)
    }
}

pub fn classify(readings: &[ChannelReading]) -> Classification {
    classify_with(readings, &Thresholds::default())
}

pub fn classify_with(readings: &[ChannelReading], thresholds: &Thresholds) -> Classification {
    health_state(ChannelStatistics::from_readings(readings).as_ref(), thresholds).into()
}

/// Applies the threshold rules to precomputed statistics.
pub fn health_state(stats: Option<&ChannelStatistics>, thresholds: &Thresholds) -> HealthState {
    let Some(stats) = stats else {
        return HealthState::Dark;
    };

    if stats.coefficient_of_variation < thresholds.saturation_cv
        && stats.max > thresholds.saturation_level
    {
        HealthState::Saturated
    } else if stats.max < thresholds.weak_level {
        HealthState::Weak
    } else {
        HealthState::Nominal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectracard_schemas::channel::ChannelKey;

    fn readings(values: [f64; 8]) -> Vec<ChannelReading> {
        ChannelKey::CORE
            .iter()
            .zip(values)
            .map(|(key, value)| ChannelReading::from_key(*key, value, "", true))
            .collect()
    }

    #[test]
    fn all_zero_is_dark() {
        let result = classify(&readings([0.0; 8]));
        assert_eq!(result.state, HealthState::Dark);
        assert_eq!(result.message.as_deref(), Some(DARK_MESSAGE));
    }

    #[test]
    fn flat_high_readings_are_saturated() {
        let values = [60000.0, 60500.0, 59800.0, 60200.0, 60100.0, 59900.0, 60300.0, 60050.0];
        let stats = ChannelStatistics::from_readings(&readings(values)).unwrap();
        assert!(stats.coefficient_of_variation < 0.01);

        let result = classify(&readings(values));
        assert_eq!(result.state, HealthState::Saturated);
        assert_eq!(result.state.severity(), Some(Severity::Warning));
    }

    #[test]
    fn low_peak_is_weak() {
        let result = classify(&readings([10.0, 20.0, 15.0, 5.0, 8.0, 12.0, 18.0, 9.0]));
        assert_eq!(result.state, HealthState::Weak);
        assert_eq!(result.state.severity(), Some(Severity::Info));
    }

    #[test]
    fn varied_spectrum_is_nominal() {
        let result = classify(&readings([500.0, 1200.0, 3000.0, 8000.0, 6000.0, 2000.0, 900.0, 300.0]));
        assert_eq!(result.state, HealthState::Nominal);
        assert!(result.message.is_none());
    }

    #[test]
    fn statistics_ignore_non_positive_values() {
        let stats =
            ChannelStatistics::from_readings(&readings([0.0, 2.0, 0.0, 4.0, -1.0, 0.0, 6.0, 0.0]))
                .unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert!((stats.mean - 4.0).abs() < 1e-12);
        assert!((stats.variance - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn flat_readings_below_the_ceiling_are_not_saturated() {
        let result = classify(&readings([40_000.0; 8]));
        assert_eq!(result.state, HealthState::Nominal);
    }

    #[test]
    fn configured_thresholds_override_defaults() {
        let thresholds = Thresholds {
            weak_level: 10_000.0,
            ..Thresholds::default()
        };
        let values = [500.0, 1200.0, 3000.0, 8000.0, 6000.0, 2000.0, 900.0, 300.0];
        assert_eq!(classify_with(&readings(values), &thresholds).state, HealthState::Weak);
    }

    #[test]
    fn saturation_outranks_weak_signal_when_both_match() {
        let thresholds = Thresholds {
            saturation_level: 10.0,
            weak_level: 100.0,
            ..Thresholds::default()
        };
        let input = readings([50.0; 8]);
        let stats = ChannelStatistics::from_readings(&input);
        assert_eq!(health_state(stats.as_ref(), &thresholds), HealthState::Saturated);
        assert_eq!(
            classify_with(&input, &thresholds).message.as_deref(),
            Some(SATURATED_MESSAGE)
        );
    }

    #[test]
    fn auxiliary_channels_are_not_classified() {
        let mut input = readings([0.0; 8]);
        input.push(ChannelReading::from_key(ChannelKey::Clear, 30_000.0, "", true));
        assert_eq!(classify(&input).state, HealthState::Dark);
    }
}
