//! Photosynthetically Active Radiation, approximated as the sum and mean of
//! the readings whose wavelength lies in 400-700 nm.

use serde::Serialize;
use spectracard_schemas::channel::ChannelReading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParAggregate {
    pub total: f64,
    /// `NaN` when no channel contributed; check [`ParAggregate::is_defined`].
    pub average: f64,
    pub channel_count: usize,
}

impl ParAggregate {
    pub fn is_defined(&self) -> bool {
        self.channel_count > 0
    }
}

pub fn compute_par(readings: &[ChannelReading]) -> ParAggregate {
    let (total, channel_count) = readings
        .iter()
        .filter(|r| r.is_visible())
        .fold((0.0, 0usize), |(sum, n), r| (sum + r.value, n + 1));

    ParAggregate {
        total,
        average: total / channel_count as f64,
        channel_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectracard_schemas::channel::ChannelKey;

    #[test]
    fn sums_and_averages_core_channels() {
        let readings: Vec<_> = ChannelKey::CORE
            .iter()
            .zip([100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0])
            .map(|(key, value)| ChannelReading::from_key(*key, value, "", true))
            .collect();

        let par = compute_par(&readings);
        assert_eq!(par.total, 3600.0);
        assert_eq!(par.average, 450.0);
        assert_eq!(par.channel_count, 8);
    }

    #[test]
    fn zero_channels_leave_the_average_undefined() {
        let par = compute_par(&[]);
        assert_eq!(par.total, 0.0);
        assert!(par.average.is_nan());
        assert!(!par.is_defined());
    }

    #[test]
    fn readings_outside_the_band_are_excluded() {
        let readings = vec![
            ChannelReading::spectral("uv", 380.0, 1000.0),
            ChannelReading::spectral("edge", 700.0, 10.0),
            ChannelReading::spectral("start", 400.0, 30.0),
        ];
        let par = compute_par(&readings);
        assert_eq!(par.total, 40.0);
        assert_eq!(par.average, 20.0);
    }
}
