//! Wavelength-to-position mapping over a fixed 400-700 nm reference domain.
//!
//! The domain is fixed rather than derived from the configured channels so that
//! axis labels stay anchored to visible light regardless of which channels exist.

use crate::interpolate::InterpolatedPoint;
use serde::Serialize;
use spectracard_schemas::channel::{ChannelReading, VISIBLE_MAX_NM, VISIBLE_MIN_NM};

pub const REFERENCE_MIN_NM: f64 = VISIBLE_MIN_NM;
pub const REFERENCE_MAX_NM: f64 = VISIBLE_MAX_NM;

/// Affine map from wavelength to a position along an axis.
///
/// Wavelengths outside 400-700 nm land outside
/// `[origin_offset, origin_offset + axis_length]`; callers clip if needed.
pub fn wavelength_to_position(wavelength: f64, axis_length: f64, origin_offset: f64) -> f64 {
    let ratio = (wavelength - REFERENCE_MIN_NM) / (REFERENCE_MAX_NM - REFERENCE_MIN_NM);
    origin_offset + ratio * axis_length
}

/// Position on a unit axis: 0 at 400 nm, 1 at 700 nm.
pub fn normalized_position(wavelength: f64) -> f64 {
    wavelength_to_position(wavelength, 1.0, 0.0)
}

/// Divisor for vertical scaling: the largest reading, but never below 1.
pub fn peak_intensity(readings: &[ChannelReading]) -> f64 {
    readings
        .iter()
        .filter(|r| r.is_spectral())
        .map(|r| r.value)
        .fold(1.0, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub wavelength: f64,
    pub x: f64,
}

/// A rectangular chart with uniform padding around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ChartArea {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }

    /// Y coordinate of the horizontal axis.
    pub fn baseline(&self) -> f64 {
        self.padding + self.plot_height()
    }

    pub fn x_for(&self, wavelength: f64) -> f64 {
        wavelength_to_position(wavelength, self.plot_width(), self.padding)
    }

    /// Screen y grows downward, so larger intensities map closer to the top.
    pub fn y_for(&self, intensity: f64, peak: f64) -> f64 {
        self.baseline() - (intensity / peak) * self.plot_height()
    }

    pub fn project(&self, curve: &[InterpolatedPoint], peak: f64) -> Vec<(f64, f64)> {
        curve
            .iter()
            .map(|p| (self.x_for(p.wavelength), self.y_for(p.intensity, peak)))
            .collect()
    }

    /// Tick marks every `step` nm across the reference domain, inclusive.
    pub fn wavelength_ticks(&self, step: f64) -> Vec<AxisTick> {
        if step.is_nan() || step <= 0.0 {
            return Vec::new();
        }
        let count = ((REFERENCE_MAX_NM - REFERENCE_MIN_NM) / step).floor() as usize;
        (0..=count)
            .map(|i| {
                let wavelength = REFERENCE_MIN_NM + i as f64 * step;
                AxisTick {
                    wavelength,
                    x: self.x_for(wavelength),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn reference_bounds_map_to_axis_ends() {
        assert!((wavelength_to_position(400.0, 700.0, 50.0) - 50.0).abs() < EPS);
        assert!((wavelength_to_position(700.0, 700.0, 50.0) - 750.0).abs() < EPS);
    }

    #[test]
    fn equal_wavelength_steps_give_equal_position_steps() {
        let step = |a: f64, b: f64| wavelength_to_position(b, 320.0, 12.0) - wavelength_to_position(a, 320.0, 12.0);
        assert!((step(415.0, 445.0) - step(600.0, 630.0)).abs() < EPS);
    }

    #[test]
    fn out_of_domain_wavelengths_are_not_clamped() {
        assert!(wavelength_to_position(350.0, 300.0, 0.0) < 0.0);
        assert!(normalized_position(910.0) > 1.0);
    }

    #[test]
    fn chart_projects_peak_to_the_top_of_the_plot() {
        let chart = ChartArea::new(800.0, 300.0, 50.0);
        assert!((chart.y_for(0.0, 10.0) - 250.0).abs() < EPS);
        assert!((chart.y_for(10.0, 10.0) - 50.0).abs() < EPS);
        assert!((chart.x_for(550.0) - 400.0).abs() < EPS);
    }

    #[test]
    fn ticks_cover_the_visible_band_every_fifty_nm() {
        let chart = ChartArea::new(400.0, 200.0, 50.0);
        let ticks: Vec<f64> = chart.wavelength_ticks(50.0).iter().map(|t| t.wavelength).collect();
        assert_eq!(ticks, vec![400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0]);
        assert!(chart.wavelength_ticks(0.0).is_empty());
    }

    #[test]
    fn peak_never_drops_below_one() {
        let dark = vec![ChannelReading::spectral("F1", 415.0, 0.0)];
        assert_eq!(peak_intensity(&dark), 1.0);
        let lit = vec![
            ChannelReading::spectral("F1", 415.0, 40.0),
            ChannelReading::spectral("F2", 445.0, 90.0),
        ];
        assert_eq!(peak_intensity(&lit), 90.0);
    }
}
