//! Catmull-Rom interpolation of sparse channel readings into a dense curve.
//!
//! Sample wavelengths may be irregularly spaced. Readings must be sorted by
//! ascending wavelength; duplicate wavelengths are not supported and produce
//! an unspecified (but finite) curve.

use crate::{
    error::SpectraError,
    mapping::{normalized_position, REFERENCE_MAX_NM, REFERENCE_MIN_NM},
};
use serde::Serialize;
use spectracard_schemas::channel::ChannelReading;

/// A synthetic sample on the continuous curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterpolatedPoint {
    pub wavelength: f64,
    pub intensity: f64,
    /// Position on the 400-700 nm reference axis, 0 at 400 nm and 1 at 700 nm.
    pub position: f64,
}

#[derive(Debug, Clone, Copy)]
struct Knot {
    wavelength: f64,
    value: f64,
}

fn knots(readings: &[ChannelReading]) -> Vec<Knot> {
    readings
        .iter()
        .filter(|r| r.is_spectral())
        .map(|r| Knot {
            wavelength: r.wavelength,
            value: r.value,
        })
        .collect()
}

/// Evaluates the Catmull-Rom basis for `t` in `[0, 1]` between `v1` and `v2`.
pub fn catmull_rom(v0: f64, v1: f64, v2: f64, v3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * v1)
        + (-v0 + v2) * t
        + (2.0 * v0 - 5.0 * v1 + 4.0 * v2 - v3) * t2
        + (-v0 + 3.0 * v1 - 3.0 * v2 + v3) * t3)
}

/// Index of the first segment whose bounds contain `wavelength`.
///
/// At an exact breakpoint the earlier segment wins.
fn find_segment(knots: &[Knot], wavelength: f64) -> usize {
    knots
        .windows(2)
        .position(|pair| wavelength >= pair[0].wavelength && wavelength <= pair[1].wavelength)
        .unwrap_or(0)
}

fn evaluate(knots: &[Knot], wavelength: f64) -> f64 {
    let last = knots.len() - 1;
    let i1 = find_segment(knots, wavelength);
    let i2 = (i1 + 1).min(last);
    let p0 = knots[i1.saturating_sub(1)];
    let p1 = knots[i1];
    let p2 = knots[i2];
    let p3 = knots[(i1 + 2).min(last)];

    let span = p2.wavelength - p1.wavelength;
    let t = if span == 0.0 {
        0.0
    } else {
        (wavelength - p1.wavelength) / span
    };

    catmull_rom(p0.value, p1.value, p2.value, p3.value, t)
}

/// Value of the spline at a single wavelength.
///
/// Wavelengths outside the sampled span are clamped to the nearest end, so the
/// curve never extrapolates. Returns `None` when there are no spectral readings.
pub fn sample_at(readings: &[ChannelReading], wavelength: f64) -> Option<f64> {
    let knots = knots(readings);
    let first = knots.first()?.wavelength;
    let last = knots.last()?.wavelength;
    Some(evaluate(&knots, wavelength.max(first).min(last)))
}

/// Produces `sample_count + 1` evenly spaced points spanning the readings.
///
/// Auxiliary (broadband) readings are ignored. A single reading yields a flat
/// line across the 400-700 nm reference domain.
pub fn interpolate(
    readings: &[ChannelReading],
    sample_count: usize,
) -> Result<Vec<InterpolatedPoint>, SpectraError> {
    if sample_count == 0 {
        return Err(SpectraError::InvalidSampleCount);
    }
    let knots = knots(readings);
    let (Some(first), Some(last)) = (knots.first(), knots.last()) else {
        return Err(SpectraError::NoReadings);
    };

    let (start, end) = if last.wavelength > first.wavelength {
        (first.wavelength, last.wavelength)
    } else {
        (REFERENCE_MIN_NM, REFERENCE_MAX_NM)
    };

    let points = (0..=sample_count)
        .map(|i| {
            let wavelength = start + (i as f64 / sample_count as f64) * (end - start);
            InterpolatedPoint {
                wavelength,
                intensity: evaluate(&knots, wavelength),
                position: normalized_position(wavelength),
            }
        })
        .collect();

    Ok(points)
}
