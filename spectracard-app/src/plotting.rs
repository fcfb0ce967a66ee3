//! Draws a card frame as a spectrum chart PNG.
//!
//! All coordinates come from `ChartArea`, so the curve, the wavelength ticks
//! and the channel markers share one wavelength-to-pixel mapping. The rainbow
//! fill is illustrative only; it is not a calibrated rendering of the spectrum.

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use spectracard_core::{card::CardFrame, classifier::Severity, mapping::ChartArea};
use spectracard_schemas::channel::{ChannelKey, ChannelReading};
use std::path::Path;

type GradientStop = (f64, (u8, u8, u8));

const BACKGROUND_STOPS: [GradientStop; 8] = [
    (0.0, (138, 43, 226)),
    (0.15, (100, 149, 237)),
    (0.3, (135, 206, 235)),
    (0.45, (144, 238, 144)),
    (0.55, (255, 255, 224)),
    (0.7, (255, 218, 185)),
    (0.85, (255, 192, 203)),
    (1.0, (255, 182, 193)),
];
const BACKGROUND_ALPHA: f64 = 0.12;

const SPECTRUM_STOPS: [GradientStop; 10] = [
    (0.0, (138, 43, 226)),
    (0.15, (75, 0, 130)),
    (0.25, (0, 0, 255)),
    (0.4, (0, 191, 255)),
    (0.5, (0, 255, 0)),
    (0.6, (173, 255, 47)),
    (0.7, (255, 255, 0)),
    (0.8, (255, 165, 0)),
    (0.9, (255, 69, 0)),
    (1.0, (255, 0, 0)),
];
const SPECTRUM_ALPHA: f64 = 0.85;

const WARNING_COLOR: RGBColor = RGBColor(255, 152, 0);
const INFO_COLOR: RGBColor = RGBColor(33, 150, 243);
const TICK_STEP_NM: f64 = 50.0;

/// Linear blend between the two stops surrounding `ratio` (clamped to 0..=1).
pub fn gradient_color(stops: &[GradientStop], ratio: f64) -> (u8, u8, u8) {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let Some(&(_, first)) = stops.first() else {
        return (0, 0, 0);
    };

    for pair in stops.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        if ratio <= end {
            let t = if end > start { (ratio - start) / (end - start) } else { 0.0 };
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            return (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2));
        }
    }

    stops.last().map_or(first, |&(_, color)| color)
}

/// Y of a projected polyline at `x`, linearly interpolated between vertices.
fn polyline_y(points: &[(f64, f64)], x: f64) -> Option<f64> {
    points.windows(2).find_map(|pair| {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x < x0 || x > x1 {
            return None;
        }
        if x1 == x0 {
            return Some(y0);
        }
        Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    })
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> RGBAColor {
    RGBAColor(r, g, b, alpha)
}

fn channel_color(reading: &ChannelReading) -> RGBColor {
    ChannelKey::from_label(&reading.name)
        .map(ChannelKey::display_color)
        .map_or(BLACK, |(r, g, b)| RGBColor(r, g, b))
}

/// Renders one frame to `path`.
pub fn render_spectrum(path: &Path, frame: &CardFrame, chart: &ChartArea) -> Result<()> {
    let width = chart.width.round() as u32;
    let height = chart.height.round() as u32;
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let left = chart.padding.round() as i32;
    let right = (chart.padding + chart.plot_width()).round() as i32;
    let top = chart.padding.round() as i32;
    let bottom = chart.baseline().round() as i32;
    let span = (right - left).max(1) as f64;

    // Soft pastel backdrop across the whole plot.
    for x in left..right {
        let color = gradient_color(&BACKGROUND_STOPS, (x - left) as f64 / span);
        root.draw(&Rectangle::new(
            [(x, top), (x + 1, bottom)],
            rgba(color, BACKGROUND_ALPHA).filled(),
        ))?;
    }

    // Area under the curve, one pixel column at a time.
    let projected = chart.project(&frame.curve, frame.peak);
    if let (Some(&(first_x, _)), Some(&(last_x, _))) = (projected.first(), projected.last()) {
        for x in first_x.round() as i32..last_x.round() as i32 {
            let Some(y) = polyline_y(&projected, x as f64 + 0.5) else {
                continue;
            };
            let color = gradient_color(&SPECTRUM_STOPS, (x - left) as f64 / span);
            root.draw(&Rectangle::new(
                [(x, y.round() as i32), (x + 1, bottom)],
                rgba(color, SPECTRUM_ALPHA).filled(),
            ))?;
        }
    }

    let outline: Vec<(i32, i32)> = projected
        .iter()
        .map(|&(x, y)| (x.round() as i32, y.round() as i32))
        .collect();
    root.draw(&PathElement::new(outline, RGBAColor(40, 40, 40, 0.6).stroke_width(2)))?;

    let value_style = TextStyle::from(("sans-serif", 10).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for reading in &frame.readings {
        let color = channel_color(reading);
        let center = (
            chart.x_for(reading.wavelength).round() as i32,
            chart.y_for(reading.value, frame.peak).round() as i32,
        );
        root.draw(&Circle::new(center, 4, color.filled()))?;
        root.draw(&Circle::new(center, 4, BLACK.stroke_width(1)))?;
        if reading.available {
            root.draw_text(
                &format!("{:.0}", reading.value),
                &value_style.color(&color),
                (center.0, center.1 - 6),
            )?;
        }
    }

    // Axes.
    root.draw(&PathElement::new(
        vec![(left, top), (left, bottom), (right, bottom)],
        BLACK.stroke_width(1),
    ))?;

    let tick_style = TextStyle::from(("sans-serif", 10).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for tick in chart.wavelength_ticks(TICK_STEP_NM) {
        root.draw_text(
            &format!("{}", tick.wavelength as i32),
            &tick_style,
            (tick.x.round() as i32, height as i32 - 15),
        )?;
    }

    let axis_title = TextStyle::from(("sans-serif", 12).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    root.draw_text("Wavelength (nm)", &axis_title, (width as i32 / 2, height as i32 - 2))?;
    root.draw_text(
        "Relative Intensity",
        &axis_title.transform(FontTransform::Rotate270),
        (12, height as i32 / 2),
    )?;

    let title_style = TextStyle::from(("sans-serif", 16).into_font()).color(&BLACK);
    root.draw_text(&frame.title, &title_style, (left, 6))?;

    let par_text = if frame.par.is_defined() {
        format!("PAR (400-700nm)  Total: {:.1} | Average: {:.1}", frame.par.total, frame.par.average)
    } else {
        "PAR (400-700nm)  n/a".to_string()
    };
    let par_style = TextStyle::from(("sans-serif", 12).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Top));
    root.draw_text(&par_text, &par_style, (right, 8))?;

    if let (Some(message), Some(severity)) = (
        frame.classification.message.as_deref(),
        frame.classification.state.severity(),
    ) {
        let banner = match severity {
            Severity::Warning => WARNING_COLOR,
            Severity::Info => INFO_COLOR,
        };
        root.draw(&Rectangle::new([(left, 26), (right, 44)], banner.filled()))?;
        let banner_text = TextStyle::from(("sans-serif", 12).into_font())
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw_text(message, &banner_text, ((left + right) / 2, 35))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_hits_stops_and_blends_between_them() {
        assert_eq!(gradient_color(&SPECTRUM_STOPS, 0.0), (138, 43, 226));
        assert_eq!(gradient_color(&SPECTRUM_STOPS, 1.0), (255, 0, 0));
        assert_eq!(gradient_color(&SPECTRUM_STOPS, 0.925), (255, 52, 0));
        assert_eq!(gradient_color(&SPECTRUM_STOPS, 7.0), (255, 0, 0));
        assert_eq!(gradient_color(&[], 0.5), (0, 0, 0));
    }

    #[test]
    fn channel_markers_use_the_channel_color() {
        let f1 = ChannelReading::from_key(ChannelKey::F1, 10.0, "", true);
        assert_eq!(channel_color(&f1), RGBColor(139, 0, 255));
        let unknown = ChannelReading::spectral("custom", 500.0, 10.0);
        assert_eq!(channel_color(&unknown), BLACK);
    }

    #[test]
    fn polyline_is_interpolated_between_vertices() {
        let points = [(0.0, 10.0), (10.0, 30.0), (20.0, 30.0)];
        assert_eq!(polyline_y(&points, 5.0), Some(20.0));
        assert_eq!(polyline_y(&points, 15.0), Some(30.0));
        assert_eq!(polyline_y(&points, 25.0), None);
    }
}
