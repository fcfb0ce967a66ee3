use crate::config;
use crate::plotting;
use anyhow::{Context, Result};
use spectracard_core::{
    card::{CardFrame, SpectrumCard},
    export,
    mapping::ChartArea,
};
use spectracard_schemas::channel::ChannelReading;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Pixel geometry of the rendered chart.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

impl RenderOptions {
    fn chart_area(&self) -> ChartArea {
        ChartArea::new(self.width as f64, self.height as f64, self.padding as f64)
    }
}

/// Renders every snapshot through one card, in order, into a fresh run directory.
///
/// Each snapshot is one update tick. Returns the run directory.
pub fn run_render(
    card_path: &Path,
    snapshot_paths: &[PathBuf],
    output_root: &Path,
    options: &RenderOptions,
) -> Result<PathBuf> {
    let card_file = config::load_card(card_path)?;
    let mut card = SpectrumCard::configure(card_file.card)
        .with_context(|| format!("Invalid card configuration in {:?}", card_path))?;

    let output_dir = output_root.join(format!(
        "spectrum_{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    // Copy the card file next to the results for traceability
    fs::copy(card_path, output_dir.join("card.yaml"))
        .with_context(|| format!("Failed to copy {:?} into {:?}", card_path, output_dir))?;

    let chart = options.chart_area();
    for snapshot_path in snapshot_paths {
        let states = config::load_snapshot(snapshot_path)?;
        let frame = card.on_readings_updated(&states)?;
        let tick = frame.tick;

        if let Some(message) = &frame.classification.message {
            warn!("Tick {}: {}", tick, message);
        }

        export::write_curve_csv(&output_dir.join(format!("curve_{}.csv", tick)), &frame.curve)?;
        export::write_frame_json(&output_dir.join(format!("frame_{}.json", tick)), &frame)?;
        plotting::render_spectrum(&output_dir.join(format!("spectrum_{}.png", tick)), &frame, &chart)
            .with_context(|| format!("Failed to render chart for tick {}", tick))?;
        info!("Tick {} rendered from '{}'", tick, snapshot_path.display());

        print_summary_report(&frame);
    }

    Ok(output_dir)
}

fn format_reading(reading: &ChannelReading) -> String {
    let value = if reading.available {
        format!("{:.1} {}", reading.value, reading.unit)
    } else {
        "unavailable".to_string()
    };
    value.trim_end().to_string()
}

fn print_summary_report(frame: &CardFrame) {
    println!("\n--- [{}] Tick {} ---", frame.title, frame.tick);
    println!("========================================");
    println!("Channels:");
    for reading in &frame.readings {
        println!(
            "  - {:<3} ({} nm): {}",
            reading.name,
            reading.wavelength,
            format_reading(reading)
        );
    }
    if let Some(clear) = &frame.clear {
        println!("  - Clear:         {}", format_reading(clear));
    }
    if let Some(nir) = &frame.nir {
        println!("  - NIR (Near-IR): {}", format_reading(nir));
    }

    println!("----------------------------------------");
    if frame.par.is_defined() {
        println!(
            "PAR (400-700nm): Total: {:.1} | Average: {:.1}",
            frame.par.total, frame.par.average
        );
    } else {
        println!("PAR (400-700nm): n/a");
    }
    println!(
        "Sensor status:   {:?}{}",
        frame.classification.state,
        frame
            .classification
            .message
            .as_deref()
            .map(|m| format!(" - {}", m))
            .unwrap_or_default()
    );
    println!("========================================");
}
