use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spectracard_core::card;
use spectracard_schemas::{
    config::CardConfig,
    file_formats::{CardFile, SCHEMA_VERSION},
};
use std::path::PathBuf;
use tracing::{info, Level};

mod config;
mod plotting;
mod workflow;

#[derive(Debug, Parser)]
#[command(name = "spectracard", version, about = "Render spectral sensor snapshots as spectrum charts")]
struct Cli {
    /// Log debug output, including every resolved entity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print an example card file wiring every channel
    Stub,
    /// Run snapshots through a card and write charts, curves and frame reports
    Render {
        /// Card file (YAML)
        #[arg(long)]
        card: PathBuf,
        /// State snapshots (JSON, or YAML by extension); one update tick each
        #[arg(long = "states", required = true, num_args = 1..)]
        states: Vec<PathBuf>,
        /// Directory that receives the timestamped run folder
        #[arg(long, default_value = "./data/runs")]
        output: PathBuf,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 300)]
        height: u32,
        #[arg(long, default_value_t = 50)]
        padding: u32,
    },
}

fn fits_inside_padding(width: u32, height: u32, padding: u32) -> bool {
    padding
        .checked_mul(2)
        .is_some_and(|margins| width > margins && height > margins)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let registration = card::registration();
    info!(
        card_type = registration.card_type,
        "{} - {}", registration.name, registration.description
    );

    match cli.command {
        Command::Stub => {
            let stub = CardFile {
                schema_version: SCHEMA_VERSION.to_string(),
                card: CardConfig::stub(),
            };
            let yaml = serde_yaml::to_string(&stub).context("Failed to serialize stub card")?;
            print!("{}", yaml);
        }
        Command::Render {
            card,
            states,
            output,
            width,
            height,
            padding,
        } => {
            anyhow::ensure!(
                fits_inside_padding(width, height, padding),
                "Chart of {}x{} leaves no room inside a padding of {}",
                width,
                height,
                padding
            );
            let options = workflow::RenderOptions {
                width,
                height,
                padding,
            };
            let run_dir = workflow::run_render(&card, &states, &output, &options)?;
            println!("\nRender complete. Results are in '{}'", run_dir.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_must_leave_room_for_the_plot() {
        assert!(fits_inside_padding(800, 300, 50));
        assert!(!fits_inside_padding(800, 100, 50));
        assert!(!fits_inside_padding(800, 300, 3_000_000_000));
    }
}
