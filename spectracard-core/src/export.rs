use crate::{card::CardFrame, error::SpectraError, interpolate::InterpolatedPoint};
use csv::Writer;
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Debug, Serialize)]
struct CurveRow {
    wavelength_nm: f64,
    intensity: f64,
    position: f64,
}

/// Writes interpolated points as CSV rows, one per point.
pub struct CurveWriter<W: std::io::Write> {
    writer: Writer<W>,
}

impl CurveWriter<fs::File> {
    pub fn create(path: &Path) -> Result<Self, SpectraError> {
        let writer = Writer::from_path(path)
            .map_err(|e| SpectraError::CsvError(path.display().to_string(), e))?;
        Ok(Self { writer })
    }
}

impl<W: std::io::Write> CurveWriter<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
        }
    }

    pub fn write_points(&mut self, points: &[InterpolatedPoint]) -> Result<(), csv::Error> {
        for point in points {
            self.writer.serialize(CurveRow {
                wavelength_nm: point.wavelength,
                intensity: point.intensity,
                position: point.position,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, SpectraError> {
        self.writer
            .into_inner()
            .map_err(|e| SpectraError::FileIO("<csv buffer>".to_string(), e.into_error()))
    }
}

pub fn write_curve_csv(path: &Path, points: &[InterpolatedPoint]) -> Result<(), SpectraError> {
    let mut writer = CurveWriter::create(path)?;
    writer
        .write_points(points)
        .map_err(|e| SpectraError::CsvError(path.display().to_string(), e))
}

pub fn write_frame_json(path: &Path, frame: &CardFrame) -> Result<(), SpectraError> {
    let file =
        fs::File::create(path).map_err(|e| SpectraError::FileIO(path.display().to_string(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, frame)?;
    writer
        .flush()
        .map_err(|e| SpectraError::FileIO(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_csv_has_a_header_and_one_row_per_point() {
        let points = [
            InterpolatedPoint { wavelength: 415.0, intensity: 12.5, position: 0.05 },
            InterpolatedPoint { wavelength: 445.0, intensity: 20.0, position: 0.15 },
        ];
        let mut writer = CurveWriter::from_writer(Vec::new());
        writer.write_points(&points).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "wavelength_nm,intensity,position");
        assert_eq!(lines[1], "415.0,12.5,0.05");
        assert_eq!(lines.len(), 3);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn frame_json_reports_a_full_disk() {
        use crate::card::SpectrumCard;
        use spectracard_schemas::{config::CardConfig, host::StateSnapshot};

        let config = CardConfig {
            sample_count: 2,
            ..CardConfig::stub()
        };
        let mut card = SpectrumCard::configure(config).unwrap();
        let frame = card.on_readings_updated(&StateSnapshot::default()).unwrap();

        let result = write_frame_json(Path::new("/dev/full"), &frame);
        assert!(result.is_err());
    }
}
