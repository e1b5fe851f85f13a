//! Export ins Ausgabeverzeichnis: pro Polylinie `.txt` und `.dat`, plus Zusammenfassung.
//!
//! - `polyline_###.txt`: Kopfzeile `# Polyline N - X Y Z coordinates`, danach
//!   ein Punkt pro Zeile mit sechs Nachkommastellen
//! - `polyline_###.dat`: rohe f64-Werte (little endian) x, y, z hintereinander
//! - `polylines_summary.json`: siehe [`super::summary`], inklusive Topologie

use anyhow::Context;
use std::path::{Path, PathBuf};

use super::summary::write_polyline_summary;
use crate::core::{Point3, PolylineRecord};
use crate::shared::options::OUTPUT_SUBDIR;

/// Dateiname der JSON-Zusammenfassung.
pub const SUMMARY_FILE_NAME: &str = "polylines_summary.json";

/// Ergebnis eines Exports.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Tatsächliches Ausgabeverzeichnis (`<basis>/polylines_output`)
    pub output_dir: PathBuf,
    /// Anzahl geschriebener Polylinien
    pub polyline_count: usize,
}

/// Textdarstellung einer Polylinie.
pub fn polyline_to_text(number: usize, points: &[Point3]) -> String {
    let header = format!("# Polyline {} - X Y Z coordinates", number);
    std::iter::once(header)
        .chain(
            points
                .iter()
                .map(|p| format!("{:.6} {:.6} {:.6}", p.x, p.y, p.z)),
        )
        .map(|line| line + "\n")
        .collect()
}

/// Binärdarstellung einer Polylinie (f64 little endian, xyz je Punkt).
pub fn polyline_to_bytes(points: &[Point3]) -> Vec<u8> {
    points
        .iter()
        .flat_map(|p| p.to_array())
        .flat_map(f64::to_le_bytes)
        .collect()
}

/// Liest die Binärdarstellung zurück. Unvollständige Punkte am Ende werden ignoriert.
pub fn polyline_from_bytes(bytes: &[u8]) -> Vec<Point3> {
    let values: Vec<f64> = bytes
        .chunks_exact(8)
        .filter_map(|chunk| chunk.try_into().ok().map(f64::from_le_bytes))
        .collect();
    values
        .chunks_exact(3)
        .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
        .collect()
}

/// Schreibt alle Polylinien nach `<base_dir>/polylines_output`.
pub fn export_polylines(
    base_dir: &Path,
    records: &[PolylineRecord],
) -> anyhow::Result<ExportReport> {
    let output_dir = base_dir.join(OUTPUT_SUBDIR);
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Ausgabeverzeichnis {} kann nicht angelegt werden",
            output_dir.display()
        )
    })?;

    for (i, record) in records.iter().enumerate() {
        let number = i + 1;
        let points = &record.points;
        let txt_path = output_dir.join(format!("polyline_{:03}.txt", number));
        std::fs::write(&txt_path, polyline_to_text(number, points))
            .with_context(|| format!("{} kann nicht geschrieben werden", txt_path.display()))?;

        let dat_path = output_dir.join(format!("polyline_{:03}.dat", number));
        std::fs::write(&dat_path, polyline_to_bytes(points))
            .with_context(|| format!("{} kann nicht geschrieben werden", dat_path.display()))?;

        log::debug!(
            "Polylinie {} gespeichert: {} und {}",
            number,
            txt_path.display(),
            dat_path.display()
        );
    }

    let summary_path = output_dir.join(SUMMARY_FILE_NAME);
    std::fs::write(&summary_path, write_polyline_summary(records)?)
        .with_context(|| format!("{} kann nicht geschrieben werden", summary_path.display()))?;

    log::info!(
        "{} Polylinie(n) nach {} gespeichert",
        records.len(),
        output_dir.display()
    );

    Ok(ExportReport {
        output_dir,
        polyline_count: records.len(),
    })
}
