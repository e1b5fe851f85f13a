//! Persistenz der Polylinien: JSON-Zusammenfassung, Text- und Binärexport.
//!
//! Der Store liefert und übernimmt nur geordnete Records; das Format auf
//! der Platte ist ausschließlich hier definiert.

pub mod export;
pub mod summary;

pub use export::{export_polylines, ExportReport, SUMMARY_FILE_NAME};
pub use summary::{
    parse_polyline_summary, write_polyline_summary, PolylineSummary, SummaryTopology,
};

use anyhow::Context;
use std::path::Path;

use crate::core::PolylineRecord;

/// Lädt Polylinien samt Topologie aus einer Zusammenfassungsdatei.
pub fn load_polyline_file(path: &Path) -> anyhow::Result<Vec<PolylineRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("{} kann nicht gelesen werden", path.display()))?;
    parse_polyline_summary(&content)
        .with_context(|| format!("Fehler beim Lesen von {}", path.display()))
}
