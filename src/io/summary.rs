//! JSON-Zusammenfassung aller Polylinien (`polylines_summary.json`).
//!
//! Format: `{"num_polylines": n, "polylines": [{"points": [[x, y, z], ...]}, ...]}`,
//! optional ergänzt um `"topology": {"<index>": {"terminations": ["B", "A"],
//! "intersecting_polylines": [..]}}` mit 0-basierten Polylinien-Positionen.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{Point3, PolylineRecord, Termination};

/// Eine Polylinie in der Zusammenfassung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPolyline {
    /// Stützpunkte als `[x, y, z]`
    pub points: Vec<[f64; 3]>,
}

/// Topologie-Eintrag einer Polylinie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTopology {
    /// Abschlussarten `[Start, Ende]`
    pub terminations: [Termination; 2],
    /// Positionen berührter Polylinien
    #[serde(default)]
    pub intersecting_polylines: Vec<usize>,
}

/// Inhalt der Zusammenfassungsdatei.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineSummary {
    /// Anzahl der Polylinien (redundant, wird beim Lesen nur geprüft)
    pub num_polylines: usize,
    /// Polylinien in Speicherreihenfolge
    pub polylines: Vec<SummaryPolyline>,
    /// Topologie je Polylinien-Position; fehlt, solange nichts klassifiziert ist
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub topology: BTreeMap<usize, SummaryTopology>,
}

impl PolylineSummary {
    /// Baut die Zusammenfassung aus geordneten Records.
    pub fn from_records(records: &[PolylineRecord]) -> Self {
        let topology = records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| {
                record.terminations.map(|terminations| {
                    (
                        i,
                        SummaryTopology {
                            terminations,
                            intersecting_polylines: record.intersecting.clone(),
                        },
                    )
                })
            })
            .collect();

        Self {
            num_polylines: records.len(),
            polylines: records
                .iter()
                .map(|record| SummaryPolyline {
                    points: record.points.iter().map(|p| p.to_array()).collect(),
                })
                .collect(),
            topology,
        }
    }

    /// Records in Dateireihenfolge; degenerierte Einträge werden übersprungen.
    ///
    /// Topologie-Positionen werden auf die verbleibenden Records umgerechnet.
    pub fn into_records(self) -> Vec<PolylineRecord> {
        if self.num_polylines != self.polylines.len() {
            log::warn!(
                "num_polylines = {}, aber {} Polylinien in der Datei",
                self.num_polylines,
                self.polylines.len()
            );
        }

        let mut kept = 0;
        let positions: Vec<Option<usize>> = self
            .polylines
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if entry.points.len() < 2 {
                    log::warn!(
                        "Polylinie {} mit {} Punkt(en) übersprungen",
                        i + 1,
                        entry.points.len()
                    );
                    return None;
                }
                kept += 1;
                Some(kept - 1)
            })
            .collect();

        let mut records: Vec<PolylineRecord> = self
            .polylines
            .into_iter()
            .filter(|entry| entry.points.len() >= 2)
            .map(|entry| {
                let points: Vec<Point3> =
                    entry.points.into_iter().map(Point3::from_array).collect();
                PolylineRecord::from(points)
            })
            .collect();

        for (index, entry) in self.topology {
            let Some(record) = positions
                .get(index)
                .copied()
                .flatten()
                .and_then(|pos| records.get_mut(pos))
            else {
                log::warn!("Topologie für unbekannte Polylinie {} ignoriert", index);
                continue;
            };
            record.terminations = Some(entry.terminations);
            record.intersecting = entry
                .intersecting_polylines
                .into_iter()
                .filter_map(|other| positions.get(other).copied().flatten())
                .collect();
        }

        records
    }
}

/// Parst den Inhalt einer Zusammenfassungsdatei.
pub fn parse_polyline_summary(json: &str) -> anyhow::Result<Vec<PolylineRecord>> {
    let summary: PolylineSummary =
        serde_json::from_str(json).context("Polylinien-Zusammenfassung ist kein gültiges JSON")?;
    Ok(summary.into_records())
}

/// Serialisiert Records als eingerücktes JSON.
pub fn write_polyline_summary(records: &[PolylineRecord]) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(&PolylineSummary::from_records(records))?;
    Ok(json)
}
