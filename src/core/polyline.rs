//! Polylinie: geordnete Punktfolge einer Kluftspur.

use super::topology::{PolylineTopology, Termination};
use super::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stabile, nie wiederverwendete ID einer Polylinie innerhalb einer Sitzung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolylineId(pub u64);

impl fmt::Display for PolylineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Eines der beiden Enden einer Polylinie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolylineEnd {
    /// Erster Punkt (Index 0)
    Start,
    /// Letzter Punkt
    End,
}

impl PolylineEnd {
    /// Das jeweils andere Ende.
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Finalisierte Polylinie im Store (immer mindestens zwei Punkte).
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Eindeutige ID
    pub id: PolylineId,
    /// Stützpunkte in Erfassungsreihenfolge
    pub points: Vec<Point3>,
    /// Spiegel der Store-Selektion (nur der Store setzt dieses Flag)
    pub selected: bool,
    /// Endpunkt-Topologie, falls klassifiziert oder geladen
    pub topology: Option<PolylineTopology>,
}

impl Polyline {
    pub(crate) fn new(id: PolylineId, points: Vec<Point3>) -> Self {
        Self {
            id,
            points,
            selected: false,
            topology: None,
        }
    }

    /// Anzahl der Stützpunkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte vorhanden sind (tritt im Store nie auf).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position des angegebenen Endes.
    pub fn endpoint(&self, end: PolylineEnd) -> Option<Point3> {
        match end {
            PolylineEnd::Start => self.points.first().copied(),
            PolylineEnd::End => self.points.last().copied(),
        }
    }

    /// Das nähere der beiden Enden zum Punkt samt Abstand.
    pub fn nearest_end(&self, p: Point3) -> Option<(PolylineEnd, f64)> {
        let start = self.endpoint(PolylineEnd::Start)?.distance(p);
        let end = self.endpoint(PolylineEnd::End)?.distance(p);
        if start <= end {
            Some((PolylineEnd::Start, start))
        } else {
            Some((PolylineEnd::End, end))
        }
    }

    /// Gesamtlänge entlang der Segmente.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Austauschform einer Polylinie ohne Sitzungs-IDs (Laden und Speichern).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolylineRecord {
    /// Stützpunkte in Erfassungsreihenfolge
    pub points: Vec<Point3>,
    /// Abschlussarten `[Start, Ende]`, falls bekannt
    pub terminations: Option<[Termination; 2]>,
    /// Kontakte als Positionen in derselben Record-Liste
    pub intersecting: Vec<usize>,
}

impl From<Vec<Point3>> for PolylineRecord {
    fn from(points: Vec<Point3>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }
}
