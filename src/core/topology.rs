//! Endpunkt-Topologie der Kluftspuren.
//!
//! Jedes Ende einer Polylinie erhält eine Abschlussart:
//! - `B` blind: endet frei, ohne Kontakt
//! - `X` kreuzend: läuft über eine andere Spur hinweg und endet kurz dahinter
//! - `A` anstoßend: endet an einer anderen Spur
//! - `C` zensiert: endet am Rand des Aufschlusses (Mesh-Rand)
//!
//! Die automatische Klassifikation arbeitet mit einer Schwelle `tau`, die sich
//! aus dem mittleren Stützpunktabstand aller Polylinien ergibt.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::geometry::{distance_between_segments, distance_to_polyline};
use super::{Point3, Polyline, PolylineEnd, PolylineId};

/// Reichweite hinter einem Endpunkt, in der eine überquerte Spur als Kreuzung zählt (Vielfaches von `tau`).
const CROSSING_REACH_FACTOR: f64 = 3.0;

/// Abschlussart eines Polylinien-Endes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Termination {
    /// Endet frei
    #[default]
    #[serde(rename = "B")]
    Blind,
    /// Kreuzt eine andere Spur
    #[serde(rename = "X")]
    Crossing,
    /// Stößt an eine andere Spur
    #[serde(rename = "A")]
    Abutting,
    /// Endet am Aufschlussrand
    #[serde(rename = "C")]
    Censored,
}

impl Termination {
    /// Alle Abschlussarten in Anzeige-Reihenfolge.
    pub const ALL: [Termination; 4] = [
        Termination::Blind,
        Termination::Crossing,
        Termination::Abutting,
        Termination::Censored,
    ];

    /// Ein-Buchstaben-Code wie in der Zusammenfassungsdatei.
    pub fn code(self) -> char {
        match self {
            Self::Blind => 'B',
            Self::Crossing => 'X',
            Self::Abutting => 'A',
            Self::Censored => 'C',
        }
    }

    /// Anzeigename.
    pub fn label(self) -> &'static str {
        match self {
            Self::Blind => "blind",
            Self::Crossing => "kreuzend",
            Self::Abutting => "anstoßend",
            Self::Censored => "zensiert",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Topologie einer Polylinie: Abschluss je Ende und berührte Nachbarn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolylineTopology {
    /// `[Start, Ende]`
    pub terminations: [Termination; 2],
    /// Polylinien mit Kontakt innerhalb `tau`, in Store-Reihenfolge
    pub intersecting: Vec<PolylineId>,
}

impl PolylineTopology {
    /// Abschlussart eines Endes.
    pub fn termination(&self, end: PolylineEnd) -> Termination {
        self.terminations[end_slot(end)]
    }

    /// Setzt die Abschlussart eines Endes.
    pub fn set_termination(&mut self, end: PolylineEnd, termination: Termination) {
        self.terminations[end_slot(end)] = termination;
    }
}

fn end_slot(end: PolylineEnd) -> usize {
    match end {
        PolylineEnd::Start => 0,
        PolylineEnd::End => 1,
    }
}

/// Mittlere Segmentlänge über alle Polylinien. `None` ohne Segmente.
pub fn mean_vertex_spacing<'a>(lines: impl IntoIterator<Item = &'a Polyline>) -> Option<f64> {
    let (total, segments) = lines
        .into_iter()
        .flat_map(|line| line.points.windows(2))
        .fold((0.0, 0usize), |(total, count), w| {
            (total + w[0].distance(w[1]), count + 1)
        });
    (segments > 0).then(|| total / segments as f64)
}

/// Randvertices eines Dreiecksnetzes: Ecken von Kanten, die nur zu einem Dreieck gehören.
///
/// Dreiecke mit ungültigen Indizes werden ignoriert.
pub fn mesh_boundary_vertices(vertices: &[Point3], triangles: &[[usize; 3]]) -> Vec<Point3> {
    let mut edge_counts: HashMap<(usize, usize), u32> = HashMap::new();
    for tri in triangles
        .iter()
        .filter(|tri| tri.iter().all(|&i| i < vertices.len()))
    {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *edge_counts.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }

    let boundary: BTreeSet<usize> = edge_counts
        .into_iter()
        .filter(|(_, count)| *count == 1)
        .flat_map(|((a, b), _)| [a, b])
        .collect();

    boundary.into_iter().map(|i| vertices[i]).collect()
}

/// Automatische Klassifikation aller Polylinien-Enden.
#[derive(Debug, Clone)]
pub struct TopologyClassifier<'a> {
    tau: f64,
    boundary: &'a [Point3],
}

impl<'a> TopologyClassifier<'a> {
    /// Klassifikator mit fester Schwelle.
    pub fn new(tau: f64, boundary: &'a [Point3]) -> Self {
        Self { tau, boundary }
    }

    /// Schwelle `tau = factor × mittlerer Stützpunktabstand`. `None` ohne Segmente.
    pub fn for_polylines<'b>(
        lines: impl IntoIterator<Item = &'b Polyline>,
        tau_factor: f64,
        boundary: &'a [Point3],
    ) -> Option<Self> {
        let spacing = mean_vertex_spacing(lines)?;
        Some(Self::new(tau_factor * spacing, boundary))
    }

    /// Verwendete Schwelle.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Klassifiziert jede Polylinie gegen alle anderen.
    pub fn classify<'b>(
        &self,
        lines: impl IntoIterator<Item = &'b Polyline>,
    ) -> IndexMap<PolylineId, PolylineTopology> {
        let lines: Vec<&Polyline> = lines.into_iter().collect();

        lines
            .iter()
            .map(|line| {
                let others: Vec<&Polyline> = lines
                    .iter()
                    .copied()
                    .filter(|other| other.id != line.id)
                    .collect();
                (line.id, self.classify_line(line, &others))
            })
            .collect()
    }

    fn classify_line(&self, line: &Polyline, others: &[&Polyline]) -> PolylineTopology {
        let start = self.classify_end(line, PolylineEnd::Start, others);
        let end = self.classify_end(line, PolylineEnd::End, others);

        let intersecting = others
            .iter()
            .filter(|other| traces_touch(&line.points, &other.points, self.tau))
            .map(|other| other.id)
            .collect();

        PolylineTopology {
            terminations: [start, end],
            intersecting,
        }
    }

    fn classify_end(&self, line: &Polyline, end: PolylineEnd, others: &[&Polyline]) -> Termination {
        let Some((tip, reach)) = end_reach(line, end, self.tau * CROSSING_REACH_FACTOR) else {
            return Termination::Blind;
        };

        // Aufschlussrand hat Vorrang
        if self.boundary.iter().any(|b| b.distance(tip) < self.tau) {
            return Termination::Censored;
        }

        let abutting = others.iter().any(|other| {
            distance_to_polyline(tip, &other.points).is_some_and(|d| d < self.tau)
        });
        if abutting {
            return Termination::Abutting;
        }

        let crossing = others.iter().any(|other| {
            other
                .points
                .windows(2)
                .any(|w| distance_between_segments(tip, reach, w[0], w[1]) < self.tau)
        });
        if crossing {
            Termination::Crossing
        } else {
            Termination::Blind
        }
    }
}

/// Endpunkt und der auf `max_len` gekürzte Punkt entlang des letzten Segments.
fn end_reach(line: &Polyline, end: PolylineEnd, max_len: f64) -> Option<(Point3, Point3)> {
    let (tip, neighbour) = match end {
        PolylineEnd::Start => (*line.points.first()?, *line.points.get(1)?),
        PolylineEnd::End => {
            let n = line.points.len();
            (*line.points.last()?, *line.points.get(n.checked_sub(2)?)?)
        }
    };
    let along = neighbour - tip;
    let len = along.length();
    if len <= max_len {
        return Some((tip, neighbour));
    }
    Some((tip, tip + along * (max_len / len)))
}

fn traces_touch(a: &[Point3], b: &[Point3], tau: f64) -> bool {
    a.windows(2).any(|sa| {
        b.windows(2)
            .any(|sb| distance_between_segments(sa[0], sa[1], sb[0], sb[1]) < tau)
    })
}
