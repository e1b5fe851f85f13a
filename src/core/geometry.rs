//! Geometrische Hilfsfunktionen im Weltraum des Aufschlussmodells.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D-Punkt auf der Mesh-Oberfläche (Weltkoordinaten).
pub type Point3 = DVec3;

/// Achsenparallele Bounding-Box, z.B. des geladenen Meshes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    /// Minimale Ecke
    pub min: Point3,
    /// Maximale Ecke
    pub max: Point3,
}

impl Bounds3 {
    /// Erstellt eine Box aus zwei Ecken (Reihenfolge egal).
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Umschließende Box einer Punktmenge. `None` bei leerer Menge.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    /// Länge der Raumdiagonale. Alle Pick-Toleranzen skalieren damit.
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).length()
    }
}

/// Abstand eines Punkts zum Segment `a`–`b`.
///
/// Degenerierte Segmente (a == b) liefern den Punktabstand zu `a`.
pub fn distance_to_segment(p: Point3, a: Point3, b: Point3) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Kleinster Abstand eines Punkts zu einem Linienzug.
///
/// Ein einzelner Punkt wird als Punktabstand behandelt, eine leere Folge liefert `None`.
pub fn distance_to_polyline(p: Point3, points: &[Point3]) -> Option<f64> {
    match points {
        [] => None,
        [single] => Some(p.distance(*single)),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .min_by(f64::total_cmp),
    }
}

/// Kleinster Abstand zwischen den Segmenten `p1`–`q1` und `p2`–`q2`.
///
/// Parallele und degenerierte Segmente sind erlaubt.
pub fn distance_between_segments(p1: Point3, q1: Point3, p2: Point3, q2: Point3) -> f64 {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    if a <= f64::EPSILON && e <= f64::EPSILON {
        return p1.distance(p2);
    }

    let (s, t) = if a <= f64::EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= f64::EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            // Parallele Segmente: beliebiger Startparameter
            let s = if denom > f64::EPSILON * a * e {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (p1 + d1 * s).distance(p2 + d2 * t)
}

/// Index und Abstand des nächstgelegenen Stützpunkts.
pub fn nearest_vertex(p: Point3, points: &[Point3]) -> Option<(usize, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, v)| (i, p.distance(*v)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
