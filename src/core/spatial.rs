//! Spatial-Index (KD-Tree) über alle Polylinien-Endpunkte.
//!
//! Wird für die Suche nach Verbindungskandidaten im Edit-Modus genutzt.
//! Deckungsgleiche Endpunkte teilen sich einen Baumeintrag, da der KD-Tree
//! nur eine begrenzte Anzahl identischer Punkte pro Bucket aufnehmen kann.

use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use super::{Point3, Polyline, PolylineEnd, PolylineId};

/// Treffer einer Endpunkt-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointMatch {
    /// Besitzende Polylinie
    pub polyline_id: PolylineId,
    /// Welches Ende getroffen wurde
    pub end: PolylineEnd,
    /// Position des Endpunkts
    pub position: Point3,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Alle Endpunkte an exakt derselben Position.
#[derive(Debug, Clone)]
struct EndpointGroup {
    position: Point3,
    members: Vec<(PolylineId, PolylineEnd)>,
}

/// Read-only Index über Start- und Endpunkt jeder Polylinie.
#[derive(Debug, Clone)]
pub struct EndpointIndex {
    tree: KdTree<f64, 3>,
    groups: Vec<EndpointGroup>,
    endpoint_count: usize,
}

/// Bitmuster-Schlüssel einer Position; `-0.0` und `0.0` fallen zusammen.
fn position_key(position: Point3) -> [u64; 3] {
    let normalized = position + Point3::ZERO;
    [
        normalized.x.to_bits(),
        normalized.y.to_bits(),
        normalized.z.to_bits(),
    ]
}

impl EndpointIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            groups: Vec::new(),
            endpoint_count: 0,
        }
    }

    /// Baut den Index aus allen Polylinien neu auf.
    pub fn from_polylines(polylines: &IndexMap<PolylineId, Polyline>) -> Self {
        let mut grouped: IndexMap<[u64; 3], EndpointGroup> = IndexMap::new();
        let mut endpoint_count = 0;

        for line in polylines.values() {
            for end in [PolylineEnd::Start, PolylineEnd::End] {
                let Some(position) = line.endpoint(end) else {
                    continue;
                };
                grouped
                    .entry(position_key(position))
                    .or_insert_with(|| EndpointGroup {
                        position,
                        members: Vec::new(),
                    })
                    .members
                    .push((line.id, end));
                endpoint_count += 1;
            }
        }

        let groups: Vec<EndpointGroup> = grouped.into_values().collect();
        let coords: Vec<[f64; 3]> = groups.iter().map(|g| g.position.to_array()).collect();
        let tree: KdTree<f64, 3> = (&coords).into();

        Self {
            tree,
            groups,
            endpoint_count,
        }
    }

    /// Anzahl indexierter Endpunkte (zwei pro Polylinie).
    pub fn len(&self) -> usize {
        self.endpoint_count
    }

    /// Anzahl unterschiedlicher Endpunkt-Positionen im Baum.
    pub fn distinct_positions(&self) -> usize {
        self.groups.len()
    }

    /// Gibt `true` zurück, wenn keine Endpunkte indexiert sind.
    pub fn is_empty(&self) -> bool {
        self.endpoint_count == 0
    }

    /// Alle Endpunkte innerhalb des Radius, aufsteigend nach Distanz.
    ///
    /// Deckungsgleiche Endpunkte erscheinen in Einfügereihenfolge.
    pub fn within_radius(&self, query: Point3, radius: f64) -> Vec<EndpointMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut hits = self
            .tree
            .within::<SquaredEuclidean>(&query.to_array(), radius * radius)
            .into_iter()
            .filter_map(|hit| {
                let group = self.groups.get(hit.item as usize)?;
                Some((hit.item, hit.distance.sqrt(), group))
            })
            .collect::<Vec<_>>();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        hits.into_iter()
            .flat_map(|(_, distance, group)| {
                group
                    .members
                    .iter()
                    .map(move |&(polyline_id, end)| EndpointMatch {
                        polyline_id,
                        end,
                        position: group.position,
                        distance,
                    })
            })
            .collect()
    }

    /// Nächster Endpunkt einer *anderen* Polylinie innerhalb des Radius.
    pub fn nearest_foreign(
        &self,
        query: Point3,
        exclude: PolylineId,
        radius: f64,
    ) -> Option<EndpointMatch> {
        self.within_radius(query, radius)
            .into_iter()
            .find(|hit| hit.polyline_id != exclude)
    }
}

impl Default for EndpointIndex {
    fn default() -> Self {
        Self::empty()
    }
}
