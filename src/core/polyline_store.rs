//! Polyline-Store: Besitzer aller finalisierten Polylinien und der Selektion.
//!
//! Jede Mutation ist synchron und atomar: schlägt sie fehl, bleibt der Store
//! unverändert. Nach jeder erfolgreichen Mutation ist der Endpunkt-Index aktuell.

use indexmap::IndexMap;

use super::spatial::{EndpointIndex, EndpointMatch};
use super::topology::{PolylineTopology, Termination};
use super::{Bounds3, EditError, Point3, Polyline, PolylineEnd, PolylineId, PolylineRecord};

/// Abstand, unter dem zwei Verbindungspunkte als identisch gelten.
const COINCIDENT_EPSILON: f64 = 1e-9;

/// Ergebnis von [`PolylineStore::delete_point`].
#[derive(Debug, Clone, PartialEq)]
pub enum PointDeletion {
    /// Nur der Stützpunkt wurde entfernt
    PointRemoved,
    /// Es wären weniger als zwei Punkte übrig geblieben, die ganze Polylinie ist weg
    PolylineRemoved(Polyline),
}

/// Geordnete Sammlung aller Polylinien plus Einzel-Selektion.
#[derive(Debug, Clone)]
pub struct PolylineStore {
    polylines: IndexMap<PolylineId, Polyline>,
    selected: Option<PolylineId>,
    next_id: u64,
    endpoint_index: EndpointIndex,
}

impl PolylineStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self {
            polylines: IndexMap::new(),
            selected: None,
            next_id: 1,
            endpoint_index: EndpointIndex::empty(),
        }
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Anzahl der Polylinien.
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    /// Gibt `true` zurück, wenn keine Polylinien vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Polylinie per ID.
    pub fn get(&self, id: PolylineId) -> Option<&Polyline> {
        self.polylines.get(&id)
    }

    /// Prüft, ob die ID im Store existiert.
    pub fn contains(&self, id: PolylineId) -> bool {
        self.polylines.contains_key(&id)
    }

    /// Alle Polylinien in Einfügereihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Polyline> {
        self.polylines.values()
    }

    /// Alle IDs in Einfügereihenfolge.
    pub fn ids(&self) -> impl Iterator<Item = PolylineId> + '_ {
        self.polylines.keys().copied()
    }

    /// Aktuell selektierte Polylinie (höchstens eine).
    pub fn selected(&self) -> Option<PolylineId> {
        self.selected
    }

    /// Die selektierte Polylinie selbst.
    pub fn selected_polyline(&self) -> Option<&Polyline> {
        self.selected.and_then(|id| self.polylines.get(&id))
    }

    /// Punktfolgen aller Polylinien in Einfügereihenfolge (für Export).
    pub fn sequences(&self) -> Vec<Vec<Point3>> {
        self.polylines.values().map(|l| l.points.clone()).collect()
    }

    /// Polylinien samt Topologie in Einfügereihenfolge (für Export).
    ///
    /// Kontakte werden von IDs auf Positionen in der Liste abgebildet.
    pub fn records(&self) -> Vec<PolylineRecord> {
        self.polylines
            .values()
            .map(|line| PolylineRecord {
                points: line.points.clone(),
                terminations: line.topology.as_ref().map(|t| t.terminations),
                intersecting: line
                    .topology
                    .as_ref()
                    .map(|t| {
                        t.intersecting
                            .iter()
                            .filter_map(|id| self.polylines.get_index_of(id))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Umschließende Box aller Stützpunkte.
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(self.polylines.values().flat_map(|l| l.points.iter()))
    }

    /// Nächster Endpunkt einer anderen Polylinie als `exclude` innerhalb `radius`.
    pub fn nearest_foreign_endpoint(
        &self,
        query: Point3,
        exclude: PolylineId,
        radius: f64,
    ) -> Option<EndpointMatch> {
        self.endpoint_index.nearest_foreign(query, exclude, radius)
    }

    /// Alle Endpunkte innerhalb `radius`, aufsteigend nach Distanz.
    pub fn endpoints_within(&self, query: Point3, radius: f64) -> Vec<EndpointMatch> {
        self.endpoint_index.within_radius(query, radius)
    }

    // ── Mutationen ──────────────────────────────────────────────────

    /// Fügt eine Polylinie an und vergibt eine neue ID.
    pub fn add(&mut self, points: Vec<Point3>) -> Result<PolylineId, EditError> {
        if points.len() < 2 {
            return Err(EditError::DegeneratePolyline {
                points: points.len(),
            });
        }
        let id = self.insert_unchecked(points);
        self.rebuild_endpoint_index();
        Ok(id)
    }

    /// Entfernt eine Polylinie. Zeigte die Selektion auf sie, wird sie aufgehoben.
    pub fn remove(&mut self, id: PolylineId) -> Option<Polyline> {
        let removed = self.polylines.shift_remove(&id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.forget_contacts(&[id]);
        self.rebuild_endpoint_index();
        Some(removed)
    }

    /// Selektiert eine Polylinie und hebt eine vorherige Selektion auf.
    pub fn select(&mut self, id: PolylineId) -> Result<(), EditError> {
        if !self.contains(id) {
            return Err(EditError::UnknownPolyline(id));
        }
        if self.selected == Some(id) {
            return Ok(());
        }
        self.deselect();
        if let Some(line) = self.polylines.get_mut(&id) {
            line.selected = true;
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Hebt die Selektion auf und gibt die vorher selektierte ID zurück.
    pub fn deselect(&mut self) -> Option<PolylineId> {
        let previous = self.selected.take()?;
        if let Some(line) = self.polylines.get_mut(&previous) {
            line.selected = false;
        }
        Some(previous)
    }

    /// Hängt einen Punkt am Anfang oder Ende an.
    pub fn extend(
        &mut self,
        id: PolylineId,
        point: Point3,
        end: PolylineEnd,
    ) -> Result<(), EditError> {
        let line = self
            .polylines
            .get_mut(&id)
            .ok_or(EditError::UnknownPolyline(id))?;
        match end {
            PolylineEnd::Start => line.points.insert(0, point),
            PolylineEnd::End => line.points.push(point),
        }
        self.rebuild_endpoint_index();
        Ok(())
    }

    /// Entfernt einen Stützpunkt.
    ///
    /// Blieben danach weniger als zwei Punkte übrig, wird die ganze Polylinie
    /// entfernt (inklusive Selektion).
    pub fn delete_point(
        &mut self,
        id: PolylineId,
        index: usize,
    ) -> Result<PointDeletion, EditError> {
        let count = self
            .get(id)
            .map(Polyline::len)
            .ok_or(EditError::UnknownPolyline(id))?;
        if index >= count {
            return Err(EditError::PointOutOfRange { id, index });
        }

        if count <= 2 {
            let removed = self.remove(id).ok_or(EditError::UnknownPolyline(id))?;
            return Ok(PointDeletion::PolylineRemoved(removed));
        }

        if let Some(line) = self.polylines.get_mut(&id) {
            line.points.remove(index);
        }
        self.rebuild_endpoint_index();
        Ok(PointDeletion::PointRemoved)
    }

    /// Verbindet zwei Polylinien über das nächstgelegene Endpunkt-Paar.
    pub fn join(
        &mut self,
        a: PolylineId,
        b: PolylineId,
        max_gap: f64,
    ) -> Result<PolylineId, EditError> {
        let (a_end, b_end) = self.closest_end_pair(a, b)?;
        self.join_at(a, a_end, b, b_end, max_gap)
    }

    /// Verbindet `a` an `a_end` mit `b` an `b_end`.
    ///
    /// Die Laufrichtung von `a` bleibt erhalten. Beide Quellen verschwinden,
    /// das Ergebnis erhält eine neue ID und übernimmt eine bestehende Selektion.
    pub fn join_at(
        &mut self,
        a: PolylineId,
        a_end: PolylineEnd,
        b: PolylineId,
        b_end: PolylineEnd,
        max_gap: f64,
    ) -> Result<PolylineId, EditError> {
        if a == b {
            return Err(EditError::SelfJoin(a));
        }
        let line_a = self.get(a).ok_or(EditError::UnknownPolyline(a))?;
        let line_b = self.get(b).ok_or(EditError::UnknownPolyline(b))?;

        let joint_a = line_a.endpoint(a_end).ok_or(EditError::UnknownPolyline(a))?;
        let joint_b = line_b.endpoint(b_end).ok_or(EditError::UnknownPolyline(b))?;
        let gap = joint_a.distance(joint_b);
        if gap > max_gap {
            return Err(EditError::JoinOutOfTolerance { gap, max_gap });
        }

        let merged = merge_points(&line_a.points, a_end, &line_b.points, b_end);
        let was_selected = self.selected == Some(a) || self.selected == Some(b);

        self.polylines.shift_remove(&a);
        self.polylines.shift_remove(&b);
        self.forget_contacts(&[a, b]);
        if was_selected {
            self.selected = None;
        }

        let id = self.insert_unchecked(merged);
        if was_selected {
            self.select(id)?;
        }
        self.rebuild_endpoint_index();
        Ok(id)
    }

    /// Entfernt alle Polylinien und die Selektion. IDs werden nicht zurückgesetzt.
    pub fn clear(&mut self) {
        self.polylines.clear();
        self.selected = None;
        self.rebuild_endpoint_index();
    }

    /// Ersetzt den gesamten Inhalt (z.B. nach dem Laden).
    ///
    /// Alle Folgen werden vorab geprüft, eine degenerierte Folge lässt den Store unverändert.
    pub fn replace_all(
        &mut self,
        sequences: Vec<Vec<Point3>>,
    ) -> Result<Vec<PolylineId>, EditError> {
        self.replace_all_records(sequences.into_iter().map(PolylineRecord::from).collect())
    }

    /// Wie [`Self::replace_all`], übernimmt zusätzlich die Topologie der Records.
    ///
    /// Kontakt-Positionen außerhalb der Liste oder auf sich selbst werden verworfen.
    pub fn replace_all_records(
        &mut self,
        records: Vec<PolylineRecord>,
    ) -> Result<Vec<PolylineId>, EditError> {
        if let Some(bad) = records.iter().find(|r| r.points.len() < 2) {
            return Err(EditError::DegeneratePolyline {
                points: bad.points.len(),
            });
        }
        self.polylines.clear();
        self.selected = None;

        let mut pending = Vec::with_capacity(records.len());
        let ids: Vec<PolylineId> = records
            .into_iter()
            .map(|record| {
                let id = self.insert_unchecked(record.points);
                pending.push((id, record.terminations, record.intersecting));
                id
            })
            .collect();

        for (id, terminations, intersecting) in pending {
            let Some(terminations) = terminations else {
                continue;
            };
            let contacts = intersecting
                .into_iter()
                .filter_map(|index| ids.get(index).copied())
                .filter(|other| *other != id)
                .collect();
            if let Some(line) = self.polylines.get_mut(&id) {
                line.topology = Some(PolylineTopology {
                    terminations,
                    intersecting: contacts,
                });
            }
        }

        self.rebuild_endpoint_index();
        Ok(ids)
    }

    /// Setzt die Abschlussart eines Endes von Hand.
    ///
    /// Ohne bisherige Topologie startet die Polylinie mit zwei blinden Enden.
    pub fn set_termination(
        &mut self,
        id: PolylineId,
        end: PolylineEnd,
        termination: Termination,
    ) -> Result<(), EditError> {
        let line = self
            .polylines
            .get_mut(&id)
            .ok_or(EditError::UnknownPolyline(id))?;
        line.topology
            .get_or_insert_with(PolylineTopology::default)
            .set_termination(end, termination);
        Ok(())
    }

    /// Übernimmt eine automatische Klassifikation.
    ///
    /// Alle IDs werden vorab geprüft; Polylinien ohne Eintrag behalten ihre Topologie.
    pub fn apply_topology(
        &mut self,
        classified: IndexMap<PolylineId, PolylineTopology>,
    ) -> Result<(), EditError> {
        if let Some(unknown) = classified.keys().find(|id| !self.contains(**id)) {
            return Err(EditError::UnknownPolyline(*unknown));
        }
        for (id, topology) in classified {
            if let Some(line) = self.polylines.get_mut(&id) {
                line.topology = Some(topology);
            }
        }
        Ok(())
    }

    // ── Intern ──────────────────────────────────────────────────────

    fn insert_unchecked(&mut self, points: Vec<Point3>) -> PolylineId {
        let id = PolylineId(self.next_id);
        self.next_id += 1;
        self.polylines.insert(id, Polyline::new(id, points));
        id
    }

    /// Entfernt verschwundene Polylinien aus den Kontaktlisten der übrigen.
    fn forget_contacts(&mut self, gone: &[PolylineId]) {
        for line in self.polylines.values_mut() {
            if let Some(topology) = line.topology.as_mut() {
                topology.intersecting.retain(|id| !gone.contains(id));
            }
        }
    }

    fn rebuild_endpoint_index(&mut self) {
        self.endpoint_index = EndpointIndex::from_polylines(&self.polylines);
    }

    fn closest_end_pair(
        &self,
        a: PolylineId,
        b: PolylineId,
    ) -> Result<(PolylineEnd, PolylineEnd), EditError> {
        let line_a = self.get(a).ok_or(EditError::UnknownPolyline(a))?;
        let line_b = self.get(b).ok_or(EditError::UnknownPolyline(b))?;

        const ENDS: [PolylineEnd; 2] = [PolylineEnd::Start, PolylineEnd::End];
        ENDS.iter()
            .flat_map(|ea| ENDS.iter().map(move |eb| (*ea, *eb)))
            .filter_map(|(ea, eb)| {
                let pa = line_a.endpoint(ea)?;
                let pb = line_b.endpoint(eb)?;
                Some((ea, eb, pa.distance(pb)))
            })
            .min_by(|x, y| x.2.total_cmp(&y.2))
            .map(|(ea, eb, _)| (ea, eb))
            .ok_or(EditError::UnknownPolyline(a))
    }
}

impl Default for PolylineStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Fügt `b` so an `a` an, dass `a_end` und `b_end` aufeinandertreffen.
fn merge_points(
    a: &[Point3],
    a_end: PolylineEnd,
    b: &[Point3],
    b_end: PolylineEnd,
) -> Vec<Point3> {
    let mut b_oriented = b.to_vec();
    // Nach dem Umdrehen liegt der Verbindungspunkt von b an der passenden Seite
    let reverse_b = match a_end {
        PolylineEnd::End => b_end == PolylineEnd::End,
        PolylineEnd::Start => b_end == PolylineEnd::Start,
    };
    if reverse_b {
        b_oriented.reverse();
    }

    let (head, tail) = match a_end {
        PolylineEnd::End => (a.to_vec(), b_oriented),
        PolylineEnd::Start => (b_oriented, a.to_vec()),
    };

    let mut merged = head;
    merged.reserve(tail.len());
    let skip = match (merged.last(), tail.first()) {
        (Some(last), Some(first)) if last.distance(*first) <= COINCIDENT_EPSILON => 1,
        _ => 0,
    };
    merged.extend(tail.into_iter().skip(skip));
    merged
}

#[cfg(test)]
mod tests;
