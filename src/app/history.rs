use crate::core::PolylineStore;
use std::sync::Arc;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1),
/// der Klon des Stores passiert erst beim nächsten `Arc::make_mut()`.
/// Die Selektion steckt im Store und wird mitgesichert.
#[derive(Clone)]
pub struct Snapshot {
    /// Polyline-Store zum Zeitpunkt des Snapshots
    pub store: Arc<PolylineStore>,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &crate::app::AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
        }
    }

    /// Stellt den Snapshot wieder her und repariert danach die Modus-Invarianten.
    pub fn apply_to(self, state: &mut crate::app::AppState) {
        state.store = self.store;
        state.reconcile_mode();
    }
}

/// Undo/Redo-Manager mit begrenzter Tiefe.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Legt einen Snapshot auf den Undo-Stack und verwirft den Redo-Stack.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        push_bounded(&mut self.undo_stack, snap, self.max_depth);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl verfügbarer Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Holt den letzten Undo-Snapshot; `current` wandert auf den Redo-Stack.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop()?;
        push_bounded(&mut self.redo_stack, current, self.max_depth);
        Some(prev)
    }

    /// Holt den letzten Redo-Snapshot; `current` wandert auf den Undo-Stack.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        push_bounded(&mut self.undo_stack, current, self.max_depth);
        Some(next)
    }

    /// Verwirft die gesamte History (z.B. nach dem Laden einer Datei).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut Vec<Snapshot>, snap: Snapshot, max_depth: usize) {
    if stack.len() >= max_depth {
        stack.remove(0);
    }
    stack.push(snap);
}
