//! Zentrale Konfiguration für den Outcrop Polyline Mapper.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.
//! Alle Toleranzen sind Anteile der Mesh-Diagonale und damit maßstabsunabhängig.

use serde::{Deserialize, Serialize};

// ── Pick-Toleranzen (Anteil der Mesh-Diagonale) ────────────────────

/// Selektion einer Polylinie im Select-Modus.
pub const SELECT_TOLERANCE_FRACTION: f64 = 0.008;
/// Treffer auf einen Stützpunkt (Löschen im Edit-Modus).
pub const DELETE_TOLERANCE_FRACTION: f64 = 0.003;
/// Fremder Endpunkt zum Verbinden.
pub const JOIN_TOLERANCE_FRACTION: f64 = 0.008;
/// Bereich um einen Endpunkt der aktiven Polylinie, in dem verlängert wird.
pub const EXTEND_TOLERANCE_FRACTION: f64 = 0.05;
/// Diagonale, falls weder Mesh noch Polylinien eine Ausdehnung liefern.
pub const FALLBACK_SCENE_DIAGONAL: f64 = 1.0;

// ── Topologie ───────────────────────────────────────────────────────

/// Schwelle `tau` der Topologie-Klassifikation als Vielfaches des mittleren Stützpunktabstands.
pub const TOPOLOGY_TAU_FACTOR: f64 = 2.0;

// ── Kamera ──────────────────────────────────────────────────────────

/// Anteil des Wegs, um den die Kamera beim Doppelklick zum Zielpunkt rückt.
pub const CAMERA_TRANSLATE_FRACTION: f64 = 0.5;

// ── History & Ausgabe ───────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const UNDO_DEPTH: usize = 200;
/// Name des Unterverzeichnisses, in das gespeichert wird.
pub const OUTPUT_SUBDIR: &str = "polylines_output";

// ── Polylinien-Darstellung ─────────────────────────────────────────

/// Farbe normaler Polylinien (RGBA: Blau).
pub const POLYLINE_COLOR_DEFAULT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
/// Farbe der selektierten Polylinie (RGBA: Gelb).
pub const POLYLINE_COLOR_SELECTED: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
/// Farbe der Entwurfs-Polylinie beim Digitalisieren (RGBA: Rot).
pub const POLYLINE_COLOR_DRAFT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Linienbreite normaler Polylinien in Pixeln.
pub const POLYLINE_WIDTH_DEFAULT: f32 = 6.0;
/// Linienbreite selektierter Polylinien und des Entwurfs in Pixeln.
pub const POLYLINE_WIDTH_SELECTED: f32 = 12.0;
/// Radius der Stützpunkt-Marker als Anteil der Mesh-Diagonale.
pub const CONTROL_POINT_RADIUS_FRACTION: f64 = 0.002;

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `outcrop_polyline_mapper.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    // ── Toleranzen ──────────────────────────────────────────────
    /// Selektions-Toleranz (Anteil der Diagonale)
    pub select_tolerance_fraction: f64,
    /// Lösch-Toleranz für Stützpunkte (Anteil der Diagonale)
    pub delete_tolerance_fraction: f64,
    /// Verbindungs-Toleranz (Anteil der Diagonale)
    pub join_tolerance_fraction: f64,
    /// Verlängerungs-Toleranz um Endpunkte (Anteil der Diagonale)
    pub extend_tolerance_fraction: f64,

    // ── Topologie ───────────────────────────────────────────────
    /// `tau` = Faktor × mittlerer Stützpunktabstand
    pub topology_tau_factor: f64,

    // ── Kamera ──────────────────────────────────────────────────
    /// Anteil der Kamerabewegung zum Doppelklick-Ziel
    pub camera_translate_fraction: f64,

    // ── Darstellung ─────────────────────────────────────────────
    /// Farbe normaler Polylinien (RGBA)
    pub polyline_color_default: [f32; 4],
    /// Farbe der selektierten Polylinie (RGBA)
    pub polyline_color_selected: [f32; 4],
    /// Farbe des Digitalisier-Entwurfs (RGBA)
    pub polyline_color_draft: [f32; 4],
    /// Linienbreite normaler Polylinien
    pub polyline_width_default: f32,
    /// Linienbreite selektierter Polylinien
    pub polyline_width_selected: f32,

    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    pub undo_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            select_tolerance_fraction: SELECT_TOLERANCE_FRACTION,
            delete_tolerance_fraction: DELETE_TOLERANCE_FRACTION,
            join_tolerance_fraction: JOIN_TOLERANCE_FRACTION,
            extend_tolerance_fraction: EXTEND_TOLERANCE_FRACTION,
            topology_tau_factor: TOPOLOGY_TAU_FACTOR,
            camera_translate_fraction: CAMERA_TRANSLATE_FRACTION,
            polyline_color_default: POLYLINE_COLOR_DEFAULT,
            polyline_color_selected: POLYLINE_COLOR_SELECTED,
            polyline_color_draft: POLYLINE_COLOR_DRAFT,
            polyline_width_default: POLYLINE_WIDTH_DEFAULT,
            polyline_width_selected: POLYLINE_WIDTH_SELECTED,
            undo_depth: UNDO_DEPTH,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler werden Standardwerte verwendet.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                return Self::default();
            }
        };
        match toml::from_str::<Self>(&content) {
            Ok(opts) => {
                log::info!("Optionen geladen aus: {}", path.display());
                opts.sanitized()
            }
            Err(e) => {
                log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("outcrop_polyline_mapper"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("outcrop_polyline_mapper.toml")
    }

    /// Ersetzt ungültige (negative, NaN) Werte durch die Defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: &mut f64, fallback: f64| {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("Ungültiger Optionswert {}, verwende {}", value, fallback);
                *value = fallback;
            }
        };
        fix(
            &mut self.select_tolerance_fraction,
            defaults.select_tolerance_fraction,
        );
        fix(
            &mut self.delete_tolerance_fraction,
            defaults.delete_tolerance_fraction,
        );
        fix(
            &mut self.join_tolerance_fraction,
            defaults.join_tolerance_fraction,
        );
        fix(
            &mut self.extend_tolerance_fraction,
            defaults.extend_tolerance_fraction,
        );
        fix(&mut self.topology_tau_factor, defaults.topology_tau_factor);
        fix(
            &mut self.camera_translate_fraction,
            defaults.camera_translate_fraction,
        );
        self.camera_translate_fraction = self.camera_translate_fraction.min(1.0);
        if self.undo_depth == 0 {
            self.undo_depth = defaults.undo_depth;
        }
        self
    }
}
