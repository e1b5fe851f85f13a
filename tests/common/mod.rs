//! Gemeinsame Test-Hilfen: Controller, State und Headless-Szene in einem Paket.
//!
//! Die Szene ist 1000×1000 Pixel groß bei 0,1 Welteinheiten pro Pixel,
//! Bildschirm (x, y) entspricht also Welt (x/10, y/10, 0).

#![allow(dead_code)]

use glam::Vec2;
use outcrop_polyline_mapper::{
    AppController, AppIntent, AppState, HeadlessScene, ModeKey, PolylineId, SceneRequest,
};

pub struct Harness {
    pub controller: AppController,
    pub state: AppState,
    pub scene: HeadlessScene,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            controller: AppController::new(),
            state: AppState::new(),
            scene: HeadlessScene::new(Vec2::new(1000.0, 1000.0), 0.1),
        }
    }

    pub fn send(&mut self, intent: AppIntent) {
        self.controller
            .handle_intent(&mut self.state, &mut self.scene, intent)
            .expect("Intent sollte ohne Fehler verarbeitet werden");
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.send(AppIntent::ViewportClicked {
            screen_pos: Vec2::new(x, y),
        });
    }

    pub fn key(&mut self, key: ModeKey) {
        self.send(AppIntent::ModeKeyPressed { key });
    }

    /// Digitalisiert eine Polylinie aus dem Select-Modus heraus und kehrt nach Select zurück.
    pub fn digitize(&mut self, points: &[(f32, f32)]) -> PolylineId {
        self.key(ModeKey::ToggleDigitize);
        for &(x, y) in points {
            self.click(x, y);
        }
        self.key(ModeKey::Finish);
        self.key(ModeKey::ToggleDigitize);

        self.state
            .store
            .ids()
            .last()
            .expect("Nach Enter sollte eine Polylinie existieren")
    }

    /// Selektiert per Klick und wechselt in den Edit-Modus.
    pub fn enter_edit(&mut self, x: f32, y: f32) {
        self.click(x, y);
        self.key(ModeKey::ToggleEdit);
    }

    pub fn take_requests(&mut self) -> Vec<SceneRequest> {
        self.scene.take_requests()
    }
}
