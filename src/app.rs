// src/app.rs
//
// Atelier algébrique : état (etat.rs) + vue egui (vue.rs).
// Même App en natif et en wasm.

pub mod etat;
pub mod vue;

pub use etat::AppAlgebre;

use eframe::egui;

/// Rappel de grammaire affiché en pied de page.
const AIDE_GRAMMAIRE: &str =
    "nombres 12, 3/4, 0.25 · symboles x, y, … · + - * / ^ · sqrt(m), abs(m) : m monôme · division par un monôme seulement";

impl eframe::App for AppAlgebre {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Échap : vide l’entrée, la forme affichée reste
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.effacer_entree();
        }

        egui::TopBottomPanel::bottom("aide_grammaire").show(ctx, |ui| {
            ui.small(AIDE_GRAMMAIRE);
        });

        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }
}
