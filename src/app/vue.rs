// src/app/vue.rs
//
// Vue egui de l’atelier : entrée, forme réduite, tableau des monômes,
// substitution des symboles, démarche.
// Tout le calcul passe par etat.rs ; ici, seulement de l’affichage.

use eframe::egui;

use super::etat::{AppAlgebre, Substitution};

impl AppAlgebre {
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Algèbre exacte");
                ui.add_space(4.0);

                self.ui_entree(ui);
                ui.separator();

                if self.forme.is_none() {
                    ui.weak("Aucune forme évaluée.");
                    return;
                }

                self.ui_forme(ui);
                ui.separator();
                self.ui_monomes(ui);
                ui.separator();
                self.ui_substitution(ui);
                ui.separator();
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let mut lancer = false;

        ui.horizontal(|ui| {
            let champ = ui.add(
                egui::TextEdit::singleline(&mut self.entree)
                    .id_salt("entree_algebre")
                    .hint_text("(x+1)^2, 3/4*x·y - x/2, sqrt(9*x^2)")
                    .desired_width(ui.available_width() - 140.0)
                    .code_editor(),
            );
            if self.focus_entree {
                champ.request_focus();
                self.focus_entree = false;
            }
            if champ.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                lancer = true;
            }

            lancer |= ui.button("Réduire").clicked();
            if ui.button("Effacer").on_hover_text("Historique conservé").clicked() {
                self.effacer_tout();
            }
        });

        if lancer {
            self.evaluer();
        }

        if !self.historique.is_empty() {
            let mut choisi = None;
            egui::ComboBox::from_id_salt("historique")
                .selected_text("Historique")
                .show_ui(ui, |ui| {
                    for (i, r) in self.historique.iter().enumerate() {
                        let texte = format!("{}  =  {}", r.expression, r.exact);
                        if ui.selectable_label(false, texte).clicked() {
                            choisi = Some(i);
                        }
                    }
                });
            if let Some(i) = choisi {
                self.rappeler(i);
            }
        }

        if let Some(e) = &self.erreur {
            ui.colored_label(ui.visuals().error_fg_color, e);
        }
    }

    fn ui_forme(&mut self, ui: &mut egui::Ui) {
        ui.label("Forme réduite :");
        ui.add(egui::Label::new(egui::RichText::new(&self.exact).monospace().size(18.0)).wrap());

        ui.horizontal(|ui| {
            ui.label("ΣLocal :");
            match &self.lecture {
                Some(l) => {
                    ui.monospace(l);
                }
                None => {
                    ui.weak("indisponible (symboles, nan ou ±inf)");
                }
            }
        });

        let mut d = self.digits;
        let r = ui.add(
            egui::Slider::new(&mut d, 0..=200)
                .text("chiffres")
                .clamping(egui::SliderClamping::Always),
        );
        if r.changed() {
            self.set_digits(d);
        }
    }

    fn ui_monomes(&self, ui: &mut egui::Ui) {
        let lignes = self.lignes();
        let degre = self
            .degre()
            .map(|g| g.to_string())
            .unwrap_or_else(|| "—".into());
        ui.label(format!("Monômes : {}   ·   degré {degre}", lignes.len()));

        egui::Grid::new("monomes")
            .striped(true)
            .num_columns(3)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.strong("coefficient");
                ui.strong("partie littérale");
                ui.strong("degré");
                ui.end_row();

                for l in &lignes {
                    ui.monospace(&l.coefficient);
                    ui.monospace(&l.litteral);
                    ui.monospace(&l.degre);
                    ui.end_row();
                }
            });
    }

    fn ui_substitution(&mut self, ui: &mut egui::Ui) {
        if self.valeurs.is_empty() {
            ui.weak("Pas de symbole à remplacer.");
            return;
        }

        ui.label("Substitution :");
        egui::Grid::new("substitution").num_columns(2).show(ui, |ui| {
            for (s, texte) in self.valeurs.iter_mut() {
                ui.monospace(format!("{} =", s.nom()));
                ui.add(
                    egui::TextEdit::singleline(texte)
                        .hint_text("3/4, 0.5, -2")
                        .desired_width(120.0),
                );
                ui.end_row();
            }
        });

        match self.substitution() {
            Substitution::Valeur { exacte, lecture } => {
                ui.monospace(format!("= {exacte}"));
                if let Some(l) = lecture {
                    ui.monospace(format!("≈ {l}"));
                }
            }
            Substitution::Incomplete(manquants) => {
                ui.weak(format!("sans valeur : {}", manquants.join(", ")));
            }
            Substitution::Illisible { symbole, texte } => {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("{symbole} : « {texte} » n’est pas un nombre"),
                );
            }
            Substitution::SansForme => {}
        }
    }

    fn ui_demarche(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                ui.label("Jetons :");
                ui.monospace(&self.jetons);
                ui.label("RPN :");
                ui.monospace(&self.rpn);
            });
    }
}
