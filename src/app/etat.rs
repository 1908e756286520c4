//! src/app/etat.rs
//!
//! État de l’atelier algébrique (sans egui).
//!
//! On garde la dernière forme réduite (`Algebra`) et non son seul texte :
//! le tableau des monômes et la substitution se calculent à partir d’elle.
//! Une faute de saisie ne remplace pas la forme précédente.

use std::collections::BTreeMap;

use calculatrice_algebre::noyau::{
    eval_expression, lecture_decimale, Algebra, DemarcheNoyau, Fraction, Symbole,
};

/// Précision ΣLocal par défaut.
const DIGITS_DEFAUT: usize = 20;

const DIGITS_MAX: usize = 200;

/// Entrées gardées dans l’historique (la plus récente en tête).
const HISTORIQUE_MAX: usize = 16;

/// Une ligne du tableau des monômes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LigneTerme {
    pub coefficient: String,
    pub litteral: String,
    pub degre: String,
}

/// Résultat de la substitution des symboles par des valeurs saisies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Substitution {
    /// Rien d’évalué pour l’instant.
    SansForme,
    /// Symboles encore sans valeur.
    Incomplete(Vec<String>),
    /// Valeur illisible pour ce symbole.
    Illisible { symbole: String, texte: String },
    Valeur { exacte: String, lecture: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rappel {
    pub expression: String,
    pub exact: String,
}

#[derive(Clone, Debug)]
pub struct AppAlgebre {
    pub entree: String,

    pub forme: Option<Algebra>,
    pub exact: String,
    pub lecture: Option<String>,
    pub erreur: Option<String>,

    // démarche texte du noyau
    pub jetons: String,
    pub rpn: String,

    /// Texte saisi par symbole de la forme courante.
    pub valeurs: BTreeMap<Symbole, String>,

    pub historique: Vec<Rappel>,
    pub digits: usize,

    /// vue.rs redonne le focus à l’entrée au prochain affichage.
    pub focus_entree: bool,
}

impl Default for AppAlgebre {
    fn default() -> Self {
        Self {
            entree: String::new(),
            forme: None,
            exact: String::new(),
            lecture: None,
            erreur: None,
            jetons: String::new(),
            rpn: String::new(),
            valeurs: BTreeMap::new(),
            historique: Vec::new(),
            digits: DIGITS_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppAlgebre {
    /* ------------------------ Évaluation ------------------------ */

    /// Passe l’entrée au noyau ; en cas d’erreur, la forme précédente reste.
    pub fn evaluer(&mut self) {
        match eval_expression(&self.entree, self.digits) {
            Ok((exact, lecture, demarche)) => self.deposer(exact, lecture, demarche),
            Err(e) => {
                log::debug!("évaluation refusée: {e}");
                self.erreur = Some(e.to_string());
            }
        }
        self.focus_entree = true;
    }

    fn deposer(&mut self, exact: String, lecture: Option<String>, demarche: DemarcheNoyau) {
        let expression = self.entree.trim().to_string();
        self.noter(Rappel {
            expression,
            exact: exact.clone(),
        });

        self.erreur = None;
        self.exact = exact;
        self.lecture = lecture;
        self.jetons = demarche.jetons;
        self.rpn = demarche.rpn;

        // on garde les valeurs déjà tapées pour les symboles qui restent
        let symboles = demarche.algebre.symboles();
        self.valeurs.retain(|s, _| symboles.contains(s));
        for s in symboles {
            self.valeurs.entry(s).or_default();
        }

        self.forme = Some(demarche.algebre);
    }

    fn noter(&mut self, rappel: Rappel) {
        if self.historique.first() == Some(&rappel) {
            return;
        }
        self.historique.insert(0, rappel);
        self.historique.truncate(HISTORIQUE_MAX);
    }

    /// Remet une expression de l’historique dans l’entrée.
    pub fn rappeler(&mut self, indice: usize) {
        if let Some(r) = self.historique.get(indice) {
            self.entree = r.expression.clone();
            self.focus_entree = true;
        }
    }

    /* ------------------------ Lecture de la forme ------------------------ */

    pub fn lignes(&self) -> Vec<LigneTerme> {
        let Some(forme) = &self.forme else {
            return Vec::new();
        };
        forme
            .termes()
            .iter()
            .map(|t| LigneTerme {
                coefficient: t.coefficient().to_string(),
                litteral: if t.est_valeur() {
                    "1".into()
                } else {
                    t.avec_coefficient(Fraction::UN).to_string()
                },
                degre: t.degre().to_string(),
            })
            .collect()
    }

    pub fn degre(&self) -> Option<Fraction> {
        self.forme.as_ref().and_then(Algebra::degre)
    }

    pub fn substitution(&self) -> Substitution {
        let Some(forme) = &self.forme else {
            return Substitution::SansForme;
        };

        let mut lues = BTreeMap::new();
        let mut manquants = Vec::new();
        for (s, texte) in &self.valeurs {
            if texte.trim().is_empty() {
                manquants.push(s.nom().to_string());
                continue;
            }
            match Fraction::parse(texte) {
                Some(v) => {
                    lues.insert(s.clone(), v);
                }
                None => {
                    return Substitution::Illisible {
                        symbole: s.nom().to_string(),
                        texte: texte.clone(),
                    }
                }
            }
        }
        if !manquants.is_empty() {
            return Substitution::Incomplete(manquants);
        }

        match forme.evaluer(&lues) {
            Some(v) => Substitution::Valeur {
                exacte: v.to_string(),
                lecture: lecture_decimale(&v, self.digits),
            },
            // tous les symboles ont une valeur : n’arrive pas
            None => Substitution::SansForme,
        }
    }

    /* ------------------------ Réglages / effacement ------------------------ */

    /// Recalcule ΣLocal avec la nouvelle précision, sans réévaluer l’entrée.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        self.lecture = self
            .forme
            .as_ref()
            .and_then(Algebra::valeur)
            .and_then(|v| lecture_decimale(&v, self.digits));
    }

    pub fn effacer_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// Tout sauf l’historique.
    pub fn effacer_tout(&mut self) {
        let historique = std::mem::take(&mut self.historique);
        *self = AppAlgebre {
            historique,
            ..AppAlgebre::default()
        };
    }
}
