//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Algebra (réduite à chaque opération) -> EXACT -> ΣLocal
//!
//! ΣLocal n’existe que si la forme réduite est une valeur finie (aucun symbole).

use log::debug;

use super::algebre::Algebra;
use super::erreur::ErreurNoyau;
use super::jetons::{format_tokens, tokenize};
use super::lecture::lecture_decimale;
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub forme: String,
    pub degre: String,
    pub symboles: String,
    pub note: String,
    /// Forme réduite elle-même (tableau des monômes, substitution).
    pub algebre: Algebra,
}

/// API publique : évalue une expression et retourne:
/// - EXACT (combinaison réduite)
/// - ΣLocal (lecture décimale tronquée) : None si symbole, nan ou ±inf
/// - Démarche (jetons, rpn, forme, degré, symboles, Algebra réduite)
pub fn eval_expression(
    expr_str: &str,
    digits: usize,
) -> Result<(String, Option<String>, DemarcheNoyau), ErreurNoyau> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurNoyau::EntreeVide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons: {jetons_txt}");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!("rpn: {rpn_txt}");

    // 3) Algebra
    let algebre = from_rpn(&rpn)?;
    debug!("forme réduite: {algebre} ({} termes)", algebre.termes().len());

    // 4) EXACT
    let exact = algebre.to_string();

    // 5) ΣLocal
    let lecture = algebre
        .valeur()
        .and_then(|v| lecture_decimale(&v, digits));

    // 6) Démarche
    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        forme: format_termes(&algebre),
        degre: algebre
            .degre()
            .map(|g| g.to_string())
            .unwrap_or_else(|| "—".into()),
        symboles: format_symboles(&algebre),
        note: "Pipeline: jetons → RPN → Algebra (réduite à chaque opération) → EXACT → ΣLocal."
            .into(),
        algebre,
    };

    Ok((exact, lecture, d))
}

/// Un monôme par ligne, dans l’ordre d’affichage.
fn format_termes(a: &Algebra) -> String {
    if a.est_vide() {
        return "0".into();
    }
    a.termes()
        .iter()
        .map(|t| format!("{t}  (degré {})", t.degre()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_symboles(a: &Algebra) -> String {
    let s = a.symboles();
    if s.is_empty() {
        return "aucun".into();
    }
    s.iter().map(|b| b.nom()).collect::<Vec<_>>().join(", ")
}
