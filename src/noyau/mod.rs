//! Noyau exact : rationnels canoniques + algèbre de monômes
//!
//! Organisation interne :
//! - fraction.rs      : rationnel i64/i64 canonique + valeurs spéciales (nan, ±inf)
//! - approximation.rs : f64 -> Fraction (décimal exact ou fraction continue bornée)
//! - arithmetique.rs  : capacité “Arithmetique” (traits) + aides génériques
//! - terme.rs         : Symbole + AlgebraTerm (monôme)
//! - algebre.rs       : Algebra (combinaison linéaire réduite)
//! - polynome.rs      : source polynomiale -> Algebra
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + évaluation en Algebra
//! - lecture.rs       : ΣLocal (décimal tronqué, big int)
//! - eval.rs          : pipeline complet
//! - erreur.rs        : erreurs du pipeline texte

pub mod algebre;
pub mod approximation;
pub mod arithmetique;
pub mod erreur;
pub mod eval;
pub mod fraction;
pub mod jetons;
pub mod lecture;
pub mod polynome;
pub mod rpn;
pub mod terme;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod proptests;

// API publique
pub use algebre::Algebra;
pub use approximation::vers_fraction;
pub use arithmetique::{moyenne, Arithmetique, ArithmetiqueSignee};
pub use erreur::ErreurNoyau;
pub use eval::{eval_expression, DemarcheNoyau};
pub use fraction::{denominateur_commun, pgcd, ppcm, reduire, Fraction};
pub use lecture::lecture_decimale;
pub use polynome::{Polynome, SourcePolynomiale};
pub use terme::{AlgebraTerm, Symbole};
