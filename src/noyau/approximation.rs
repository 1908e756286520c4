// src/noyau/approximation.rs
//
// f64 -> Fraction
// 1) nombre entier  => n/1 (saturé en ±inf hors i64)
// 2) <= 10 décimales (sauf approximation forcée) => chiffres / 10^k, exact
// 3) sinon fraction continue bornée : au plus `precision` quotients,
//    arrêt si reste nul ou si un quotient dépasse la garde (±10000)
//
// Le repli des quotients se fait en i64 vérifié ; si ça déborde, on retire
// des quotients de queue (convergent moins fin mais représentable).

use log::trace;

use super::fraction::Fraction;

/// Nombre de quotients partiels par défaut.
pub const PRECISION_DEFAUT: usize = 20;

/// Au-delà, un quotient partiel signale un quasi-entier : on s’arrête.
pub const GARDE_QUOTIENT: f64 = 10_000.0;

/// Seuil du chemin décimal exact.
pub const CHIFFRES_DECIMAUX_MAX: usize = 10;

/// 2^63 : premier flottant hors i64.
const LIMITE_I64: f64 = 9_223_372_036_854_775_808.0;

/// Convertit un flottant en rationnel.
pub fn vers_fraction(valeur: f64, forcer_approximation: bool, precision: usize) -> Fraction {
    if valeur.is_nan() {
        return Fraction::NAN;
    }
    if valeur.is_infinite() {
        return if valeur > 0.0 {
            Fraction::INFINI
        } else {
            Fraction::MOINS_INFINI
        };
    }

    if valeur.fract() == 0.0 {
        return entier_sature(valeur);
    }

    if !forcer_approximation {
        if let Some(f) = decimale_exacte(valeur) {
            return f;
        }
    }

    replier_quotients(&quotients_partiels(valeur, precision))
}

fn entier_sature(valeur: f64) -> Fraction {
    if valeur >= LIMITE_I64 {
        return Fraction::INFINI;
    }
    if valeur < -LIMITE_I64 {
        return Fraction::MOINS_INFINI;
    }
    Fraction::entier(valeur as i64)
}

/// Chemin décimal : l’affichage f64 de Rust n’utilise jamais d’exposant.
fn decimale_exacte(valeur: f64) -> Option<Fraction> {
    let texte = valeur.to_string();
    let (_, decimales) = texte.split_once('.')?;
    if decimales.len() > CHIFFRES_DECIMAUX_MAX {
        return None;
    }
    Fraction::parse(&texte)
}

/// Développement en fraction continue : [q0; q1, q2, ...], au plus `precision` termes.
pub fn quotients_partiels(valeur: f64, precision: usize) -> Vec<i64> {
    let mut quotients: Vec<i64> = Vec::with_capacity(precision.min(64));
    let mut reste = valeur;

    while quotients.len() < precision {
        let partie = reste.floor();

        // q0 est la partie entière (libre) ; les suivants sont gardés
        if !quotients.is_empty() && partie.abs() > GARDE_QUOTIENT {
            break;
        }
        if partie.abs() >= LIMITE_I64 {
            break;
        }

        quotients.push(partie as i64);

        let fractionnaire = reste - partie;
        if fractionnaire == 0.0 {
            break;
        }
        reste = fractionnaire.recip();
        if !reste.is_finite() {
            break;
        }
    }

    trace!("fraction continue de {valeur} : {quotients:?}");
    quotients
}

/// Replie [q0; q1, ..., qk] en un seul n/d.
/// Liste vide => 0.
pub fn replier_quotients(quotients: &[i64]) -> Fraction {
    let mut utiles = quotients.len();

    while utiles > 0 {
        if let Some((n, d)) = replier(&quotients[..utiles]) {
            return Fraction::new(n, d);
        }
        trace!("repli hors i64 avec {utiles} quotients : on retire le dernier");
        utiles -= 1;
    }

    Fraction::ZERO
}

fn replier(quotients: &[i64]) -> Option<(i64, i64)> {
    let (dernier, reste) = quotients.split_last()?;

    let mut numerateur = *dernier;
    let mut denominateur: i64 = 1;

    // x = q + 1/(n/d) = (q*n + d)/n : on échange puis on accumule
    for &q in reste.iter().rev() {
        std::mem::swap(&mut numerateur, &mut denominateur);
        numerateur = denominateur.checked_mul(q)?.checked_add(numerateur)?;
    }

    Some((numerateur, denominateur))
}
