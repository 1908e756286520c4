// src/noyau/lecture.rs
//
// ΣLocal : lecture décimale TRONQUÉE d’une Fraction, calculée exactement
// en big int (aucun flottant). nan / ±inf => pas de lecture.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::fraction::Fraction;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Fraction finie -> BigRational (None pour nan / ±inf).
pub fn vers_big_rational(f: &Fraction) -> Option<BigRational> {
    if !f.est_fini() {
        return None;
    }
    Some(BigRational::new(
        BigInt::from(f.numerateur()),
        BigInt::from(f.denominateur()),
    ))
}

/// Entier “scalé” (×10^chiffres) -> texte décimal.
pub fn scale_vers_decimal(mut scale: BigInt, chiffres: usize) -> String {
    let negatif = scale.is_negative();
    if negatif {
        scale = -scale;
    }

    let unite = pow10(chiffres);
    let entier = &scale / &unite;
    let reste = &scale % &unite;
    let signe = if negatif { "-" } else { "" };

    if chiffres == 0 {
        return format!("{signe}{entier}");
    }

    format!("{signe}{entier}.{:0>largeur$}", reste.to_str_radix(10), largeur = chiffres)
}

/// r -> tronque(r × 10^chiffres), vers zéro.
fn rationnel_scale(r: &BigRational, chiffres: usize) -> BigInt {
    (r.numer() * pow10(chiffres)) / r.denom()
}

/// Lecture décimale tronquée à `chiffres` décimales.
pub fn lecture_decimale(f: &Fraction, chiffres: usize) -> Option<String> {
    let r = vers_big_rational(f)?;
    Some(scale_vers_decimal(rationnel_scale(&r, chiffres), chiffres))
}
