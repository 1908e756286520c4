// src/noyau/arithmetique.rs
//
// Capacité “arithmétique” partagée par Fraction et par tout type numérique
// qui voudrait se poser dessus (ex: un complexe) : zéro, magnitude,
// + - * / (et formes en place), comparaison, construction depuis un entier.
// Les variantes signées ajoutent l’opposé.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::Zero;

use super::fraction::Fraction;

pub trait Arithmetique:
    Zero
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Valeur absolue (module pour un type non réel).
    fn magnitude(&self) -> Self;

    fn depuis_entier(n: i64) -> Self;
}

pub trait ArithmetiqueSignee: Arithmetique + Neg<Output = Self> {
    /// Opposé additif.
    fn oppose(&self) -> Self {
        -self.clone()
    }
}

/// Moyenne d’une suite (None si vide).
pub fn moyenne<T: Arithmetique>(valeurs: &[T]) -> Option<T> {
    if valeurs.is_empty() {
        return None;
    }
    let somme = valeurs
        .iter()
        .cloned()
        .fold(T::zero(), |acc, v| acc + v);
    let n = i64::try_from(valeurs.len()).ok()?;
    Some(somme / T::depuis_entier(n))
}

impl Arithmetique for Fraction {
    fn magnitude(&self) -> Fraction {
        self.abs()
    }

    fn depuis_entier(n: i64) -> Fraction {
        Fraction::entier(n)
    }
}

impl ArithmetiqueSignee for Fraction {}

impl Arithmetique for f64 {
    fn magnitude(&self) -> f64 {
        self.abs()
    }

    fn depuis_entier(n: i64) -> f64 {
        n as f64
    }
}

impl ArithmetiqueSignee for f64 {}

impl Arithmetique for i64 {
    fn magnitude(&self) -> i64 {
        self.saturating_abs()
    }

    fn depuis_entier(n: i64) -> i64 {
        n
    }
}

impl ArithmetiqueSignee for i64 {}
