// src/noyau/polynome.rs
//
// Source “polynomiale” (degrés + coefficients, du plus haut au constant)
// et passage vers Algebra : un monôme coeff·x^degré par entrée,
// sauf la dernière qui devient une valeur nue (terme constant).

use super::algebre::Algebra;
use super::fraction::Fraction;
use super::terme::{AlgebraTerm, Symbole};

pub trait SourcePolynomiale {
    /// Degrés alignés sur `coefficients()` ; le dernier est le terme constant.
    fn degres(&self) -> Vec<Fraction>;

    fn coefficients(&self) -> Vec<Fraction>;

    fn variable(&self) -> Symbole {
        Symbole::new("x")
    }
}

/// Polynôme dense en une variable, coefficients du plus haut degré au constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynome {
    coefficients: Vec<Fraction>,
    variable: Symbole,
}

impl Polynome {
    pub fn new(coefficients: Vec<Fraction>) -> Polynome {
        Polynome::avec_variable(coefficients, "x")
    }

    pub fn avec_variable(coefficients: Vec<Fraction>, variable: impl Into<Symbole>) -> Polynome {
        Polynome {
            coefficients,
            variable: variable.into(),
        }
    }

    /// Degré nominal (nombre de coefficients - 1) ; 0 si vide.
    pub fn degre(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner.
    pub fn evaluer(&self, x: Fraction) -> Fraction {
        self.coefficients
            .iter()
            .fold(Fraction::ZERO, |acc, c| acc * x + *c)
    }
}

impl SourcePolynomiale for Polynome {
    fn degres(&self) -> Vec<Fraction> {
        (0..self.coefficients.len())
            .rev()
            .map(|d| Fraction::entier(d as i64))
            .collect()
    }

    fn coefficients(&self) -> Vec<Fraction> {
        self.coefficients.clone()
    }

    fn variable(&self) -> Symbole {
        self.variable.clone()
    }
}

impl Algebra {
    /// Un monôme par entrée, la dernière en valeur nue ; triée, non réduite.
    pub fn depuis_polynome<P: SourcePolynomiale + ?Sized>(source: &P) -> Algebra {
        let degres = source.degres();
        let coefficients = source.coefficients();
        let variable = source.variable();

        let n = degres.len().min(coefficients.len());
        let termes = degres
            .into_iter()
            .zip(coefficients)
            .enumerate()
            .map(|(i, (degre, coefficient))| {
                if i + 1 == n {
                    AlgebraTerm::valeur(coefficient)
                } else {
                    AlgebraTerm::new(coefficient, variable.clone(), degre)
                }
            })
            .collect();

        Algebra::new(termes)
    }
}

impl From<&Polynome> for Algebra {
    fn from(p: &Polynome) -> Algebra {
        Algebra::depuis_polynome(p)
    }
}
