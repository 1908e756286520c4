// src/noyau/algebre.rs
//
// Combinaison linéaire de monômes (Algebra).
// - construction : liste triée (pas réduite)
// - reduite() : SEUL point de normalisation
//     regroupement des semblables (clef triée base/exposant, BTreeMap),
//     somme des coefficients, retrait des zéros, tri
// - chaque opérateur concatène / distribue puis appelle reduite() une fois
// - les formes en place (+=, ...) remplacent la valeur, rien n’est partagé

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::fraction::Fraction;
use super::terme::{AlgebraTerm, CleTerme, Symbole};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Algebra {
    termes: Vec<AlgebraTerm>,
}

impl Algebra {
    /// Liste de monômes, triée (non réduite).
    pub fn new(termes: Vec<AlgebraTerm>) -> Algebra {
        let mut termes = termes;
        termes.sort_by(AlgebraTerm::comparer);
        Algebra { termes }
    }

    pub fn termes(&self) -> &[AlgebraTerm] {
        &self.termes
    }

    pub fn est_vide(&self) -> bool {
        self.termes.is_empty()
    }

    /// Regroupe les semblables, somme les coefficients, retire les zéros, trie.
    pub fn reduite(&self) -> Algebra {
        let mut groupes: BTreeMap<CleTerme, AlgebraTerm> = BTreeMap::new();

        for t in &self.termes {
            match groupes.entry(t.cle()) {
                Entry::Occupied(mut e) => {
                    let acc = e.get_mut();
                    *acc = acc.avec_coefficient(acc.coefficient() + t.coefficient());
                }
                Entry::Vacant(e) => {
                    e.insert(t.clone());
                }
            }
        }

        Algebra::new(
            groupes
                .into_values()
                .filter(|t| !t.coefficient().est_zero())
                .collect(),
        )
    }

    /// Valeur scalaire si la forme réduite n’a aucun terme variable (vide => 0).
    pub fn valeur(&self) -> Option<Fraction> {
        let r = self.reduite();
        match r.termes.as_slice() {
            [] => Some(Fraction::ZERO),
            [t] if t.est_valeur() => Some(t.coefficient()),
            _ => None,
        }
    }

    /// Monôme unique (vide => 0) ; sert aux divisions et puissances rationnelles.
    pub fn monome(&self) -> Option<AlgebraTerm> {
        let r = self.reduite();
        match r.termes.as_slice() {
            [] => Some(AlgebraTerm::valeur(Fraction::ZERO)),
            [t] => Some(t.clone()),
            _ => None,
        }
    }

    /// Plus haut degré total (None si vide).
    pub fn degre(&self) -> Option<Fraction> {
        self.termes
            .iter()
            .map(AlgebraTerm::degre)
            .reduce(|a, b| if b > a { b } else { a })
    }

    pub fn symboles(&self) -> BTreeSet<Symbole> {
        self.termes
            .iter()
            .flat_map(|t| t.bases().iter().cloned())
            .collect()
    }

    /// Puissance entière par distributions successives.
    pub fn puissance(&self, n: u32) -> Algebra {
        let mut acc = Algebra::from(Fraction::UN);
        for _ in 0..n {
            acc = acc * self.clone();
        }
        acc
    }

    /// Substitution ; None si un symbole n’a pas de valeur.
    pub fn evaluer(&self, valeurs: &BTreeMap<Symbole, Fraction>) -> Option<Fraction> {
        self.termes
            .iter()
            .map(|t| t.evaluer(valeurs))
            .sum::<Option<Fraction>>()
    }
}

/* ------------------------ Conversions ------------------------ */

impl From<AlgebraTerm> for Algebra {
    fn from(t: AlgebraTerm) -> Algebra {
        Algebra { termes: vec![t] }
    }
}

impl From<Vec<AlgebraTerm>> for Algebra {
    fn from(termes: Vec<AlgebraTerm>) -> Algebra {
        Algebra::new(termes)
    }
}

impl From<Fraction> for Algebra {
    fn from(f: Fraction) -> Algebra {
        Algebra::from(AlgebraTerm::valeur(f))
    }
}

impl From<Symbole> for Algebra {
    fn from(s: Symbole) -> Algebra {
        Algebra::from(AlgebraTerm::symbole(s))
    }
}

/* ------------------------ Opérateurs ------------------------ */

impl Add for Algebra {
    type Output = Algebra;

    fn add(self, rhs: Algebra) -> Algebra {
        let mut termes = self.termes;
        termes.extend(rhs.termes);
        Algebra { termes }.reduite()
    }
}

impl Sub for Algebra {
    type Output = Algebra;

    fn sub(self, rhs: Algebra) -> Algebra {
        let mut termes = self.termes;
        termes.extend(rhs.termes.into_iter().map(|t| -t));
        Algebra { termes }.reduite()
    }
}

impl Neg for Algebra {
    type Output = Algebra;

    fn neg(self) -> Algebra {
        Algebra {
            termes: self.termes.into_iter().map(|t| -t).collect(),
        }
        .reduite()
    }
}

impl Mul<AlgebraTerm> for Algebra {
    type Output = Algebra;

    fn mul(self, rhs: AlgebraTerm) -> Algebra {
        Algebra {
            termes: self.termes.into_iter().map(|t| t * rhs.clone()).collect(),
        }
        .reduite()
    }
}

impl Mul<Algebra> for AlgebraTerm {
    type Output = Algebra;

    fn mul(self, rhs: Algebra) -> Algebra {
        rhs * self
    }
}

impl Mul<Fraction> for Algebra {
    type Output = Algebra;

    fn mul(self, rhs: Fraction) -> Algebra {
        Algebra {
            termes: self.termes.into_iter().map(|t| t * rhs).collect(),
        }
        .reduite()
    }
}

impl Mul for Algebra {
    type Output = Algebra;

    /// Distribution complète, une seule réduction à la fin.
    fn mul(self, rhs: Algebra) -> Algebra {
        let mut termes = Vec::with_capacity(self.termes.len() * rhs.termes.len());
        for a in &self.termes {
            for b in &rhs.termes {
                termes.push(a.clone() * b.clone());
            }
        }
        Algebra { termes }.reduite()
    }
}

impl Div<AlgebraTerm> for Algebra {
    type Output = Algebra;

    /// Chaque monôme est multiplié par l’inverse (exposants opposés) du diviseur.
    fn div(self, rhs: AlgebraTerm) -> Algebra {
        self * rhs.inverse()
    }
}

impl Div<Fraction> for Algebra {
    type Output = Algebra;

    fn div(self, rhs: Fraction) -> Algebra {
        self / AlgebraTerm::valeur(rhs)
    }
}

impl Add for AlgebraTerm {
    type Output = Algebra;

    fn add(self, rhs: AlgebraTerm) -> Algebra {
        Algebra::from(self) + Algebra::from(rhs)
    }
}

impl Sub for AlgebraTerm {
    type Output = Algebra;

    fn sub(self, rhs: AlgebraTerm) -> Algebra {
        Algebra::from(self) - Algebra::from(rhs)
    }
}

impl AddAssign for Algebra {
    fn add_assign(&mut self, rhs: Algebra) {
        *self = std::mem::take(self) + rhs;
    }
}

impl SubAssign for Algebra {
    fn sub_assign(&mut self, rhs: Algebra) {
        *self = std::mem::take(self) - rhs;
    }
}

impl MulAssign for Algebra {
    fn mul_assign(&mut self, rhs: Algebra) {
        *self = std::mem::take(self) * rhs;
    }
}

impl MulAssign<AlgebraTerm> for Algebra {
    fn mul_assign(&mut self, rhs: AlgebraTerm) {
        *self = std::mem::take(self) * rhs;
    }
}

impl DivAssign<AlgebraTerm> for Algebra {
    fn div_assign(&mut self, rhs: AlgebraTerm) {
        *self = std::mem::take(self) / rhs;
    }
}

/* ------------------------ Affichage ------------------------ */

impl fmt::Display for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((premier, suite)) = self.termes.split_first() else {
            return write!(f, "0");
        };

        write!(f, "{premier}")?;
        for t in suite {
            if t.coefficient().est_negatif() {
                write!(f, " - {}", -t.clone())?;
            } else {
                write!(f, " + {t}")?;
            }
        }
        Ok(())
    }
}
