// src/noyau/terme.rs
//
// Monôme : coefficient × base1^p1 × base2^p2 × ...
// - coefficient et exposants : Fraction
// - bases uniques dans un terme (le produit fusionne en sommant les exposants)
// - exposant nul retiré à la construction (x^0 = 1)
// - “valeur” si aucun exposant non nul, sinon “variable”
//
// L’ordre interne des bases n’a pas de sens : égalité et clef de regroupement
// passent par la liste triée (base, exposant).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Div, Mul, Neg};

use super::fraction::Fraction;

/* ------------------------ Symbole ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbole(String);

impl Symbole {
    pub fn new(nom: impl Into<String>) -> Symbole {
        Symbole(nom.into())
    }

    pub fn nom(&self) -> &str {
        &self.0
    }

    /// Rang alphabétique : a -> 0, ..., z -> 25. None hors d’une lettre a–z.
    pub fn indice_alphabet(&self) -> Option<u32> {
        let mut it = self.0.chars();
        match (it.next(), it.next()) {
            (Some(c @ 'a'..='z'), None) => Some(c as u32 - 'a' as u32),
            _ => None,
        }
    }
}

impl From<&str> for Symbole {
    fn from(nom: &str) -> Symbole {
        Symbole::new(nom)
    }
}

impl From<String> for Symbole {
    fn from(nom: String) -> Symbole {
        Symbole(nom)
    }
}

impl fmt::Display for Symbole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/* ------------------------ Monôme ------------------------ */

/// Clef canonique d’un monôme : (base, n, d) triés par base.
pub(crate) type CleTerme = Vec<(Symbole, i64, i64)>;

#[derive(Clone, Debug)]
pub struct AlgebraTerm {
    coefficient: Fraction,
    bases: Vec<Symbole>,
    puissances: Vec<Fraction>,
}

impl AlgebraTerm {
    /// coefficient × base^puissance
    pub fn new(coefficient: Fraction, base: impl Into<Symbole>, puissance: Fraction) -> AlgebraTerm {
        AlgebraTerm::avec_facteurs(coefficient, [(base.into(), puissance)])
    }

    /// coefficient × Π base^puissance ; les bases répétées fusionnent.
    pub fn avec_facteurs<I>(coefficient: Fraction, facteurs: I) -> AlgebraTerm
    where
        I: IntoIterator<Item = (Symbole, Fraction)>,
    {
        let mut bases: Vec<Symbole> = Vec::new();
        let mut puissances: Vec<Fraction> = Vec::new();

        for (base, puissance) in facteurs {
            match bases.iter().position(|b| *b == base) {
                Some(i) => puissances[i] += puissance,
                None => {
                    bases.push(base);
                    puissances.push(puissance);
                }
            }
        }

        let (bases, puissances): (Vec<Symbole>, Vec<Fraction>) = bases
            .into_iter()
            .zip(puissances)
            .filter(|(_, p)| !p.est_zero())
            .unzip();

        AlgebraTerm {
            coefficient,
            bases,
            puissances,
        }
    }

    /// Scalaire pur.
    pub fn valeur(coefficient: Fraction) -> AlgebraTerm {
        AlgebraTerm {
            coefficient,
            bases: Vec::new(),
            puissances: Vec::new(),
        }
    }

    /// Symbole nu : 1 × base^1.
    pub fn symbole(base: impl Into<Symbole>) -> AlgebraTerm {
        AlgebraTerm::new(Fraction::UN, base, Fraction::UN)
    }

    pub fn coefficient(&self) -> Fraction {
        self.coefficient
    }

    pub fn bases(&self) -> &[Symbole] {
        &self.bases
    }

    pub fn puissances(&self) -> &[Fraction] {
        &self.puissances
    }

    pub fn est_valeur(&self) -> bool {
        self.puissances.iter().all(Fraction::est_zero)
    }

    pub fn est_variable(&self) -> bool {
        !self.est_valeur()
    }

    /// Degré total : somme des exposants.
    pub fn degre(&self) -> Fraction {
        self.puissances.iter().copied().sum()
    }

    /// Même multiset (base, exposant), coefficient ignoré.
    pub fn sont_semblables(&self, autre: &AlgebraTerm) -> bool {
        self.cle() == autre.cle()
    }

    pub(crate) fn cle(&self) -> CleTerme {
        let mut cle: CleTerme = self
            .bases
            .iter()
            .zip(&self.puissances)
            .map(|(b, p)| (b.clone(), p.numerateur(), p.denominateur()))
            .collect();
        cle.sort();
        cle
    }

    /// Même monôme, autre coefficient.
    pub fn avec_coefficient(&self, coefficient: Fraction) -> AlgebraTerm {
        AlgebraTerm {
            coefficient,
            ..self.clone()
        }
    }

    /// (c·Π b^p)^e = c^e · Π b^(p·e)
    pub fn puissance(&self, exposant: Fraction) -> AlgebraTerm {
        AlgebraTerm::avec_facteurs(
            self.coefficient.puissance(exposant),
            self.bases
                .iter()
                .cloned()
                .zip(self.puissances.iter().map(|p| *p * exposant)),
        )
    }

    /// |coefficient|, bases inchangées.
    pub fn abs(&self) -> AlgebraTerm {
        self.avec_coefficient(self.coefficient.abs())
    }

    /// Inverse en exposant : terme^(-1).
    pub fn inverse(&self) -> AlgebraTerm {
        self.puissance(Fraction::entier(-1))
    }

    /// Substitution ; None si une base n’a pas de valeur.
    pub fn evaluer(&self, valeurs: &BTreeMap<Symbole, Fraction>) -> Option<Fraction> {
        let mut acc = self.coefficient;
        for (base, puissance) in self.bases.iter().zip(&self.puissances) {
            acc *= valeurs.get(base)?.puissance(*puissance);
        }
        Some(acc)
    }

    /// Ordre des monômes, évalué par étages :
    /// 1. mêmes (bases, exposants) => coefficients
    /// 2. même degré total => somme des rangs alphabétiques des bases,
    ///    puis (égalité, ou symbole hors a–z) listes triées comparées une à une
    /// 3. sinon => degré total
    ///
    /// Ordre total (départages sur la forme exacte), donc sûr pour `sort_by`.
    pub fn comparer(&self, autre: &AlgebraTerm) -> Ordering {
        let (cle_a, cle_b) = (self.cle(), autre.cle());

        if cle_a == cle_b {
            return comparer_fractions(&self.coefficient, &autre.coefficient);
        }

        comparer_fractions(&self.degre(), &autre.degre())
            .then_with(|| self.rang_alphabet().cmp(&autre.rang_alphabet()))
            .then_with(|| comparer_cles(&cle_a, &cle_b))
    }

    /// Somme des rangs alphabétiques ; hors a–z, le terme passe après.
    fn rang_alphabet(&self) -> u32 {
        self.bases
            .iter()
            .map(Symbole::indice_alphabet)
            .sum::<Option<u32>>()
            .unwrap_or(u32::MAX)
    }
}

/// f64 d’abord (l’ordre “naturel” de Fraction), puis (n, d) pour départager.
fn comparer_fractions(a: &Fraction, b: &Fraction) -> Ordering {
    a.vers_f64()
        .total_cmp(&b.vers_f64())
        .then_with(|| (a.numerateur(), a.denominateur()).cmp(&(b.numerateur(), b.denominateur())))
}

fn comparer_cles(a: &[(Symbole, i64, i64)], b: &[(Symbole, i64, i64)]) -> Ordering {
    for ((sa, na, da), (sb, nb, db)) in a.iter().zip(b) {
        let o = sa
            .cmp(sb)
            .then_with(|| comparer_fractions(&Fraction::new(*na, *da), &Fraction::new(*nb, *db)));
        if o != Ordering::Equal {
            return o;
        }
    }
    a.len().cmp(&b.len())
}

/* ------------------------ Égalité / ordre ------------------------ */

impl PartialEq for AlgebraTerm {
    fn eq(&self, other: &AlgebraTerm) -> bool {
        self.coefficient == other.coefficient && self.cle() == other.cle()
    }
}

impl PartialOrd for AlgebraTerm {
    fn partial_cmp(&self, other: &AlgebraTerm) -> Option<Ordering> {
        Some(self.comparer(other))
    }
}

/* ------------------------ Opérateurs ------------------------ */

impl Mul for AlgebraTerm {
    type Output = AlgebraTerm;

    /// Union des bases, exposants sommés, coefficients multipliés.
    fn mul(self, rhs: AlgebraTerm) -> AlgebraTerm {
        AlgebraTerm::avec_facteurs(
            self.coefficient * rhs.coefficient,
            self.bases
                .into_iter()
                .zip(self.puissances)
                .chain(rhs.bases.into_iter().zip(rhs.puissances)),
        )
    }
}

impl Mul<Fraction> for AlgebraTerm {
    type Output = AlgebraTerm;

    fn mul(self, rhs: Fraction) -> AlgebraTerm {
        let coefficient = self.coefficient * rhs;
        AlgebraTerm {
            coefficient,
            ..self
        }
    }
}

impl Div for AlgebraTerm {
    type Output = AlgebraTerm;

    fn div(self, rhs: AlgebraTerm) -> AlgebraTerm {
        self * rhs.inverse()
    }
}

impl Neg for AlgebraTerm {
    type Output = AlgebraTerm;

    fn neg(self) -> AlgebraTerm {
        let coefficient = -self.coefficient;
        AlgebraTerm {
            coefficient,
            ..self
        }
    }
}

impl From<Fraction> for AlgebraTerm {
    fn from(coefficient: Fraction) -> AlgebraTerm {
        AlgebraTerm::valeur(coefficient)
    }
}

impl From<Symbole> for AlgebraTerm {
    fn from(base: Symbole) -> AlgebraTerm {
        AlgebraTerm::symbole(base)
    }
}

impl From<i64> for AlgebraTerm {
    fn from(n: i64) -> AlgebraTerm {
        AlgebraTerm::valeur(Fraction::entier(n))
    }
}

/* ------------------------ Affichage ------------------------ */

impl fmt::Display for AlgebraTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_valeur() {
            return write!(f, "{}", self.coefficient);
        }

        let c = self.coefficient;
        let mut morceaux: Vec<String> = Vec::new();

        // bases dans l’ordre de la clef (rendu déterministe)
        for (base, n, d) in self.cle() {
            let p = Fraction::new(n, d);
            if p == Fraction::UN {
                morceaux.push(base.to_string());
            } else if p.est_negatif() || !p.est_entier() {
                morceaux.push(format!("{base}^({p})"));
            } else {
                morceaux.push(format!("{base}^{p}"));
            }
        }
        let produit = morceaux.join("·");

        if c == Fraction::UN {
            write!(f, "{produit}")
        } else if c == -Fraction::UN {
            write!(f, "-{produit}")
        } else if c.est_fini() && !c.est_entier() {
            write!(f, "({c})·{produit}")
        } else {
            write!(f, "{c}·{produit}")
        }
    }
}
