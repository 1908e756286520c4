// src/noyau/fraction.rs
//
// Rationnel exact sur i64, toujours en forme canonique.
// - dénominateur >= 0, pgcd(|n|, d) == 1 (hors formes spéciales)
// - formes spéciales : 0/1 (zéro), 1/0 (+inf), -1/0 (-inf), 0/0 (nan)
// - tout autre n/0 reste infini (signe pris sur n)
// - égalité STRUCTURELLE (n, d) ; l’ordre passe par f64 (limite de précision connue)
//
// Calcul interne en i128 puis retour en i64 : si le résultat ne rentre pas,
// on ré-approxime par fractions continues au lieu de déborder.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use log::warn;
use num_traits::{One, Zero};

use super::approximation::{vers_fraction, PRECISION_DEFAUT};
use super::erreur::ErreurNoyau;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerateur: i64,
    denominateur: i64,
}

/* ------------------------ pgcd / ppcm / réduction ------------------------ */

/// Plus grand commun diviseur (Euclide), toujours >= 0.
///
/// Seul `pgcd(i64::MIN, 0)` (ou `0, i64::MIN`) vaut 2^63, hors de i64 :
/// le résultat sature alors à `i64::MAX`.
pub fn pgcd(a: i64, b: i64) -> i64 {
    i64::try_from(pgcd_large(a as i128, b as i128)).unwrap_or(i64::MAX)
}

/// Plus petit commun multiple : `a == b ? a : a*b/pgcd(a,b)`.
pub fn ppcm(a: i64, b: i64) -> i64 {
    let m = ppcm_large(a as i128, b as i128);
    i64::try_from(m).unwrap_or(if m < 0 { i64::MIN } else { i64::MAX })
}

/// Réduction canonique d’un couple (n, d).
///
/// - n == d (non nul) => (1, 1)
/// - d == 0 => (n, 0) inchangé : le signe de l’infini (ou nan) survit
/// - sinon division par le pgcd, signé pour rendre d positif
pub fn reduire(numerateur: i64, denominateur: i64) -> (i64, i64) {
    let f = Fraction::depuis_large(numerateur as i128, denominateur as i128);
    (f.numerateur, f.denominateur)
}

/// Met deux fractions au même dénominateur.
/// Retourne (numérateur gauche, numérateur droit, dénominateur commun), en i128.
/// Si l’une est spéciale (d == 0), le dénominateur commun est 0 et les
/// numérateurs passent tels quels.
pub fn denominateur_commun(gauche: &Fraction, droite: &Fraction) -> (i128, i128, i128) {
    let (gn, gd) = (gauche.numerateur as i128, gauche.denominateur as i128);
    let (dn, dd) = (droite.numerateur as i128, droite.denominateur as i128);

    if gd == dd {
        return (gn, dn, gd);
    }
    if gd == 0 || dd == 0 {
        return (gn, dn, 0);
    }

    let commun = ppcm_large(gd, dd);
    (gn * (commun / gd), dn * (commun / dd), commun)
}

fn pgcd_large(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn ppcm_large(a: i128, b: i128) -> i128 {
    if a == b {
        return a;
    }
    let g = pgcd_large(a, b);
    if g == 0 {
        return 0;
    }
    a / g * b
}

fn reduire_large(numerateur: i128, denominateur: i128) -> (i128, i128) {
    if numerateur == denominateur && numerateur != 0 {
        return (1, 1);
    }
    if denominateur == 0 {
        return (numerateur, 0);
    }

    // d != 0 => diviseur >= 1
    let mut diviseur = pgcd_large(numerateur, denominateur);
    if denominateur < 0 {
        diviseur = -diviseur;
    }
    (numerateur / diviseur, denominateur / diviseur)
}

/* ------------------------ Construction ------------------------ */

impl Fraction {
    pub const ZERO: Fraction = Fraction::brute(0, 1);
    pub const UN: Fraction = Fraction::brute(1, 1);
    pub const INFINI: Fraction = Fraction::brute(1, 0);
    pub const MOINS_INFINI: Fraction = Fraction::brute(-1, 0);
    pub const NAN: Fraction = Fraction::brute(0, 0);

    const fn brute(numerateur: i64, denominateur: i64) -> Fraction {
        Fraction {
            numerateur,
            denominateur,
        }
    }

    /// n/d réduit (d == 0 autorisé : infini ou nan).
    pub fn new(numerateur: i64, denominateur: i64) -> Fraction {
        Fraction::depuis_large(numerateur as i128, denominateur as i128)
    }

    /// Entier n/1.
    pub const fn entier(n: i64) -> Fraction {
        Fraction::brute(n, 1)
    }

    /// Lecture depuis un couple élargi ; hors i64 => ré-approximation.
    fn depuis_large(numerateur: i128, denominateur: i128) -> Fraction {
        let (n, d) = reduire_large(numerateur, denominateur);

        if let (Ok(n), Ok(d)) = (i64::try_from(n), i64::try_from(d)) {
            return Fraction::brute(n, d);
        }

        warn!("débordement i64 ({n}/{d}) : ré-approximation par fractions continues");
        if d == 0 {
            return Fraction::infini_signe(n > 0);
        }
        vers_fraction(n as f64 / d as f64, true, PRECISION_DEFAUT)
    }

    fn infini_signe(positif: bool) -> Fraction {
        if positif {
            Fraction::INFINI
        } else {
            Fraction::MOINS_INFINI
        }
    }

    /// π approché (fraction continue bornée), valeur neuve à chaque appel.
    pub fn pi() -> Fraction {
        vers_fraction(std::f64::consts::PI, true, PRECISION_DEFAUT)
    }

    /// e approché (fraction continue bornée).
    pub fn e() -> Fraction {
        vers_fraction(std::f64::consts::E, true, PRECISION_DEFAUT)
    }

    /// Lecture texte : "n", "n/d", "n.ddd", "nan", "inf", "-inf".
    /// Entrée mal formée => None (à l’appelant de signaler l’erreur).
    pub fn parse(texte: &str) -> Option<Fraction> {
        let s = texte.trim();

        match s {
            "nan" => return Some(Fraction::NAN),
            "inf" | "+inf" => return Some(Fraction::INFINI),
            "-inf" => return Some(Fraction::MOINS_INFINI),
            _ => {}
        }

        if let Some((gauche, droite)) = s.split_once('/') {
            let n = gauche.trim().parse::<i64>().ok()?;
            let d = droite.trim().parse::<i64>().ok()?;
            return Some(Fraction::new(n, d));
        }

        if let Some((entier, decimales)) = s.split_once('.') {
            if decimales.is_empty() || !decimales.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let negatif = entier.starts_with('-');
            let partie_entiere = match entier {
                "" | "-" | "+" => 0,
                e => e.parse::<i64>().ok()?,
            };
            let Some(echelle) = u32::try_from(decimales.len())
                .ok()
                .and_then(|e| 10i64.checked_pow(e))
            else {
                // plus de 18 décimales : lecture flottante puis fraction continue
                return s
                    .parse::<f64>()
                    .ok()
                    .map(|v| vers_fraction(v, true, PRECISION_DEFAUT));
            };
            let partie_decimale = Fraction::new(decimales.parse::<i64>().ok()?, echelle);

            let base = Fraction::entier(partie_entiere);
            return Some(if negatif {
                base - partie_decimale
            } else {
                base + partie_decimale
            });
        }

        s.parse::<i64>().ok().map(Fraction::entier)
    }

    /* ------------------------ Accès / prédicats ------------------------ */

    pub fn numerateur(&self) -> i64 {
        self.numerateur
    }

    pub fn denominateur(&self) -> i64 {
        self.denominateur
    }

    pub fn est_nan(&self) -> bool {
        self.numerateur == 0 && self.denominateur == 0
    }

    /// Infini (signe quelconque). Exclut nan.
    pub fn est_infini(&self) -> bool {
        self.denominateur == 0 && self.numerateur != 0
    }

    pub fn est_fini(&self) -> bool {
        self.denominateur != 0
    }

    pub fn est_zero(&self) -> bool {
        self.numerateur == 0 && self.denominateur != 0
    }

    pub fn est_entier(&self) -> bool {
        self.denominateur == 1
    }

    pub fn est_negatif(&self) -> bool {
        self.numerateur < 0
    }

    /// -1, 0 ou 1 (0 pour zéro et nan).
    pub fn signe(&self) -> i64 {
        self.numerateur.signum()
    }

    /// Approximation binaire (nan/±inf suivent IEEE-754).
    pub fn vers_f64(&self) -> f64 {
        self.numerateur as f64 / self.denominateur as f64
    }

    /* ------------------------ Opérations ------------------------ */

    /// Valeur absolue.
    pub fn abs(self) -> Fraction {
        if self.est_negatif() {
            -self
        } else {
            self
        }
    }

    /// Inverse : échange n/d puis re-canonise (0 => +inf, ±inf => 0, nan => nan).
    pub fn inverse(self) -> Fraction {
        Fraction::new(self.denominateur, self.numerateur)
    }

    /// Racine carrée APPROCHÉE : √n et √d séparément, chacune repassée en rationnel.
    pub fn racine_carree(self) -> Fraction {
        if self.est_nan() || self.est_negatif() {
            return Fraction::NAN;
        }
        if self.est_infini() {
            return Fraction::INFINI;
        }

        let n = vers_fraction((self.numerateur as f64).sqrt(), false, PRECISION_DEFAUT);
        let d = vers_fraction((self.denominateur as f64).sqrt(), false, PRECISION_DEFAUT);
        n / d
    }

    /// Puissance rationnelle.
    /// Exposant entier : exact (carré-multiplie). Sinon : via f64, puis ré-approximation.
    pub fn puissance(self, exposant: Fraction) -> Fraction {
        if self.est_nan() || exposant.est_nan() {
            return Fraction::NAN;
        }
        if exposant.est_zero() {
            return Fraction::UN;
        }

        if exposant.est_entier() {
            let mut e = exposant.numerateur.unsigned_abs();
            let mut base = self;
            let mut acc = Fraction::UN;

            while e > 0 {
                if (e & 1) == 1 {
                    acc *= base;
                }
                e >>= 1;
                if e > 0 {
                    base *= base;
                }
            }

            return if exposant.est_negatif() {
                acc.inverse()
            } else {
                acc
            };
        }

        let v = self.vers_f64().powf(exposant.vers_f64());
        vers_fraction(v, false, PRECISION_DEFAUT)
    }
}

/* ------------------------ Opérateurs ------------------------ */

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.est_nan() || rhs.est_nan() {
            return Fraction::NAN;
        }

        match (self.est_infini(), rhs.est_infini()) {
            (true, true) => {
                if self.signe() == rhs.signe() {
                    Fraction::infini_signe(self.signe() > 0)
                } else {
                    Fraction::NAN
                }
            }
            (true, false) => Fraction::infini_signe(self.signe() > 0),
            (false, true) => Fraction::infini_signe(rhs.signe() > 0),
            (false, false) => {
                let (a, b, d) = denominateur_commun(&self, &rhs);
                Fraction::depuis_large(a + b, d)
            }
        }
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        if self.est_nan() || rhs.est_nan() {
            return Fraction::NAN;
        }

        match (self.est_infini(), rhs.est_infini()) {
            (true, true) => Fraction::NAN,
            (true, false) => Fraction::infini_signe(self.signe() > 0),
            // fini - inf => infini de signe opposé
            (false, true) => Fraction::infini_signe(rhs.signe() < 0),
            (false, false) => {
                let (a, b, d) = denominateur_commun(&self, &rhs);
                Fraction::depuis_large(a - b, d)
            }
        }
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        if self.est_nan() || rhs.est_nan() {
            return Fraction::NAN;
        }
        // 0 * x = 0, même si x est infini (court-circuit AVANT le test d’infini)
        if self.est_zero() || rhs.est_zero() {
            return Fraction::ZERO;
        }
        // signe non suivi à travers l’infini
        if self.est_infini() || rhs.est_infini() {
            return Fraction::INFINI;
        }

        Fraction::depuis_large(
            self.numerateur as i128 * rhs.numerateur as i128,
            self.denominateur as i128 * rhs.denominateur as i128,
        )
    }
}

impl Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        if self.est_nan() || rhs.est_nan() {
            return Fraction::NAN;
        }
        if rhs.est_zero() {
            return if self.est_zero() {
                Fraction::NAN
            } else {
                Fraction::infini_signe(self.signe() > 0)
            };
        }
        if self.est_zero() {
            return Fraction::ZERO;
        }
        if rhs == Fraction::UN {
            return self;
        }

        match (self.est_infini(), rhs.est_infini()) {
            (true, true) => Fraction::NAN,
            (false, true) => Fraction::ZERO,
            (true, false) => Fraction::infini_signe(self.signe() * rhs.signe() > 0),
            (false, false) => Fraction::depuis_large(
                self.numerateur as i128 * rhs.denominateur as i128,
                self.denominateur as i128 * rhs.numerateur as i128,
            ),
        }
    }
}

impl Rem for Fraction {
    type Output = Fraction;

    /// Reste (signe du dividende), via dénominateur commun.
    fn rem(self, rhs: Fraction) -> Fraction {
        if !self.est_fini() || !rhs.est_fini() || rhs.est_zero() {
            return Fraction::NAN;
        }
        let (a, b, d) = denominateur_commun(&self, &rhs);
        Fraction::depuis_large(a % b, d)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction::depuis_large(-(self.numerateur as i128), self.denominateur as i128)
    }
}

impl AddAssign for Fraction {
    fn add_assign(&mut self, rhs: Fraction) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fraction {
    fn sub_assign(&mut self, rhs: Fraction) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fraction {
    fn mul_assign(&mut self, rhs: Fraction) {
        *self = *self * rhs;
    }
}

impl DivAssign for Fraction {
    fn div_assign(&mut self, rhs: Fraction) {
        *self = *self / rhs;
    }
}

impl RemAssign for Fraction {
    fn rem_assign(&mut self, rhs: Fraction) {
        *self = *self % rhs;
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::ZERO, |acc, x| acc + x)
    }
}

impl Product for Fraction {
    fn product<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::UN, |acc, x| acc * x)
    }
}

/* ------------------------ Ordre ------------------------ */

/// `==` est exact (structurel). `<`/`<=` comparent des f64 : deux rationnels
/// dont l’écart est sous l’epsilon binaire peuvent être mal ordonnés.
impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        self.vers_f64().partial_cmp(&other.vers_f64())
    }
}

/* ------------------------ num-traits ------------------------ */

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction::ZERO
    }

    fn is_zero(&self) -> bool {
        self.est_zero()
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction::UN
    }
}

/* ------------------------ Conversions ------------------------ */

macro_rules! depuis_entier_signe {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(n: $t) -> Fraction {
                    Fraction::entier(i64::from(n))
                }
            }
        )*
    };
}

depuis_entier_signe!(i8, i16, i32, i64);

impl From<f64> for Fraction {
    fn from(v: f64) -> Fraction {
        vers_fraction(v, false, PRECISION_DEFAUT)
    }
}

impl From<f32> for Fraction {
    fn from(v: f32) -> Fraction {
        vers_fraction(f64::from(v), false, PRECISION_DEFAUT)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> f64 {
        f.vers_f64()
    }
}

impl FromStr for Fraction {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Result<Fraction, ErreurNoyau> {
        Fraction::parse(s).ok_or_else(|| ErreurNoyau::NombreInvalide(s.trim().to_string()))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_nan() {
            return write!(f, "nan");
        }
        if self.est_infini() {
            return write!(f, "{}", if self.numerateur > 0 { "inf" } else { "-inf" });
        }

        let (n, d) = (self.numerateur, self.denominateur);
        if d == 1 {
            write!(f, "{n}")
        } else {
            write!(f, "{n}/{d}")
        }
    }
}
