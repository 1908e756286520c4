//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (nombre de termes, exposants)
//! - digits limités pour ΣLocal
//!
//! Notes :
//! - L’ordre < de Fraction passe par f64 : deux rationnels plus proches que
//!   l’epsilon flottant peuvent être mal ordonnés. Limite connue, testée ici.
//! - Le départage alphabétique des monômes n’a de sens que pour a–z ;
//!   au-delà on retombe sur la comparaison des clefs triées.

use std::time::{Duration, Instant};

use super::approximation::{quotients_partiels, vers_fraction, PRECISION_DEFAUT};
use super::fraction::{pgcd, reduire, Fraction};
use super::terme::{AlgebraTerm, Symbole};
use super::{eval_expression, Algebra};

fn eval_ok(expr: &str, digits: usize) -> (String, Option<String>) {
    let (exact, lecture, _d) =
        eval_expression(expr, digits).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    (exact, lecture)
}

fn assert_exact_eq(expr: &str, attendu: &str) {
    let (exact, _lecture) = eval_ok(expr, 50);
    assert_eq!(exact.trim(), attendu.trim(), "expr={expr:?}");
}

fn fr(n: i64, d: i64) -> Fraction {
    Fraction::new(n, d)
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Forme canonique ------------------------ */

#[test]
fn sci_forme_canonique_grille() {
    for n in -30i64..=30 {
        for d in (-12i64..=12).filter(|d| *d != 0) {
            let (a, b) = reduire(n, d);
            assert!(b > 0, "reduire({n},{d}) = ({a},{b})");
            if a != 0 {
                assert_eq!(pgcd(a.abs(), b), 1, "reduire({n},{d}) = ({a},{b})");
            }
            // même réel : n*b == a*d
            assert_eq!(n as i128 * b as i128, a as i128 * d as i128);
            assert_eq!(reduire(a, b), (a, b), "idempotence pour ({n},{d})");
        }
    }
}

#[test]
fn sci_formes_speciales_preservees() {
    assert_eq!(reduire(0, 0), (0, 0));
    assert_eq!(reduire(5, 0), (5, 0));
    assert_eq!(reduire(-3, 0), (-3, 0));
    assert_eq!(reduire(7, 7), (1, 1));

    // n/0 quelconque reste infini, signe conservé
    let f = fr(5, 0);
    assert!(f.est_infini());
    assert!(!f.est_nan());
    assert_eq!(f.signe(), 1);
    assert_eq!(f.to_string(), "inf");
    assert_eq!(fr(-9, 0).to_string(), "-inf");
}

/* ------------------------ Identités arithmétiques ------------------------ */

#[test]
fn sci_identites_sur_grille() {
    for n in -15i64..=15 {
        for d in 1i64..=9 {
            let a = fr(n, d);
            assert_eq!(a + Fraction::ZERO, a);
            assert_eq!(a * Fraction::UN, a);
            assert_eq!(a - a, Fraction::ZERO);
            if !a.est_zero() {
                assert_eq!(a / a, Fraction::UN, "a={a}");
                assert_eq!(a * a.inverse(), Fraction::UN, "a={a}");
            }
        }
    }
}

#[test]
fn sci_table_des_valeurs_speciales() {
    let inf = Fraction::INFINI;
    let minf = Fraction::MOINS_INFINI;
    let nan = Fraction::NAN;

    assert_eq!(inf + inf, inf);
    assert!((inf - inf).est_nan());
    assert_eq!(inf * Fraction::ZERO, Fraction::ZERO);
    assert_eq!(nan, nan);
    assert!((nan + Fraction::UN).est_nan());
    assert!((Fraction::UN * nan).est_nan());

    assert_eq!(Fraction::UN / Fraction::ZERO, inf);
    assert_eq!(-Fraction::UN / Fraction::ZERO, minf);
    assert!((Fraction::ZERO / Fraction::ZERO).est_nan());
    assert_eq!(Fraction::ZERO / inf, Fraction::ZERO);
    assert_eq!(fr(3, 4) / Fraction::UN, fr(3, 4));

    assert_eq!(minf * fr(2, 1), inf, "signe non suivi à travers ×");
}

#[test]
fn sci_ordre_par_flottant_limite_connue() {
    assert!(fr(1, 3) < fr(1, 2));
    assert!(fr(-1, 2) < fr(1, 3));
    assert!(Fraction::MOINS_INFINI < Fraction::ZERO);

    // deux rationnels distincts que f64 ne sépare pas
    let a = fr(1, 3_000_000_000_000_000_000);
    let b = fr(1, 3_000_000_000_000_000_001);
    assert_ne!(a, b);
    assert_eq!(a.partial_cmp(&b), Some(std::cmp::Ordering::Equal));
}

/* ------------------------ Flottants ------------------------ */

#[test]
fn sci_aller_retour_flottant() {
    for k in -50i64..=50 {
        assert_eq!(vers_fraction(k as f64, false, PRECISION_DEFAUT), Fraction::entier(k));
    }
    assert_eq!(vers_fraction(0.5, false, PRECISION_DEFAUT), fr(1, 2));
    assert_eq!(vers_fraction(0.1, false, PRECISION_DEFAUT), fr(1, 10));
    assert_eq!(vers_fraction(-2.75, false, PRECISION_DEFAUT), fr(-11, 4));
}

#[test]
fn sci_fraction_continue_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let valeurs = [
        std::f64::consts::PI,
        std::f64::consts::E,
        std::f64::consts::SQRT_2,
        1.0 / 3.0,
        -7.123_456_789_012_345,
        1e-9,
        123_456.789_012_345_6,
    ];

    for precision in [0usize, 1, 2, 5, 20, 64] {
        for v in valeurs {
            budget(t0, max);
            let q = quotients_partiels(v, precision);
            assert!(q.len() <= precision, "v={v} precision={precision} q={q:?}");
        }
    }

    // π à 20 quotients : meilleur que 1e-9
    let p = Fraction::pi();
    assert!((p.vers_f64() - std::f64::consts::PI).abs() < 1e-9, "pi={p}");
}

/* ------------------------ Algèbre ------------------------ */

#[test]
fn sci_fusion_des_monomes() {
    let t = AlgebraTerm::new(Fraction::entier(3), "x", Fraction::UN)
        * AlgebraTerm::new(Fraction::entier(2), "x", Fraction::entier(2));
    assert_eq!(t.bases().len(), 1);
    assert_eq!(t.to_string(), "6·x^3");
}

#[test]
fn sci_reduction_des_semblables() {
    assert_exact_eq("2*x - x + x^2 + 0", "x + x^2");
    assert_exact_eq("x^2 + 2*x^2 - 3*x^2", "0");
}

#[test]
fn sci_departage_alphabetique() {
    assert_exact_eq("y^2 + 2*x^2", "2·x^2 + y^2");
    assert_exact_eq("c + a + b", "a + b + c");
}

#[test]
fn sci_distribution() {
    assert_exact_eq("(x + 1) * (x - 1)", "-1 + x^2");
    assert_exact_eq("(a + b) * (a - b)", "a^2 - b^2");
}

#[test]
fn sci_zero_algebrique() {
    assert_exact_eq("(1/2 + 1/3) - 5/6", "0");
    assert_exact_eq("(2/3 * 3/4) - 1/2", "0");
    assert_exact_eq("(x + y)^2 - x^2 - 2*x*y - y^2", "0");
    assert_exact_eq("sqrt(x^2)*sqrt(x^2) - x^2", "0");
}

#[test]
fn sci_exposants_rationnels() {
    assert_exact_eq("x^(1/2) * x^(1/2)", "x");
    assert_exact_eq("x^(1/3) * x^(2/3) * 4", "4·x");
    assert_exact_eq("1/x", "x^(-1)");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    // 80*(1/2)=40
    assert_exact_eq(&expr, "40");
}

#[test]
fn sci_stress_puissance_binome_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // (x+1)^20 : 21 termes, coefficients binomiaux exacts en i64
    let (exact, lecture) = eval_ok("(x + 1)^20", 10);
    budget(t0, max);
    assert!(lecture.is_none());
    assert!(exact.starts_with("1 + 20·x + 190·x^2"), "exact={exact}");
    assert!(exact.ends_with("x^20"), "exact={exact}");
    assert_eq!(exact.matches(" + ").count(), 20);
}

#[test]
fn sci_stress_debordement_i64_safe() {
    // 2^62 * 4 déborde i64 : ré-approximation => infini saturé, pas de panique
    let (exact, lecture) = eval_ok("2^62 * 4", 10);
    assert_eq!(exact, "inf");
    assert!(lecture.is_none());

    // produit de grands dénominateurs : valeur conservée à peu près
    let a = fr(1, 3_037_000_499) * fr(1, 3_037_000_501);
    assert!(a.est_fini());
    assert!(a.vers_f64() >= 0.0 && a.vers_f64() < 1e-18);
}

/* ------------------------ ΣLocal : cohérence minimale ------------------------ */

#[test]
fn sci_socal_coherence_basic() {
    // valeur finie => ΣLocal présent, cohérent avec EXACT
    let (exact, lec) = eval_ok("7/8", 5);
    assert_eq!(exact, "7/8");
    assert_eq!(lec.as_deref(), Some("0.87500"));

    // symbole => ΣLocal absent
    let (_exact2, lec2) = eval_ok("x + 7/8", 5);
    assert!(lec2.is_none());

    // valeur spéciale => ΣLocal absent
    let (exact3, lec3) = eval_ok("-1/0", 5);
    assert_eq!(exact3, "-inf");
    assert!(lec3.is_none());
}

#[test]
fn sci_evaluation_coherente_avec_substitution() {
    let a = Algebra::from(AlgebraTerm::symbole("x")) + Algebra::from(Fraction::entier(2));
    let carre = a.puissance(3);
    let mut v = std::collections::BTreeMap::new();
    for k in -5i64..=5 {
        v.insert(Symbole::new("x"), Fraction::entier(k));
        let attendu = Fraction::entier((k + 2).pow(3));
        assert_eq!(carre.evaluer(&v), Some(attendu), "x={k}");
    }
}
