//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée, exposants entiers petits
//! - budget temps global
//! - on accepte les erreurs de domaine (division par un polynôme, exposant refusé, ...)
//! - invariants clés :
//!   - ΣLocal présent <=> EXACT sans symbole ni valeur spéciale
//!   - relire EXACT redonne EXACT (forme réduite stable)

use std::time::{Duration, Instant};

use super::erreur::ErreurNoyau;
use super::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurNoyau) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz,
    // parce que le domaine est volontairement limité.
    matches!(
        e,
        ErreurNoyau::DivisionParPolynome
            | ErreurNoyau::ArgumentNonMonomial(_)
            | ErreurNoyau::ExposantInvalide(_)
            | ErreurNoyau::DeveloppementTropGrand { .. }
    )
}

fn est_special(exact: &str) -> bool {
    exact.contains("inf") || exact.contains("nan")
}

fn check_invariant_socal(exact: &str, lecture: &Option<String>) {
    let sans_lettre = !exact.chars().any(|c| c.is_ascii_alphabetic());
    assert_eq!(
        lecture.is_some(),
        sans_lettre,
        "ΣLocal incohérent pour EXACT={exact:?}"
    );
}

fn check_relecture_stable(expr: &str, exact: &str) {
    if est_special(exact) {
        return;
    }
    match eval_expression(exact, 10) {
        Ok((relu, _l, _d)) => assert_eq!(relu, exact, "relecture instable (expr={expr:?})"),
        Err(e) => panic!("relecture impossible: expr={expr:?} exact={exact:?} err={e}"),
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_rat(rng: &mut Rng) -> String {
    // rationnels simples, incluant 0 (utile pour tester zéros)
    let a = rng.pick(8);
    // dénominateur jamais nul ici ; la division par zéro arrive via / expr
    let b = 1 + rng.pick(6);

    if rng.coin() {
        format!("{a}/{b}")
    } else {
        format!("{a}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => gen_rat(rng),
        2 | 3 => "x".to_string(),
        4 => "y".to_string(),
        _ => format!("-{}", gen_rat(rng)),
    }
}

fn gen_exposant(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "(1/2)".to_string(),
        _ => "(-1)".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 | 2 => format!(
            "({}+{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        3 => format!(
            "({}-{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        4 => format!(
            "({}*{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        5 => format!(
            "({}/{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        6 => format!("({})^{}", gen_expr(rng, depth - 1), gen_exposant(rng)),
        7 => format!("sqrt({})", gen_expr(rng, depth - 1)),
        _ => format!("abs({})", gen_expr(rng, depth - 1)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_socal_et_relecture() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr, 12) {
            Ok((exact, lecture, _d)) => {
                check_invariant_socal(&exact, &lecture);
                check_relecture_stable(&expr, &exact);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    // Même seed => mêmes expressions => mêmes sorties
    let mut r1 = Rng::new(0xBADC0DE_u64);
    let mut r2 = r1.clone();

    for _ in 0..60 {
        budget(t0, max);

        let e1 = gen_expr(&mut r1, 3);
        let e2 = gen_expr(&mut r2, 3);
        assert_eq!(e1, e2);

        let a = eval_expression(&e1, 15).map(|(x, l, _)| (x, l));
        let b = eval_expression(&e2, 15).map(|(x, l, _)| (x, l));
        assert_eq!(a, b, "expr={e1:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("1/2*x", 800);
    budget(t0, max);

    let (exact, lecture, _d) = eval_expression(&expr, 10).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2)·x = 400·x
    assert_eq!(exact.trim(), "400·x");
    assert!(lecture.is_none());
}
