// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Algebra
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile d’Algebra (chaque opération réduit)
//
// Règles:
// - Ident(name):
//    - si name ∈ {sqrt, abs} => fonction unaire (postfixée en RPN)
//    - sinon => symbole (monôme 1·name^1)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//    - plus fort que * /, plus faible que ^ : -x^2 = -(x^2), 2*-3 = -6, 2^-1 = 1/2
// - Division : seulement par un monôme (pas de division polynomiale)
// - Puissance : exposant rationnel sur un monôme, entier >= 0 sur une somme

use super::algebre::Algebra;
use super::erreur::ErreurNoyau;
use super::fraction::Fraction;
use super::jetons::Tok;
use super::terme::Symbole;

/// Garde-fou : exposant entier max pour développer une somme.
const EXPOSANT_MAX: i64 = 64;

/// Garde-fou : nombre de monômes max prévu pour un développement.
const TERMES_MAX: u128 = 10_000;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions (unaire), insensible à la casse.
fn is_fonction_ident(name: &str) -> bool {
    matches!(name.to_ascii_lowercase().as_str(), "sqrt" | "abs")
}

fn est_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if is_fonction_ident(name))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), LPar, Ident("x"), Caret, Num(2), RPar]
///   rpn:    [Ident("x"), Num(2), Caret, Ident("sqrt")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(ref name) => {
                if is_fonction_ident(name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(tok);
                    prev_was_value = false;
                } else {
                    out.push(tok);
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurNoyau::ParentheseInattendue);
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(est_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            // préfixe : ne dépile rien
            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }

            Tok::Neg => ops.push(tok),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || est_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurNoyau::ParenthesesNonFermees);
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN en Algebra réduite.
pub fn from_rpn(rpn: &[Tok]) -> Result<Algebra, ErreurNoyau> {
    let mut st: Vec<Algebra> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(f) => st.push(Algebra::from(f)),

            Tok::Neg => {
                let a = st.pop().ok_or(ErreurNoyau::ExpressionInvalide)?;
                st.push(-a);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(ErreurNoyau::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurNoyau::ExpressionInvalide)?;

                let e = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => {
                        let diviseur = b.monome().ok_or(ErreurNoyau::DivisionParPolynome)?;
                        a / diviseur
                    }
                    _ => puissance(a, &b)?,
                };

                st.push(e);
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    let x = st
                        .pop()
                        .ok_or_else(|| ErreurNoyau::FonctionSansArgument(name.clone()))?;
                    let m = x
                        .monome()
                        .ok_or_else(|| ErreurNoyau::ArgumentNonMonomial(name.clone()))?;
                    let e = if name.eq_ignore_ascii_case("sqrt") {
                        m.puissance(Fraction::new(1, 2))
                    } else {
                        m.abs()
                    };
                    st.push(Algebra::from(e).reduite());
                } else {
                    st.push(Algebra::from(Symbole::new(name)));
                }
            }

            Tok::LPar | Tok::RPar => return Err(ErreurNoyau::ParentheseInattendue),
        }
    }

    if st.len() != 1 {
        return Err(ErreurNoyau::ExpressionInvalide);
    }
    st.pop().ok_or(ErreurNoyau::ExpressionInvalide)
}

/// a^b : b doit être une valeur.
/// - a monôme => exposant rationnel quelconque
/// - a somme  => exposant entier dans [0, EXPOSANT_MAX]
fn puissance(a: Algebra, b: &Algebra) -> Result<Algebra, ErreurNoyau> {
    let exposant = b
        .valeur()
        .ok_or_else(|| ErreurNoyau::ExposantInvalide(b.to_string()))?;

    if let Some(m) = a.monome() {
        return Ok(Algebra::from(m.puissance(exposant)).reduite());
    }

    if exposant.est_entier() && (0..=EXPOSANT_MAX).contains(&exposant.numerateur()) {
        let n = u32::try_from(exposant.numerateur())
            .map_err(|_| ErreurNoyau::ExposantInvalide(exposant.to_string()))?;
        let termes = a.termes().len();
        if termes_developpes(termes, n) > TERMES_MAX {
            return Err(ErreurNoyau::DeveloppementTropGrand { termes, exposant: n });
        }
        return Ok(a.puissance(n));
    }

    Err(ErreurNoyau::ExposantInvalide(exposant.to_string()))
}

/// Borne du nombre de monômes de (t_1 + ... + t_k)^n : C(n + k - 1, k - 1).
/// Sature dès que TERMES_MAX est dépassé.
fn termes_developpes(k: usize, n: u32) -> u128 {
    let mut r: u128 = 1;
    for i in 1..k as u128 {
        r = match r.checked_mul(u128::from(n) + i) {
            Some(p) => p / i,
            None => return u128::MAX,
        };
        if r > TERMES_MAX {
            return r;
        }
    }
    r
}
