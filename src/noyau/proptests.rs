//! Property-based tests : forme canonique, identités, réduction, fraction continue.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::noyau::approximation::{quotients_partiels, vers_fraction, PRECISION_DEFAUT};
    use crate::noyau::{eval_expression, pgcd, reduire, Algebra, AlgebraTerm, Fraction};

    // Entiers petits (pas de débordement dans les identités)
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn fraction() -> impl Strategy<Value = Fraction> {
        (small_int(), 1i64..=60).prop_map(|(n, d)| Fraction::new(n, d))
    }

    fn fraction_non_nulle() -> impl Strategy<Value = Fraction> {
        (non_zero_int(), 1i64..=60).prop_map(|(n, d)| Fraction::new(n, d))
    }

    // Monôme : coefficient simple, au plus deux bases parmi x, y, z
    fn monome() -> impl Strategy<Value = AlgebraTerm> {
        (
            -9i64..=9,
            1i64..=4,
            prop::collection::vec((0usize..3, -2i64..=3), 0..=2),
        )
            .prop_map(|(n, d, facteurs)| {
                AlgebraTerm::avec_facteurs(
                    Fraction::new(n, d),
                    facteurs
                        .into_iter()
                        .map(|(b, p)| (["x", "y", "z"][b].into(), Fraction::entier(p))),
                )
            })
    }

    fn algebre() -> impl Strategy<Value = Algebra> {
        prop::collection::vec(monome(), 0..5).prop_map(|t| Algebra::new(t).reduite())
    }

    proptest! {
        // Forme canonique

        #[test]
        fn reduire_canonique(n in any::<i32>(), d in non_zero_int()) {
            let n = i64::from(n);
            let (a, b) = reduire(n, d);
            prop_assert!(b > 0);
            if a != 0 {
                prop_assert_eq!(pgcd(a.abs(), b), 1);
            }
            prop_assert_eq!(i128::from(n) * i128::from(b), i128::from(a) * i128::from(d));
        }

        #[test]
        fn reduire_idempotent(n in small_int(), d in non_zero_int()) {
            let r = reduire(n, d);
            prop_assert_eq!(reduire(r.0, r.1), r);
        }

        // Identités arithmétiques

        #[test]
        fn neutres(a in fraction()) {
            prop_assert_eq!(a + Fraction::ZERO, a);
            prop_assert_eq!(a * Fraction::UN, a);
            prop_assert_eq!(a - a, Fraction::ZERO);
        }

        #[test]
        fn inverses(a in fraction_non_nulle()) {
            prop_assert_eq!(a / a, Fraction::UN);
            prop_assert_eq!(a * a.inverse(), Fraction::UN);
        }

        #[test]
        fn addition_commutative(a in fraction(), b in fraction()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn distributivite(a in fraction(), b in fraction(), c in fraction()) {
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn reste_borne(a in fraction(), b in fraction_non_nulle()) {
            let r = a % b;
            prop_assert!(r.abs() < b.abs());
        }

        // Flottants

        #[test]
        fn entier_flottant_exact(k in -1_000_000i64..1_000_000) {
            prop_assert_eq!(vers_fraction(k as f64, false, PRECISION_DEFAUT), Fraction::entier(k));
        }

        #[test]
        fn fraction_continue_bornee(v in -1.0e6f64..1.0e6, precision in 0usize..40) {
            prop_assert!(quotients_partiels(v, precision).len() <= precision);
        }

        #[test]
        fn fraction_continue_proche(v in -1.0e3f64..1.0e3) {
            // arrêt sur la garde (quotient > 10000) : écart < 1/10000
            let f = vers_fraction(v, true, PRECISION_DEFAUT);
            prop_assert!((f.vers_f64() - v).abs() < 1e-4, "v={} f={}", v, f);
        }

        // Algèbre

        #[test]
        fn reduction_idempotente(termes in prop::collection::vec(monome(), 0..6)) {
            let r = Algebra::new(termes).reduite();
            prop_assert_eq!(r.reduite(), r.clone());
            for (i, t) in r.termes().iter().enumerate() {
                prop_assert!(!t.coefficient().est_zero());
                for u in &r.termes()[i + 1..] {
                    prop_assert!(!t.sont_semblables(u));
                    prop_assert!(t.comparer(u) == std::cmp::Ordering::Less);
                }
            }
        }

        #[test]
        fn somme_commutative(a in algebre(), b in algebre()) {
            prop_assert_eq!(a.clone() + b.clone(), b + a);
        }

        #[test]
        fn soustraction_inverse(a in algebre(), b in algebre()) {
            prop_assert_eq!((a.clone() + b.clone()) - b, a);
        }

        #[test]
        fn produit_distributif(a in algebre(), b in algebre(), c in algebre()) {
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn affichage_relu(a in algebre()) {
            let texte = a.to_string();
            let relu = eval_expression(&texte, 5).map(|(exact, _l, _d)| exact);
            prop_assert_eq!(relu, Ok(texte));
        }
    }
}
