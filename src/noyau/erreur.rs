// src/noyau/erreur.rs
//
// Erreurs du pipeline texte (jetons -> RPN -> Algebra).
// Les cas numériques (division par zéro, débordement) ne sont PAS des erreurs :
// ils deviennent nan / ±inf dans Fraction.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    #[error("parenthèse inattendue")]
    ParentheseInattendue,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("fonction sans argument: {0}")]
    FonctionSansArgument(String),

    #[error("{0} : argument non monomial")]
    ArgumentNonMonomial(String),

    #[error("division par un polynôme non supportée")]
    DivisionParPolynome,

    #[error("exposant non supporté: {0}")]
    ExposantInvalide(String),

    #[error("développement trop grand: ({termes} termes)^{exposant}")]
    DeveloppementTropGrand { termes: usize, exposant: u32 },
}
