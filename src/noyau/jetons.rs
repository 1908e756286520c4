// src/noyau/jetons.rs

use super::erreur::ErreurNoyau;
use super::fraction::Fraction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Fraction),

    // Fonctions + symboles (tout ce qui n’est pas opérateur / nombre)
    // NOTE: le parse (RPN) décidera si c’est une fonction (sqrt/abs) ou un symbole.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire : jamais produit par tokenize, seulement par to_rpn
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12), décimaux (ex: 0.25)
/// - fractions littérales sans espaces (ex: 12/34) -> Num(6/17), sauf en exposant
/// - opérateurs + - * · / ^
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée : x et X sont distincts)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' | '·' | '×' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre : entier, décimal, ou fraction littérale a/b (sans espaces)
        if c.is_ascii_digit() {
            let start = i;
            avance_chiffres(&chars, &mut i);

            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                avance_chiffres(&chars, &mut i);
            } else if i + 1 < chars.len()
                && chars[i] == '/'
                && chars[i + 1].is_ascii_digit()
                && !apres_exposant(&out)
            {
                // si pas un chiffre après '/', c’est une division normale
                // après '^' aussi : x^2/4 = (x^2)/4
                i += 1;
                avance_chiffres(&chars, &mut i);
            }

            let texte: String = chars[start..i].iter().collect();
            let f = Fraction::parse(&texte).ok_or(ErreurNoyau::NombreInvalide(texte))?;
            out.push(Tok::Num(f));
            continue;
        }

        return Err(ErreurNoyau::CaractereInattendu(c));
    }

    Ok(out)
}

/// Vrai si le nombre en cours est un exposant (`^2`, `^-2`).
fn apres_exposant(out: &[Tok]) -> bool {
    matches!(out, [.., Tok::Caret] | [.., Tok::Caret, Tok::Minus])
}

fn avance_chiffres(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(f) => f.to_string(),
            Tok::Ident(name) => name.clone(),
            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
