//! Calculatrice algébrique exacte : rationnels i64 canoniques + algèbre de monômes.

pub mod noyau;
