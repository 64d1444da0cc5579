//! Banco do Brasil (SISBB) credit card statement.
//!
//! Only the DEMONSTRATIVO block is read. Expected rows after PDF-to-text:
//!   DEMONSTRATIVO
//!   Data     Transações                              País   Valor R$   Valor US$
//!   RESTAURANTES
//!   01.02.2024PADARIA CENTRAL                        BR     25,00      0,00
//!   03.02.2024AMAZON WEB SERVICES                    US     100,00     18,52
//!   Total        2                                          125,00     18,52
//!   RESUMO EM REAL

use std::sync::LazyLock;

use regex::Regex;

use super::{CountryRule, Grammar, HeaderRule, REFUND_MARKER, Section};

/// Both must be present for the text to be read as a BB card statement.
pub const FINGERPRINTS: [&str; 2] = [
    "SISBB - Sistema de Informações Banco do Brasil",
    "Fatura do Cartão de Crédito",
];

pub static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| Grammar {
    // Trailing numeric is the US$ column; matched, not kept.
    transaction: Regex::new(concat!(
        r"^(?P<date>\d{2}\.\d{2}\.\d{4})",
        r"(?P<description>.+?)",
        r"\s*(?P<country>[A-Z]{2})",
        r"\s+(?P<value>-?[\d.,]+)",
        r"\s+[\d.,]+$"
    ))
    .expect("bb transaction pattern"),
    // "Total <count> <R$> <US$>"
    total: Regex::new(r"^\s*Total\s+[\d\s]+\s+([\d.,]+)\s+[\d.,]+$").expect("bb total pattern"),
    ignore: &[
        "DATA     TRANSAÇÕES",
        "SALDO FATURA ANTERIOR",
        "SUBTOTAL",
        "TOTAL",
        "----",
    ],
    refund_marker: REFUND_MARKER,
    header: HeaderRule::NoDigits,
    country: CountryRule::Required,
    section: Some(Section {
        start: "DEMONSTRATIVO",
        end: "RESUMO EM REAL",
    }),
});

pub fn matches_fingerprint(text: &str) -> bool {
    FINGERPRINTS.iter().all(|fp| text.contains(fp))
}
