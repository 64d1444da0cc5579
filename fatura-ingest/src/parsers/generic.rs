//! Generic Brazilian card statement.
//!
//! Expected text rows after PDF-to-text:
//!   Restaurantes
//!   01/02 PADARIA DO ZE                       R$ 25,00
//!   03/02 NETFLIX.COM            US           R$ 55,90
//!   Total da Fatura R$ 80,90

use std::sync::LazyLock;

use regex::Regex;

use super::{CountryRule, Grammar, HeaderRule, REFUND_MARKER};

pub static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| Grammar {
    transaction: Regex::new(concat!(
        r"^(?P<date>\d{2}/\d{2})\s+",
        r"(?P<description>.+?)",
        r"(?:\s+(?P<country>[A-Z]{2})\s+)?",
        r"\s*R\$\s*",
        r"(?P<value>-?[\d.,]+)$"
    ))
    .expect("generic transaction pattern"),
    total: Regex::new(r"Total da Fatura\s+R\$\s*([\d.,]+)").expect("generic total pattern"),
    ignore: &[
        "DATA DESCRIÇÃO PAÍS VALOR",
        "SALDO FATURA ANTERIOR",
        "SUBTOTAL",
        "TOTAL DA FATURA",
        // last period's bill paid by direct debit
        "PGTO DEBITO CONTA",
    ],
    refund_marker: REFUND_MARKER,
    header: HeaderRule::NoCurrencyOrSlash,
    country: CountryRule::OptionalIso,
    section: None,
});

/// ISO 3166-1 alpha-2.
const ISO_COUNTRIES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX",
    "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ",
    "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK",
    "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS",
    "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN",
    "IO", "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV",
    "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ",
    "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI",
    "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC",
    "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR",
    "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

pub fn is_iso_country(code: &str) -> bool {
    ISO_COUNTRIES.binary_search(&code).is_ok()
}
