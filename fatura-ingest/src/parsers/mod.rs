//! Per-dialect grammars.
//!
//! Each dialect is a [`Grammar`] value: its transaction and total patterns,
//! ignore phrases, header rule and section bounds. The classifier only ever
//! talks to a `Grammar`; supporting a new layout means adding a module here
//! and a [`Dialect`] variant.

pub mod bb_credit;
pub mod generic;

use std::sync::LazyLock;

use fatura_core::{CoreError, money};
use regex::{Captures, Regex};

use crate::normalize::raw_lines;
use crate::types::{DEFAULT_COUNTRY, Dialect, Transaction};

/// "Starts and ends with a letter, letters/spaces in between."
static HEADER_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-zÀ-ÿ][A-Za-zÀ-ÿ\s]*[A-Za-zÀ-ÿ]$").expect("header shape pattern")
});

/// Section marking payments and credits; everything after it is a refund.
pub const REFUND_MARKER: &str = "PAGAMENTOS/CRÉDITOS";

/// Slice of the document a dialect cares about.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    /// Line containing this opens the section (the line itself is dropped).
    pub start: &'static str,
    /// Line containing this ends extraction.
    pub end: &'static str,
}

/// Extra conditions a header-shaped line must meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    /// No `R$` and no `/`.
    NoCurrencyOrSlash,
    /// No digit anywhere.
    NoDigits,
}

impl HeaderRule {
    pub fn accepts(self, line: &str) -> bool {
        if !HEADER_SHAPE_RE.is_match(line) {
            return false;
        }
        match self {
            HeaderRule::NoCurrencyOrSlash => !line.contains("R$") && !line.contains('/'),
            HeaderRule::NoDigits => !line.chars().any(char::is_numeric),
        }
    }
}

/// How the `country` capture is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryRule {
    /// Optional; a two-letter token only counts if it is an ISO 3166 code,
    /// otherwise it belongs to the description.
    OptionalIso,
    /// Always present in the grammar; taken as printed.
    Required,
}

/// Grammar of one statement dialect.
#[derive(Debug)]
pub struct Grammar {
    /// Named groups: `date`, `description`, `country` (maybe), `value`.
    pub transaction: Regex,
    /// Group 1 is the declared total.
    pub total: Regex,
    /// Upper-case phrases; a line containing any is skipped outright.
    pub ignore: &'static [&'static str],
    pub refund_marker: &'static str,
    pub header: HeaderRule,
    pub country: CountryRule,
    pub section: Option<Section>,
}

impl Grammar {
    /// Raw lines the classifier should see.
    pub fn scope<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let Some(section) = self.section else {
            return raw_lines(text).collect();
        };

        let mut out = Vec::new();
        let mut in_section = false;
        for line in raw_lines(text) {
            if line.contains(section.start) {
                in_section = true;
                continue;
            }
            if line.contains(section.end) {
                break;
            }
            if in_section {
                out.push(line);
            }
        }
        out
    }

    /// `upper` must be the upper-cased line.
    pub fn is_ignored(&self, upper: &str) -> bool {
        self.ignore.iter().any(|phrase| upper.contains(phrase))
    }

    pub fn is_refund_marker(&self, upper: &str) -> bool {
        upper.contains(self.refund_marker)
    }

    /// `None` when the line is not a transaction row; `Some(Err)` when it is
    /// one but the amount does not decode.
    pub fn match_transaction(
        &self,
        line: &str,
        category: &str,
    ) -> Option<Result<Transaction, CoreError>> {
        let caps = self.transaction.captures(line)?;
        Some(self.build_transaction(line, &caps, category))
    }

    fn build_transaction(
        &self,
        line: &str,
        caps: &Captures<'_>,
        category: &str,
    ) -> Result<Transaction, CoreError> {
        let amount = money::decode(&caps["value"])?;
        let description = &caps["description"];

        let (description, country) = match (self.country, caps.name("country")) {
            (_, None) => (description, DEFAULT_COUNTRY),
            (CountryRule::Required, Some(cc)) => (description, cc.as_str()),
            (CountryRule::OptionalIso, Some(cc)) if generic::is_iso_country(cc.as_str()) => {
                (description, cc.as_str())
            }
            // "PADARIA DO ZE": ZE is part of the name, not a country
            (CountryRule::OptionalIso, Some(cc)) => {
                let start = caps.name("description").map_or(cc.start(), |m| m.start());
                (&line[start..cc.end()], DEFAULT_COUNTRY)
            }
        };

        Ok(Transaction {
            date: caps["date"].to_string(),
            description: description.trim().to_string(),
            category: category.to_string(),
            country: country.to_string(),
            amount,
        })
    }
}

impl Dialect {
    pub fn grammar(self) -> &'static Grammar {
        match self {
            Dialect::Generic => &*generic::GRAMMAR,
            Dialect::BancoDoBrasil => &*bb_credit::GRAMMAR,
        }
    }
}

/// Pick the dialect by fingerprint; falls back to [`Dialect::Generic`].
pub fn sniff(text: &str) -> Dialect {
    if bb_credit::matches_fingerprint(text) {
        Dialect::BancoDoBrasil
    } else {
        Dialect::Generic
    }
}
