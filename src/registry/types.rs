//! Wire types for the registry protocol and the typed records derived
//! from them
//!
//! The registry answers with overloaded single-letter JSON keys. Decoding
//! happens here, at the system boundary, so the rest of the pipeline only
//! ever sees [`RegistryRow`] and [`NormalizedCompany`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Kind of taxpayer, derived from the identifier length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxIdKind {
    /// 10-digit identifier
    Organization,
    /// 12-digit identifier
    SoleProprietor,
}

/// A validated tax identifier (INN)
///
/// Construction strips every non-digit character from the raw user input
/// first, then requires exactly 10 or 12 digits. Any other digit count is
/// rejected before a network call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxId {
    digits: String,
}

impl TaxId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        match digits.len() {
            10 | 12 => Ok(Self { digits }),
            len => Err(ValidationError::TaxIdLength { digits: len }),
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn kind(&self) -> TaxIdKind {
        if self.digits.len() == 12 {
            TaxIdKind::SoleProprietor
        } else {
            TaxIdKind::Organization
        }
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digits)
    }
}

/// Phase-1 response: presence of the ticket means the query was queued
#[derive(Debug, Clone, Deserialize)]
pub struct TicketResponse {
    #[serde(rename = "t", default)]
    pub ticket: Option<String>,
}

impl TicketResponse {
    /// Ticket, if the registry accepted the query
    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_deref().filter(|t| !t.is_empty())
    }
}

/// Phase-2 response: the result set keyed by the phase-1 ticket
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub rows: Vec<RegistryRow>,
}

/// A single result row, decoded from the registry's short keys
///
/// `n` full legal name, `c` pre-abbreviated name, `k` KPP, `a` address,
/// `o` OGRN, `i` INN, `r` regional/branch code. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryRow {
    #[serde(rename = "n", default)]
    pub full_name: String,

    #[serde(rename = "c", default)]
    pub short_name: Option<String>,

    #[serde(rename = "k", default)]
    pub kpp: Option<String>,

    #[serde(rename = "a", default)]
    pub address: Option<String>,

    #[serde(rename = "o", default)]
    pub ogrn: Option<String>,

    #[serde(rename = "i", default)]
    pub inn: Option<String>,

    #[serde(rename = "r", default)]
    pub region: Option<String>,
}

/// Company data in the canonical shape the storefront consumes
///
/// Derived deterministically from the first registry row; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCompany {
    pub name: String,
    pub inn: String,
    pub kpp: Option<String>,
    pub address: Option<String>,
    pub ogrn: Option<String>,
}
