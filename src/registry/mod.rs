//! External business-registry lookup
//!
//! Resolves a taxpayer identifier (INN) to a normalized legal-entity name
//! via the registry's asynchronous two-phase protocol: query submission
//! yields an opaque ticket, and the result set is fetched by ticket after
//! a fixed processing delay.

mod client;
mod normalize;
mod types;

pub use client::{
    HttpRegistryTransport, RegistryClient, RegistryTransport, Resolution, RESULT_POLL_DELAY_MS,
};
pub use normalize::{display_name, normalize_row};
pub use types::{NormalizedCompany, RegistryRow, SearchResult, TaxId, TaxIdKind, TicketResponse};
