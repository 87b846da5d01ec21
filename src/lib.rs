//! lead-gateway
//!
//! Registry lookup and guaranteed lead delivery for the storefront.
//!
//! Two independent flows share one design: resilient orchestration of
//! external calls.
//!
//! - [`registry::RegistryClient::resolve`] turns a taxpayer identifier
//!   into a normalized legal-entity record via the registry's two-phase
//!   query/poll protocol. Lookup failures degrade gracefully; the
//!   storefront proceeds without enrichment.
//! - [`lead::LeadPipeline::submit`] delivers a sales inquiry to the
//!   primary CRM, falls back to the helpdesk target, and as a last resort
//!   durably records the lead for manual processing. A valid lead is
//!   never silently dropped.

pub mod api;
pub mod config;
pub mod crm;
pub mod error;
pub mod lead;
pub mod registry;

pub use config::{AppConfig, CrmConfig, RegistryConfig};
pub use error::{ConfigError, DeliveryError, RegistryError, SubmitError, ValidationError};
pub use lead::{DeliveryTarget, LeadPipeline, LeadRequest, SubmissionOutcome};
pub use registry::{NormalizedCompany, RegistryClient, Resolution, TaxId};
