//! Lead intake types and the guaranteed-delivery pipeline

mod pipeline;
mod record;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use pipeline::LeadPipeline;
pub use record::{FallbackRecord, LeadRecorder, LogRecorder};

/// A sales inquiry as posted by the storefront
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub additional_services: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
}

/// A cart line attached to a lead
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LeadRequest {
    /// Structural validation: name, phone and email must be non-empty
    /// after trimming. Rejected leads trigger no network call and no log
    /// record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Which system accepted the lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTarget {
    Primary,
    Secondary,
}

/// Guaranteed outcome for every structurally valid lead
///
/// `Recorded` means no CRM accepted the lead but the full payload was
/// durably logged for manual processing; the lead is never silently lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Delivered(DeliveryTarget),
    Recorded { reason: String },
}
