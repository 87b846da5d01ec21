//! Target-independent lead payload
//!
//! Both CRM targets and the durable fallback record carry the same shape:
//! a contact block, a request block and the cart lines. Built once per
//! submission from the validated [`LeadRequest`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::lead::{CartItem, LeadRequest};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactBlock {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequestBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub quantity: u32,
}

/// The lead as submitted to a CRM target
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeadPayload {
    pub contact: ContactBlock,
    pub request: RequestBlock,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cart: Vec<CartLine>,
}

impl LeadPayload {
    pub fn from_lead(lead: &LeadRequest) -> Self {
        Self {
            contact: ContactBlock {
                name: lead.name.trim().to_string(),
                phone: lead.phone.trim().to_string(),
                email: lead.email.trim().to_string(),
                company: trimmed(&lead.company),
            },
            request: RequestBlock {
                product: trimmed(&lead.product),
                business_type: trimmed(&lead.business_type),
                additional_services: lead.additional_services.clone(),
                message: trimmed(&lead.message),
            },
            cart: lead.cart_items.iter().map(CartLine::from_item).collect(),
        }
    }
}

impl CartLine {
    fn from_item(item: &CartItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
