//! CRM delivery targets
//!
//! One capability behind one trait: submit a lead, raise a typed error on
//! failure. The primary target is the external sales CRM; the secondary
//! target is the helpdesk/ERP system used by the fallback path.

mod helpdesk;
mod payload;
mod sales;

use async_trait::async_trait;

use crate::error::DeliveryResult;

pub use helpdesk::HelpdeskTarget;
pub use payload::{CartLine, ContactBlock, LeadPayload, RequestBlock};
pub use sales::SalesCrmTarget;

/// A system a lead can be delivered to
#[async_trait]
pub trait CrmTarget: Send + Sync {
    /// Unique identifier for this target (e.g., "sales-crm")
    fn target_id(&self) -> &'static str;

    /// Human-readable name
    fn target_name(&self) -> &'static str;

    /// Submit a lead; any non-success response or transport failure is a
    /// [`crate::error::DeliveryError`]
    async fn submit(&self, payload: &LeadPayload) -> DeliveryResult<()>;
}
