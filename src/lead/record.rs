//! Durable fallback record for leads no CRM accepted
//!
//! The record carries everything an operator needs for manual CRM entry:
//! contact, requested product, cart contents and the originating upstream
//! error, tagged with a lead id and timestamp. It is written to the
//! operational log on a dedicated target that alerting is expected to
//! watch.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::crm::LeadPayload;
use crate::error::RecordError;

#[derive(Debug, Clone, Serialize)]
pub struct FallbackRecord {
    pub lead_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: LeadPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<String>,
}

impl FallbackRecord {
    pub fn new(payload: LeadPayload, upstream_error: Option<String>) -> Self {
        Self {
            lead_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            payload,
            upstream_error,
        }
    }
}

/// Sink for fallback records
///
/// Failure here is the only fatal path of the pipeline: a lead that can
/// be neither delivered nor recorded must surface as an error.
pub trait LeadRecorder: Send + Sync {
    fn record(&self, record: &FallbackRecord) -> Result<(), RecordError>;
}

/// Default recorder: structured JSON on the operational log
pub struct LogRecorder;

impl LeadRecorder for LogRecorder {
    fn record(&self, record: &FallbackRecord) -> Result<(), RecordError> {
        let json = serde_json::to_string(record)?;
        tracing::error!(
            target: "lead_fallback",
            lead_id = %record.lead_id,
            payload = %json,
            "lead requires manual CRM entry"
        );
        Ok(())
    }
}
