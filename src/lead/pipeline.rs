//! Lead submission pipeline
//!
//! Linear state machine: validate, attempt the primary CRM only when it
//! is configured, fall back to the secondary target, and as a last resort
//! durably record the lead for manual processing. A structurally valid
//! lead always yields [`SubmissionOutcome::Delivered`] or
//! [`SubmissionOutcome::Recorded`]; a misconfigured or down CRM must
//! never lose a sale.

use super::record::{FallbackRecord, LeadRecorder, LogRecorder};
use super::{DeliveryTarget, LeadRequest, SubmissionOutcome};
use crate::config::CrmConfig;
use crate::crm::{CrmTarget, HelpdeskTarget, LeadPayload, SalesCrmTarget};
use crate::error::{DeliveryResult, SubmitResult};

pub struct LeadPipeline {
    primary: Option<Box<dyn CrmTarget>>,
    secondary: Option<Box<dyn CrmTarget>>,
    recorder: Box<dyn LeadRecorder>,
}

impl LeadPipeline {
    /// Build targets from deployment configuration
    ///
    /// An absent primary or secondary config is the valid "not
    /// configured" state: the corresponding attempt is skipped rather
    /// than made and doomed to fail.
    pub fn from_config(config: &CrmConfig) -> DeliveryResult<Self> {
        let primary = match &config.primary {
            Some(cfg) => Some(Box::new(SalesCrmTarget::new(cfg.clone())?) as Box<dyn CrmTarget>),
            None => None,
        };
        let secondary = match &config.secondary {
            Some(cfg) => Some(Box::new(HelpdeskTarget::new(cfg.clone())?) as Box<dyn CrmTarget>),
            None => None,
        };

        Ok(Self {
            primary,
            secondary,
            recorder: Box::new(LogRecorder),
        })
    }

    /// Assemble from explicit parts (tests inject mocks here)
    pub fn with_targets(
        primary: Option<Box<dyn CrmTarget>>,
        secondary: Option<Box<dyn CrmTarget>>,
        recorder: Box<dyn LeadRecorder>,
    ) -> Self {
        Self {
            primary,
            secondary,
            recorder,
        }
    }

    /// Submit a lead, guaranteeing it is delivered or durably recorded
    ///
    /// Returns an error only for invalid input or when the fallback
    /// record itself cannot be written.
    pub async fn submit(&self, lead: &LeadRequest) -> SubmitResult<SubmissionOutcome> {
        lead.validate()?;

        let payload = LeadPayload::from_lead(lead);
        let mut upstream_errors: Vec<String> = Vec::new();

        match &self.primary {
            Some(target) => match target.submit(&payload).await {
                Ok(()) => {
                    tracing::info!(target_id = target.target_id(), "lead delivered");
                    return Ok(SubmissionOutcome::Delivered(DeliveryTarget::Primary));
                }
                Err(e) => {
                    tracing::warn!(target_id = target.target_id(), error = %e, "primary CRM delivery failed");
                    upstream_errors.push(e.to_string());
                }
            },
            None => {
                tracing::warn!("primary CRM not configured, skipping");
                upstream_errors.push("primary CRM not configured".to_string());
            }
        }

        if let Some(target) = &self.secondary {
            match target.submit(&payload).await {
                Ok(()) => {
                    tracing::info!(target_id = target.target_id(), "lead delivered via fallback");
                    return Ok(SubmissionOutcome::Delivered(DeliveryTarget::Secondary));
                }
                Err(e) => {
                    tracing::warn!(target_id = target.target_id(), error = %e, "secondary delivery failed");
                    upstream_errors.push(e.to_string());
                }
            }
        }

        let reason = upstream_errors.join("; ");
        let record = FallbackRecord::new(payload, Some(reason.clone()));
        self.recorder.record(&record)?;

        Ok(SubmissionOutcome::Recorded { reason })
    }
}
