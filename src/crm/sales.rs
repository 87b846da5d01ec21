//! Primary sales-CRM target
//!
//! Single authenticated call carrying the shared payload plus the
//! configured routing selector (named template or numeric workflow id).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::payload::LeadPayload;
use super::CrmTarget;
use crate::config::{LeadRoute, SalesCrmConfig};
use crate::error::{DeliveryError, DeliveryResult};

const TARGET_ID: &str = "sales-crm";
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Lead envelope as the sales CRM expects it
#[derive(Serialize)]
struct SalesLead<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_id: Option<u64>,
    #[serde(flatten)]
    payload: &'a LeadPayload,
}

pub struct SalesCrmTarget {
    http: Client,
    config: SalesCrmConfig,
}

impl SalesCrmTarget {
    pub fn new(config: SalesCrmConfig) -> DeliveryResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| DeliveryError::Transport {
                target: TARGET_ID,
                message: e.to_string(),
            })?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl CrmTarget for SalesCrmTarget {
    fn target_id(&self) -> &'static str {
        TARGET_ID
    }

    fn target_name(&self) -> &'static str {
        "Sales CRM"
    }

    async fn submit(&self, payload: &LeadPayload) -> DeliveryResult<()> {
        let (template, workflow_id) = match &self.config.route {
            LeadRoute::Template(name) => (Some(name.as_str()), None),
            LeadRoute::Workflow(id) => (None, Some(*id)),
        };

        let body = SalesLead {
            template,
            workflow_id,
            payload,
        };

        let url = format!("{}/lead", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.login, Some(&self.config.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport {
                target: TARGET_ID,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                target: TARGET_ID,
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        Ok(())
    }
}
