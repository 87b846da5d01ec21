//! Secondary helpdesk/ERP target
//!
//! Same payload shape as the sales CRM, different transport and
//! authentication. Used by the fallback path when the primary target is
//! down or not configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::payload::LeadPayload;
use super::CrmTarget;
use crate::config::HelpdeskConfig;
use crate::error::{DeliveryError, DeliveryResult};

const TARGET_ID: &str = "helpdesk";
const HTTP_TIMEOUT_SECS: u64 = 30;

pub struct HelpdeskTarget {
    http: Client,
    config: HelpdeskConfig,
}

impl HelpdeskTarget {
    pub fn new(config: HelpdeskConfig) -> DeliveryResult<Self> {
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
impl CrmTarget for HelpdeskTarget {
    fn target_id(&self) -> &'static str {
        TARGET_ID
    }

    fn target_name(&self) -> &'static str {
        "Helpdesk"
    }

    async fn submit(&self, payload: &LeadPayload) -> DeliveryResult<()> {
        let url = format!("{}/tickets", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(payload)
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
