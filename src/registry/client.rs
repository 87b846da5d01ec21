//! Registry lookup client
//!
//! Implements the registry's asynchronous two-phase protocol: submit the
//! query, wait the fixed processing delay, then fetch the result keyed by
//! the phase-1 ticket. The upstream guarantees readiness after the delay,
//! so exactly one poll is made (no retry loop).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;

use super::normalize::normalize_row;
use super::types::{NormalizedCompany, SearchResult, TaxId, TicketResponse};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};

/// Delay between query submission and result retrieval
pub const RESULT_POLL_DELAY_MS: u64 = 2000;

const HTTP_TIMEOUT_SECS: u64 = 30;

/// Outcome of a registry lookup for a valid tax identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(NormalizedCompany),
    /// Query accepted but no matching record exists
    NotFound,
}

/// Transport seam for the two protocol phases
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Phase 1: submit the cleaned tax identifier, obtaining a ticket
    async fn submit_query(&self, digits: &str) -> RegistryResult<TicketResponse>;

    /// Phase 2: fetch the result set for a ticket
    async fn fetch_result(&self, ticket: &str) -> RegistryResult<SearchResult>;
}

/// Production transport against the registry HTTP endpoint
pub struct HttpRegistryTransport {
    http: Client,
    base_url: String,
}

impl HttpRegistryTransport {
    pub fn new(base_url: impl Into<String>) -> RegistryResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> RegistryResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Upstream {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RegistryTransport for HttpRegistryTransport {
    async fn submit_query(&self, digits: &str) -> RegistryResult<TicketResponse> {
        let response = self
            .http
            .post(&self.base_url)
            .form(&[("query", digits)])
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn fetch_result(&self, ticket: &str) -> RegistryResult<SearchResult> {
        let url = format!("{}/search-result/{}", self.base_url, ticket);
        let response = self.http.get(&url).send().await?;

        Self::decode(response).await
    }
}

/// Client for resolving tax identifiers to normalized company records
pub struct RegistryClient {
    transport: Box<dyn RegistryTransport>,
    poll_delay: Duration,
}

impl RegistryClient {
    /// Create a client against the configured registry endpoint
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        Ok(Self {
            transport: Box::new(HttpRegistryTransport::new(config.base_url.clone())?),
            poll_delay: Duration::from_millis(config.poll_delay_ms),
        })
    }

    /// Create with an existing transport
    pub fn with_transport(transport: Box<dyn RegistryTransport>, poll_delay: Duration) -> Self {
        Self {
            transport,
            poll_delay,
        }
    }

    /// Resolve a validated tax identifier to a normalized company record
    ///
    /// Returns [`Resolution::NotFound`] when the registry declines the
    /// query (no ticket) or answers with an empty result set. Upstream or
    /// transport failures surface as [`RegistryError`]; callers treat the
    /// lookup as best-effort enrichment and degrade gracefully.
    pub async fn resolve(&self, tax_id: &TaxId) -> RegistryResult<Resolution> {
        let submitted = self.transport.submit_query(tax_id.digits()).await?;

        let Some(ticket) = submitted.ticket() else {
            tracing::debug!(inn = %tax_id, "registry declined query, no ticket issued");
            return Ok(Resolution::NotFound);
        };

        // The registry processes queries asynchronously and guarantees the
        // result is ready after this fixed delay. Suspends only this task.
        sleep(self.poll_delay).await;

        let result = self.transport.fetch_result(ticket).await?;

        match result.rows.first() {
            // Tax identifiers are unique, so the first row wins.
            Some(row) => Ok(Resolution::Found(normalize_row(row, tax_id))),
            None => Ok(Resolution::NotFound),
        }
    }
}
