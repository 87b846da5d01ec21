//! Deployment configuration
//!
//! Explicit structs injected at construction time instead of ad-hoc
//! environment reads inside the pipeline, so "is the primary CRM
//! configured" is a pure predicate and tests never mutate the process
//! environment. `from_env` helpers exist for the binary only.

use std::env;
use std::net::SocketAddr;

use crate::error::ConfigError;
use crate::registry::RESULT_POLL_DELAY_MS;

/// Default registry endpoint (overridable via `REGISTRY_URL`)
pub const DEFAULT_REGISTRY_URL: &str = "https://egrul.nalog.ru";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Registry lookup settings
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    pub poll_delay_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            poll_delay_ms: RESULT_POLL_DELAY_MS,
        }
    }
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("REGISTRY_URL").unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string()),
            ..Self::default()
        }
    }
}

/// Where the sales CRM should route an incoming lead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadRoute {
    /// Named processing template
    Template(String),
    /// Explicit numeric workflow identifier
    Workflow(u64),
}

/// Primary sales-CRM credentials and routing
///
/// Existence of this struct is the "primary configured" predicate: it can
/// only be built with credentials and a route selector.
#[derive(Debug, Clone)]
pub struct SalesCrmConfig {
    pub base_url: String,
    pub login: String,
    pub password: String,
    pub route: LeadRoute,
}

impl SalesCrmConfig {
    /// Build from the environment; `None` is the valid "not configured"
    /// state, never an error
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    ///
    /// Credentials alone are not enough: a route selector (numeric
    /// `CRM_WORKFLOW_ID` or non-empty `CRM_TEMPLATE`) must also be
    /// present, otherwise the primary CRM stays unconfigured.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let base_url = get("CRM_URL")?;
        let login = non_empty(get("CRM_LOGIN")?)?;
        let password = non_empty(get("CRM_PASSWORD")?)?;

        let workflow_id = get("CRM_WORKFLOW_ID").and_then(|raw| match raw.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(value = %raw, "CRM_WORKFLOW_ID is not numeric, ignoring");
                None
            }
        });

        let route = match workflow_id {
            Some(id) => LeadRoute::Workflow(id),
            None => LeadRoute::Template(non_empty(get("CRM_TEMPLATE")?)?),
        };

        Some(Self {
            base_url,
            login,
            password,
            route,
        })
    }
}

/// Secondary helpdesk/ERP target settings
#[derive(Debug, Clone)]
pub struct HelpdeskConfig {
    pub base_url: String,
    pub token: String,
}

impl HelpdeskConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            base_url: get("HELPDESK_URL")?,
            token: non_empty(get("HELPDESK_TOKEN")?)?,
        })
    }
}

/// CRM delivery configuration for the lead pipeline
#[derive(Debug, Clone, Default)]
pub struct CrmConfig {
    pub primary: Option<SalesCrmConfig>,
    pub secondary: Option<HelpdeskConfig>,
}

impl CrmConfig {
    pub fn from_env() -> Self {
        Self {
            primary: SalesCrmConfig::from_env(),
            secondary: HelpdeskConfig::from_env(),
        }
    }

    pub fn primary_configured(&self) -> bool {
        self.primary.is_some()
    }
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub crm: CrmConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidBindAddr {
                value: raw.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            registry: RegistryConfig::from_env(),
            crm: CrmConfig::from_env(),
            bind_addr,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
