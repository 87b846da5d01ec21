//! Integration tests for the two-phase registry lookup protocol
//!
//! Uses an in-memory transport so assertions can count protocol calls;
//! the poll delay is set to zero to keep the suite fast.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use lead_gateway::error::{RegistryError, RegistryResult};
use lead_gateway::registry::{
    RegistryClient, RegistryTransport, Resolution, SearchResult, TaxId, TicketResponse,
};

/// Scripted transport with per-phase call counters
struct ScriptedTransport {
    phase1: RegistryResult<&'static str>,
    phase2: RegistryResult<&'static str>,
    phase1_calls: Arc<AtomicUsize>,
    phase2_calls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    fn new(phase1: RegistryResult<&'static str>, phase2: RegistryResult<&'static str>) -> Self {
        Self {
            phase1,
            phase2,
            phase1_calls: Arc::new(AtomicUsize::new(0)),
            phase2_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.phase1_calls.clone(), self.phase2_calls.clone())
    }
}

fn clone_result(result: &RegistryResult<&'static str>) -> RegistryResult<&'static str> {
    match result {
        Ok(body) => Ok(body),
        Err(RegistryError::Upstream { status, body }) => Err(RegistryError::Upstream {
            status: *status,
            body: body.clone(),
        }),
        Err(RegistryError::Transport(msg)) => Err(RegistryError::Transport(msg.clone())),
        Err(RegistryError::Decode(msg)) => Err(RegistryError::Decode(msg.clone())),
    }
}

#[async_trait]
impl RegistryTransport for ScriptedTransport {
    async fn submit_query(&self, _digits: &str) -> RegistryResult<TicketResponse> {
        self.phase1_calls.fetch_add(1, Ordering::SeqCst);
        let body = clone_result(&self.phase1)?;
        Ok(serde_json::from_str(body).expect("phase-1 script must be valid JSON"))
    }

    async fn fetch_result(&self, _ticket: &str) -> RegistryResult<SearchResult> {
        self.phase2_calls.fetch_add(1, Ordering::SeqCst);
        let body = clone_result(&self.phase2)?;
        Ok(serde_json::from_str(body).expect("phase-2 script must be valid JSON"))
    }
}

fn client(transport: ScriptedTransport) -> RegistryClient {
    RegistryClient::with_transport(Box::new(transport), Duration::from_millis(0))
}

#[tokio::test]
async fn test_resolve_normalizes_first_row() {
    let transport = ScriptedTransport::new(
        Ok(r#"{"t":"abc123"}"#),
        Ok(r#"{"rows":[{"n":"ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ \"ТЕХНО\"","k":"123","a":"г. Москва"}]}"#),
    );
    let tax_id = TaxId::parse("7707083893").unwrap();

    let resolution = client(transport).resolve(&tax_id).await.unwrap();

    let Resolution::Found(company) = resolution else {
        panic!("expected a company, got {:?}", resolution);
    };
    assert_eq!(company.name, "ООО ТЕХНО");
    assert_eq!(company.kpp.as_deref(), Some("123"));
    assert_eq!(company.address.as_deref(), Some("г. Москва"));
    assert_eq!(company.inn, "7707083893");
}

#[tokio::test]
async fn test_missing_ticket_is_not_found_without_phase_two() {
    let transport = ScriptedTransport::new(Ok(r#"{"captchaRequired":false}"#), Ok(r#"{"rows":[]}"#));
    let (phase1, phase2) = transport.counters();
    let tax_id = TaxId::parse("7707083893").unwrap();

    let resolution = client(transport).resolve(&tax_id).await.unwrap();

    assert_eq!(resolution, Resolution::NotFound);
    assert_eq!(phase1.load(Ordering::SeqCst), 1);
    assert_eq!(phase2.load(Ordering::SeqCst), 0, "phase 2 must not run");
}

#[tokio::test]
async fn test_empty_rows_is_not_found() {
    let transport = ScriptedTransport::new(Ok(r#"{"t":"abc123"}"#), Ok(r#"{"rows":[]}"#));
    let tax_id = TaxId::parse("7707083893").unwrap();

    let resolution = client(transport).resolve(&tax_id).await.unwrap();
    assert_eq!(resolution, Resolution::NotFound);
}

#[tokio::test]
async fn test_first_row_wins_over_later_rows() {
    let transport = ScriptedTransport::new(
        Ok(r#"{"t":"abc123"}"#),
        Ok(r#"{"rows":[
            {"n":"АКЦИОНЕРНОЕ ОБЩЕСТВО \"ПЕРВЫЙ\"","i":"7707083893"},
            {"n":"АКЦИОНЕРНОЕ ОБЩЕСТВО \"ВТОРОЙ\"","i":"7707083893"}
        ]}"#),
    );
    let tax_id = TaxId::parse("7707083893").unwrap();

    let resolution = client(transport).resolve(&tax_id).await.unwrap();

    let Resolution::Found(company) = resolution else {
        panic!("expected a company");
    };
    assert_eq!(company.name, "АО ПЕРВЫЙ");
}

#[tokio::test]
async fn test_phase_two_upstream_failure_surfaces_status_and_body() {
    let transport = ScriptedTransport::new(
        Ok(r#"{"t":"abc123"}"#),
        Err(RegistryError::Upstream {
            status: 503,
            body: "registry maintenance".to_string(),
        }),
    );
    let tax_id = TaxId::parse("7707083893").unwrap();

    let error = client(transport).resolve(&tax_id).await.unwrap_err();

    match error {
        RegistryError::Upstream { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("maintenance"));
        }
        other => panic!("expected upstream error, got {other}"),
    }
}

#[tokio::test]
async fn test_twelve_digit_identifier_gets_ip_prefix() {
    let transport = ScriptedTransport::new(
        Ok(r#"{"t":"t1"}"#),
        Ok(r#"{"rows":[{"n":"ИВАНОВ ИВАН ИВАНОВИЧ","i":"770708389312"}]}"#),
    );
    let tax_id = TaxId::parse("770708389312").unwrap();

    let resolution = client(transport).resolve(&tax_id).await.unwrap();

    let Resolution::Found(company) = resolution else {
        panic!("expected a company");
    };
    assert_eq!(company.name, "ИП ИВАНОВ ИВАН ИВАНОВИЧ");
}
