//! End-to-end: the landing page submitter posting to a served webhook.

mod common;

use std::net::SocketAddr;

use anicama_core::config::SiteConfig;
use anicama_core::lead::{BrowserContext, LeadFields};
use anicama_sheets::Workbook;
use anicama_submit::form::MSG_THANKS;
use anicama_submit::{FormSession, LeadEnvelope, LeadSubmitter, SubmitError, SubmitOutcome};
use assert_matches::assert_matches;
use chrono::Utc;

/// Serve the test app on an ephemeral port.
async fn serve(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn context() -> BrowserContext {
    BrowserContext {
        page_url: "https://anicama.pe/#contacto".into(),
        user_agent: "Mozilla/5.0".into(),
        referrer: None,
    }
}

// ---------------------------------------------------------------------------
// Test: a valid contact form lands in the lead sheet
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contact_form_submission_is_stored() {
    let (app, workbook) = common::build_test_app();
    let addr = serve(app).await;

    let config = SiteConfig::shipped().with_endpoint(format!("http://{addr}/"));
    let submitter = LeadSubmitter::http(config).unwrap();

    let mut form = FormSession::contact();
    form.input("nombres", "Ana Torres");
    form.input("email", "ana@mail.com");
    form.input("telefono", "987-654-321");
    form.input("mensaje", "Necesito ayuda con mi declaración");

    let outcome = form.submit(&submitter, &context()).await;
    assert_matches!(outcome, SubmitOutcome::Sent { notice } => {
        assert_eq!(notice.message, MSG_THANKS);
    });

    let row = workbook.row("Leads", 2).await.unwrap().unwrap();
    let text = |i: usize| row.cells[i].as_text().unwrap().to_string();
    assert_eq!(text(1), "Ana Torres");
    assert_eq!(text(3), "987654321");
    assert_eq!(text(8), "contact_form");
    assert_eq!(text(10), "Direct");
    assert_eq!(text(12), "Unknown");
    assert!(row.cells[0].as_timestamp().is_some());
}

// ---------------------------------------------------------------------------
// Test: the submitter never reads the reply, so a 400 still "succeeds"
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_lead_is_invisible_to_the_submitter() {
    let (app, workbook) = common::build_test_app();
    let addr = serve(app).await;

    let config = SiteConfig::shipped().with_endpoint(format!("http://{addr}/"));
    let submitter = LeadSubmitter::http(config).unwrap();
    let envelope = LeadEnvelope::build(&LeadFields::new(), &context(), Utc::now());

    assert!(submitter.submit(&envelope).await.is_ok());
    assert!(workbook.sheet_names().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: nothing listening -> network error, form left populated
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = SiteConfig::shipped().with_endpoint(format!("http://{addr}/"));
    let submitter = LeadSubmitter::http(config).unwrap();

    let mut form = FormSession::hero();
    form.input("nombres", "Ana Torres");
    form.input("email", "ana@mail.com");
    form.input("celular", "987654321");

    let outcome = form.submit(&submitter, &context()).await;
    assert_matches!(
        outcome,
        SubmitOutcome::Failed {
            error: SubmitError::Network(_),
            ..
        }
    );
    assert_eq!(form.value("nombres"), "Ana Torres");
    assert!(!form.control().disabled);
}
