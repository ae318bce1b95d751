use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use anyhow::anyhow;
use axum::{
    body::{to_bytes, Body},
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
};
use climpro::environment::ConfigProvider;
use climpro_api_rest::RestServerConfig;
use climpro_core_submission_impl::{SubmissionFeatureConfig, SubmissionFeatureServiceImpl};
use climpro_di::{provider, Provide};
use climpro_email_contracts::{ContentType, Email, EmailService};
use climpro_email_impl::template::TemplateEmailServiceImpl;
use climpro_templates_impl::TemplateServiceImpl;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

type RestServer = climpro_api_rest::RestServer<
    SubmissionFeatureServiceImpl<
        TemplateEmailServiceImpl<RecordingEmailService, TemplateServiceImpl>,
    >,
>;

provider! {
    TestProvider {
        email: RecordingEmailService,
        ..config: ConfigProvider {
            RestServerConfig,
            SubmissionFeatureConfig,
        }
    }
}

/// Delivery double which keeps every email it is asked to send.
#[derive(Debug, Clone, Default)]
struct RecordingEmailService {
    sent: Arc<Mutex<Vec<Email>>>,
    /// Index of the delivery attempt which fails with a transport error
    fail_attempt: Option<usize>,
}

impl RecordingEmailService {
    fn failing_at(attempt: usize) -> Self {
        Self {
            fail_attempt: Some(attempt),
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailService for RecordingEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let attempt = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(email);
            sent.len() - 1
        };

        if self.fail_attempt == Some(attempt) {
            return Err(anyhow!("connection refused"));
        }

        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

async fn post(
    email: &RecordingEmailService,
    content_type: &str,
    body: String,
) -> (StatusCode, Value) {
    let config = climpro_config::load_paths(&[climpro_config::DEFAULT_CONFIG_PATH]).unwrap();
    let mut provider = TestProvider {
        cache: Default::default(),
        email: email.clone(),
        config: ConfigProvider::new(&config).unwrap(),
    };
    let server: RestServer = provider.provide();

    let request = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    let response = server
        .router()
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4242))))
        .oneshot(request)
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(email: &RecordingEmailService, body: Value) -> (StatusCode, Value) {
    post(email, "application/json", body.to_string()).await
}

fn jean() -> Value {
    json!({
        "fullname": "Jean Dupont",
        "email": "jean@ex.com",
        "phone": "",
        "postal": "1000",
        "service": "Dépannage urgent",
        "appareils": "2",
        "message": "Panne clim\ndepuis hier",
        "hp": "",
        "consent": true
    })
}

fn with(mut form: Value, key: &str, value: Value) -> Value {
    form[key] = value;
    form
}

#[tokio::test]
async fn repair_request_is_delivered_and_acknowledged() {
    // Arrange
    let email = RecordingEmailService::default();

    // Act
    let result = post_json(&email, jean()).await;

    // Assert
    assert_eq!(result, (StatusCode::OK, json!({"ok": true})));

    let sent = email.sent();
    assert_eq!(sent.len(), 2);

    let notification = &sent[0];
    assert_eq!(notification.subject, "Demande de dépannage — Jean Dupont");
    assert_eq!(
        notification
            .recipients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        ["info@climpro.be"]
    );
    assert_eq!(
        notification.reply_to.as_ref().map(ToString::to_string).as_deref(),
        Some("jean@ex.com")
    );
    assert_eq!(notification.content_type, ContentType::Html);
    assert!(notification.body.contains("Nouvelle demande via Climpro.be"));
    assert!(notification.body.contains("Jean Dupont"));
    assert!(notification.body.contains("Panne clim<br>depuis hier"));
    assert!(notification.body.contains("Dépannage urgent"));

    let acknowledgment = &sent[1];
    assert_eq!(acknowledgment.subject, "✅ Demande de dépannage — Climpro");
    assert_eq!(
        acknowledgment
            .recipients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        ["jean@ex.com"]
    );
    assert_eq!(acknowledgment.reply_to, None);
    assert!(acknowledgment.body.contains("Bonjour Jean,"));
    assert!(acknowledgment.body.contains("sous 24h ouvrées"));
    assert!(acknowledgment.body.contains("02 428 40 35"));
}

#[tokio::test]
async fn phone_only_request_skips_acknowledgment() {
    // Arrange
    let email = RecordingEmailService::default();
    let form = with(
        with(jean(), "email", json!("")),
        "phone",
        json!("0470 12 34 56"),
    );
    let form = with(form, "service", json!("Installation climatisation"));

    // Act
    let result = post_json(&email, form).await;

    // Assert
    assert_eq!(result, (StatusCode::OK, json!({"ok": true})));

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Demande d’info installation — Jean Dupont");
    assert_eq!(sent[0].reply_to, None);
    assert!(sent[0].body.contains("0470 12 34 56"));
}

#[tokio::test]
async fn consent_required() {
    // Arrange
    let email = RecordingEmailService::default();

    // Act
    let result = post_json(&email, with(jean(), "consent", json!(false))).await;

    // Assert
    assert_eq!(
        result,
        (
            StatusCode::BAD_REQUEST,
            json!({"ok": false, "error": "Consentement requis"})
        )
    );
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn contact_method_required() {
    // Arrange
    let email = RecordingEmailService::default();
    let form = with(
        with(jean(), "email", json!("pas-un-email")),
        "phone",
        json!("123"),
    );

    // Act
    let result = post_json(&email, form).await;

    // Assert
    assert_eq!(
        result,
        (
            StatusCode::BAD_REQUEST,
            json!({"ok": false, "error": "Email valide OU téléphone requis"})
        )
    );
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn missing_required_fields() {
    // Arrange
    let email = RecordingEmailService::default();

    // Act
    let result = post_json(&email, with(jean(), "postal", json!("   "))).await;

    // Assert
    assert_eq!(
        result,
        (
            StatusCode::BAD_REQUEST,
            json!({"ok": false, "error": "Champs requis manquants"})
        )
    );
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn honeypot_is_silently_discarded() {
    // Arrange
    let email = RecordingEmailService::default();

    // Act
    let result = post_json(&email, with(jean(), "hp", json!("spam"))).await;

    // Assert
    assert_eq!(result, (StatusCode::OK, json!({"ok": true})));
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn failed_notification() {
    // Arrange
    let email = RecordingEmailService::failing_at(0);

    // Act
    let result = post_json(&email, jean()).await;

    // Assert
    assert_eq!(
        result,
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"ok": false, "error": "Erreur serveur"})
        )
    );
    assert_eq!(email.sent().len(), 1);
}

#[tokio::test]
async fn failed_acknowledgment_is_ignored() {
    // Arrange
    let email = RecordingEmailService::failing_at(1);

    // Act
    let result = post_json(&email, jean()).await;

    // Assert
    assert_eq!(result, (StatusCode::OK, json!({"ok": true})));
    assert_eq!(email.sent().len(), 2);
}

#[tokio::test]
async fn urlencoded_form() {
    // Arrange
    let email = RecordingEmailService::default();
    let body = "fullname=Marie+Lambert&email=marie.lambert%40example.be&phone=&postal=1180\
                &service=Entretien+annuel&message=Entretien&page_source=%2Fentretien\
                &consent=on";

    // Act
    let result = post(&email, "application/x-www-form-urlencoded", body.into()).await;

    // Assert
    assert_eq!(result, (StatusCode::OK, json!({"ok": true})));

    let sent = email.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].subject, "Demande d’entretien — Marie Lambert");
    assert!(sent[0].body.contains("Source : &#x2F;entretien"));
    assert_eq!(sent[1].subject, "✅ Demande d’entretien — Climpro");
    assert!(sent[1].body.contains("Bonjour Marie,"));
}
