use std::sync::LazyLock;

use climpro_models::submission::{Submission, SubmissionForm};

pub static FORM_JEAN: LazyLock<SubmissionForm> = LazyLock::new(|| SubmissionForm {
    full_name: Some("Jean Dupont".into()),
    email: Some("jean@ex.com".into()),
    phone: Some("".into()),
    postal_code: Some("1000".into()),
    service_type: Some("Dépannage urgent".into()),
    device_count: Some("2".into()),
    message: Some("Panne clim\ndepuis hier".into()),
    page_source: None,
    honeypot: Some("".into()),
    consent: true,
});

pub static SUBMISSION_JEAN: LazyLock<Submission> =
    LazyLock::new(|| crate::submission(&FORM_JEAN));

/// Phone and email, but no device count.
pub static FORM_MARIE: LazyLock<SubmissionForm> = LazyLock::new(|| SubmissionForm {
    full_name: Some("Marie Lambert".into()),
    email: Some("marie.lambert@example.be".into()),
    phone: Some("0470 12 34 56".into()),
    postal_code: Some("1180".into()),
    service_type: Some("Entretien annuel".into()),
    device_count: None,
    message: Some("Entretien de deux unités murales".into()),
    page_source: Some("/entretien".into()),
    honeypot: None,
    consent: true,
});

pub static SUBMISSION_MARIE: LazyLock<Submission> =
    LazyLock::new(|| crate::submission(&FORM_MARIE));
