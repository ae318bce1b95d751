use climpro_email_contracts::{Email, EmailService};

pub use resend::ResendEmailService;
pub use smtp::SmtpEmailService;

mod http;
pub mod resend;
pub mod smtp;
pub mod template;

/// The delivery backend selected by the configuration.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Smtp(SmtpEmailService),
    Resend(ResendEmailService),
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        match self {
            Self::Smtp(smtp) => smtp.send(email).await,
            Self::Resend(resend) => resend.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Smtp(smtp) => smtp.ping().await,
            Self::Resend(resend) => resend.ping().await,
        }
    }
}

impl From<SmtpEmailService> for EmailServiceImpl {
    fn from(value: SmtpEmailService) -> Self {
        Self::Smtp(value)
    }
}

impl From<ResendEmailService> for EmailServiceImpl {
    fn from(value: ResendEmailService) -> Self {
        Self::Resend(value)
    }
}
