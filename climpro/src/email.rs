use climpro_config::EmailConfig;
use climpro_email_impl::{EmailServiceImpl, ResendEmailService, SmtpEmailService};

/// Connect to the configured email delivery service.
///
/// The resend api is preferred if both resend and smtp are configured.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    if let Some(resend) = &config.resend {
        return ResendEmailService::new(
            &resend.api_key,
            resend.endpoint.clone(),
            &config.from,
            config.timeout.into(),
        )
        .map(Into::into);
    }

    if let Some(smtp) = &config.smtp {
        return SmtpEmailService::new(&smtp.url, &config.from, config.timeout.into())
            .map(Into::into);
    }

    anyhow::bail!("No email delivery service has been configured")
}
