use anyhow::ensure;
use clap::Subcommand;
use climpro_config::Config;
use climpro_email_contracts::{ContentType, Email, EmailService};
use climpro_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email through the configured delivery service
    Test {
        /// Defaults to the internal submission recipients
        recipients: Vec<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Test { recipients } if recipients.is_empty() => {
                let recipients = config.submission.recipients.clone();
                test(config, recipients).await
            }
            Self::Test { recipients } => test(config, recipients).await,
        }
    }
}

async fn test(config: Config, recipients: Vec<EmailAddressWithName>) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    info!(
        "Sending test email to {}",
        recipients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let delivered = email_service
        .send(Email {
            recipients,
            subject: format!("Test de délivrabilité — {}", config.business.name),
            body: format!(
                "Cet email a été envoyé par le backend {} pour vérifier la délivrabilité.",
                config.business.website
            ),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(delivered, "The test email has been rejected");
    info!("Test email delivered");

    Ok(())
}
