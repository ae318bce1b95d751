use std::sync::Arc;

use climpro_core_submission_contracts::{
    AcknowledgmentStatus, SubmissionFeatureService, SubmitError, SubmitOutcome,
};
use climpro_di::Build;
use climpro_email_contracts::template::TemplateEmailService;
use climpro_models::{
    business::BusinessDetails,
    email_address::EmailAddressWithName,
    submission::{Submission, SubmissionForm},
};
use climpro_templates_contracts::{
    SubmissionAcknowledgmentTemplate, SubmissionNotificationTemplate,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Build)]
pub struct SubmissionFeatureServiceImpl<TemplateEmail> {
    template_email: TemplateEmail,
    config: SubmissionFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct SubmissionFeatureConfig {
    /// Recipients of the internal notification
    pub recipients: Arc<Vec<EmailAddressWithName>>,
    pub business: Arc<BusinessDetails>,
}

impl<TemplateEmail> SubmissionFeatureService for SubmissionFeatureServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    #[tracing::instrument(skip_all)]
    async fn submit(&self, form: SubmissionForm) -> Result<SubmitOutcome, SubmitError> {
        if form.is_bot() {
            info!("Discarding submission with filled in honeypot");
            return Ok(SubmitOutcome::Discarded);
        }

        if !form.consent {
            return Err(SubmitError::ConsentRequired);
        }

        let submission = Submission::try_from(form)?;
        let category = submission.category();
        let prefix = category.subject_prefix();
        let email = submission.valid_email().and_then(|email| {
            EmailAddressWithName::try_from(&email)
                .inspect_err(|err| warn!(%email, "Unusable submitter mailbox: {err}"))
                .ok()
        });

        let notification =
            SubmissionNotificationTemplate::new(&submission, (*self.config.business).clone());
        let delivered = self
            .template_email
            .send_submission_notification(
                (*self.config.recipients).clone(),
                format!("{prefix} — {}", *submission.full_name),
                email.clone(),
                &notification,
            )
            .await?;
        if !delivered {
            return Err(SubmitError::Send);
        }

        let acknowledgment = match email {
            Some(email) => self.send_acknowledgment(&submission, email, prefix).await,
            None => AcknowledgmentStatus::Skipped,
        };

        info!(?category, ?acknowledgment, "Submission delivered");

        Ok(SubmitOutcome::Delivered {
            category,
            acknowledgment,
        })
    }
}

impl<TemplateEmail> SubmissionFeatureServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    async fn send_acknowledgment(
        &self,
        submission: &Submission,
        recipient: EmailAddressWithName,
        prefix: &str,
    ) -> AcknowledgmentStatus {
        let acknowledgment =
            SubmissionAcknowledgmentTemplate::new(submission, (*self.config.business).clone());
        let result = self
            .template_email
            .send_submission_acknowledgment(
                recipient,
                format!("✅ {prefix} — {}", self.config.business.name),
                &acknowledgment,
            )
            .await;

        match result {
            Ok(true) => AcknowledgmentStatus::Sent,
            Ok(false) => {
                warn!("Acknowledgment has been rejected by the delivery service");
                AcknowledgmentStatus::Failed
            }
            Err(err) => {
                warn!("Failed to send acknowledgment: {err:#}");
                AcknowledgmentStatus::Failed
            }
        }
    }
}
