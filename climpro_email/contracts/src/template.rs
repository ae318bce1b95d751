use std::future::Future;

use climpro_models::email_address::EmailAddressWithName;
use climpro_templates_contracts::{
    SubmissionAcknowledgmentTemplate, SubmissionNotificationTemplate,
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Notify the business about a new submission.
    fn send_submission_notification(
        &self,
        recipients: Vec<EmailAddressWithName>,
        subject: String,
        reply_to: Option<EmailAddressWithName>,
        data: &SubmissionNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Confirm the receipt of a submission to the submitter.
    fn send_submission_acknowledgment(
        &self,
        recipient: EmailAddressWithName,
        subject: String,
        data: &SubmissionAcknowledgmentTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_submission_notification(
        mut self,
        recipients: Vec<EmailAddressWithName>,
        subject: String,
        reply_to: Option<EmailAddressWithName>,
        data: SubmissionNotificationTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_submission_notification()
            .once()
            .with(
                mockall::predicate::eq(recipients),
                mockall::predicate::eq(subject),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_send_submission_acknowledgment(
        mut self,
        recipient: EmailAddressWithName,
        subject: String,
        data: SubmissionAcknowledgmentTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_submission_acknowledgment()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(subject),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }
}
