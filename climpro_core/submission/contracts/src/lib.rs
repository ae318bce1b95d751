use std::future::Future;

use climpro_models::submission::{ServiceCategory, SubmissionForm, SubmissionValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to the business.
    ///
    /// Submissions with a filled in honeypot are discarded silently. If the
    /// submitter provided a valid email address, they also receive an
    /// acknowledgment.
    fn submit(
        &self,
        form: SubmissionForm,
    ) -> impl Future<Output = Result<SubmitOutcome, SubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission has been identified as bot traffic and was not delivered.
    Discarded,
    /// The internal notification has been delivered.
    Delivered {
        category: ServiceCategory,
        acknowledgment: AcknowledgmentStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcknowledgmentStatus {
    Sent,
    /// Sending the acknowledgment failed. This does not affect the outcome of
    /// the submission.
    Failed,
    /// The submitter did not provide a valid email address.
    Skipped,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Consent is required.")]
    ConsentRequired,
    #[error("Required fields are missing.")]
    MissingRequiredFields,
    #[error("A valid email address or phone number is required.")]
    ContactMethodRequired,
    #[error("The notification has been rejected by the delivery service.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SubmissionValidationError> for SubmitError {
    fn from(value: SubmissionValidationError) -> Self {
        match value {
            SubmissionValidationError::MissingRequiredFields => Self::MissingRequiredFields,
            SubmissionValidationError::ContactMethodRequired => Self::ContactMethodRequired,
        }
    }
}

#[cfg(feature = "mock")]
impl MockSubmissionFeatureService {
    pub fn with_submit(
        mut self,
        form: SubmissionForm,
        result: Result<SubmitOutcome, SubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
