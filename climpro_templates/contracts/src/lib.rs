use climpro_models::{business::BusinessDetails, submission::Submission};
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = stringify!($ident);
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    SubmissionNotificationTemplate("submission_notification.html"),
    SubmissionAcknowledgmentTemplate("submission_acknowledgment.html"),
}

/// Internal notification about a new submission, sent to the business.
///
/// Absent optional fields are rendered as a dash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionNotificationTemplate {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub postal_code: String,
    pub service_type: String,
    pub device_count: Option<String>,
    pub message: String,
    pub page_source: Option<String>,
    pub business: BusinessDetails,
}

/// Confirmation of receipt, sent to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionAcknowledgmentTemplate {
    pub first_name: String,
    pub service_type: String,
    pub postal_code: String,
    pub device_count: Option<String>,
    pub business: BusinessDetails,
}

impl SubmissionNotificationTemplate {
    pub fn new(submission: &Submission, business: BusinessDetails) -> Self {
        Self {
            full_name: submission.full_name.to_string(),
            email: submission.email.as_ref().map(ToString::to_string),
            phone: submission.phone.as_ref().map(ToString::to_string),
            postal_code: submission.postal_code.to_string(),
            service_type: submission.service_type.to_string(),
            device_count: submission.device_count.as_ref().map(ToString::to_string),
            message: submission.message.to_string(),
            page_source: submission.page_source.as_ref().map(ToString::to_string),
            business,
        }
    }
}

impl SubmissionAcknowledgmentTemplate {
    pub fn new(submission: &Submission, business: BusinessDetails) -> Self {
        Self {
            first_name: submission.first_name().into(),
            service_type: submission.service_type.to_string(),
            postal_code: submission.postal_code.to_string(),
            device_count: submission.device_count.as_ref().map(ToString::to_string),
            business,
        }
    }
}
