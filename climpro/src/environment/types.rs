use climpro_core_submission_impl::SubmissionFeatureServiceImpl;
use climpro_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use climpro_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = climpro_api_rest::RestServer<SubmissionFeature>;

// Email
pub type Email = EmailServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Template
pub type Template = TemplateServiceImpl;

// Core
pub type SubmissionFeature = SubmissionFeatureServiceImpl<TemplateEmail>;
