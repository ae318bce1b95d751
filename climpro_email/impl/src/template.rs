use climpro_di::Build;
use climpro_email_contracts::{template::TemplateEmailService, ContentType, Email, EmailService};
use climpro_models::email_address::EmailAddressWithName;
use climpro_templates_contracts::{
    SubmissionAcknowledgmentTemplate, SubmissionNotificationTemplate, Template, TemplateService,
};

#[derive(Debug, Clone, Build)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<EmailS, Template> TemplateEmailService for TemplateEmailServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_submission_notification(
        &self,
        recipients: Vec<EmailAddressWithName>,
        subject: String,
        reply_to: Option<EmailAddressWithName>,
        data: &SubmissionNotificationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(recipients, subject, reply_to, data).await
    }

    async fn send_submission_acknowledgment(
        &self,
        recipient: EmailAddressWithName,
        subject: String,
        data: &SubmissionAcknowledgmentTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(vec![recipient], subject, None, data).await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipients: Vec<EmailAddressWithName>,
        subject: String,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipients,
                subject,
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}
