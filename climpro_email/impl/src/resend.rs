use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context};
use climpro_email_contracts::{ContentType, Email, EmailService};
use climpro_models::email_address::EmailAddressWithName;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

pub const DEFAULT_ENDPOINT: &str = "https://api.resend.com";

/// Delivers emails through the HTTP API of [Resend](https://resend.com/docs/api-reference/emails/send-email).
#[derive(Debug, Clone)]
pub struct ResendEmailService {
    from: Arc<str>,
    api_key: Arc<str>,
    endpoint: Arc<Url>,
    emails_endpoint: Arc<Url>,
    client: HttpClient,
}

impl ResendEmailService {
    pub fn new(
        api_key: &str,
        endpoint_override: Option<Url>,
        from: &EmailAddressWithName,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => DEFAULT_ENDPOINT.parse()?,
        };

        let mut emails_endpoint = endpoint.clone();
        emails_endpoint
            .path_segments_mut()
            .map_err(|()| anyhow!("Invalid resend endpoint {endpoint}"))?
            .pop_if_empty()
            .push("emails");

        Ok(Self {
            from: from.to_string().into(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            emails_endpoint: emails_endpoint.into(),
            client: HttpClient::new(timeout)?,
        })
    }
}

impl EmailService for ResendEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: &self.from,
            to: email.recipients.iter().map(ToString::to_string).collect(),
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_ref().map(ToString::to_string),
        };

        let response = self
            .client
            .post((*self.emails_endpoint).clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to resend")?;

        let status = response.status();
        if status.is_success() {
            let id = response
                .json::<SendEmailResponse>()
                .await
                .ok()
                .map(|response| response.id);
            debug!(?id, "email accepted by resend");
            Ok(true)
        } else if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "email rejected by resend");
            Ok(false)
        } else {
            bail!("Resend responded with status {status}")
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let status = self
            .client
            .get((*self.endpoint).clone())
            .send()
            .await
            .context("Failed to reach resend")?
            .status();

        if status.is_server_error() {
            bail!("Resend responded with status {status}");
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<String>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn emails_endpoint() {
        for (endpoint, expected) in [
            (None, "https://api.resend.com/emails"),
            (Some("http://127.0.0.1:8003"), "http://127.0.0.1:8003/emails"),
            (
                Some("http://127.0.0.1:8003/resend/"),
                "http://127.0.0.1:8003/resend/emails",
            ),
            (
                Some("http://127.0.0.1:8003/resend"),
                "http://127.0.0.1:8003/resend/emails",
            ),
        ] {
            let sut = ResendEmailService::new(
                "re_123",
                endpoint.map(|x| x.parse().unwrap()),
                &"info@climpro.be".parse().unwrap(),
                Duration::from_secs(10),
            )
            .unwrap();

            assert_eq!(sut.emails_endpoint.as_str(), expected);
        }
    }
}
