use anyhow::Context;
use climpro_config::Config;
use climpro_di::Provide;
use climpro_email_contracts::EmailService;
use climpro_email_impl::EmailServiceImpl;
use tracing::info;

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;
    match &email {
        EmailServiceImpl::Smtp(_) => info!("Connecting to smtp server"),
        EmailServiceImpl::Resend(_) => info!("Connecting to resend api"),
    }
    email
        .ping()
        .await
        .context("Failed to reach the email delivery service")?;

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
