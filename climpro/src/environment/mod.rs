use std::sync::Arc;

use climpro_api_rest::{RealIpConfig, RestServerConfig};
use climpro_config::Config;
use climpro_core_submission_impl::SubmissionFeatureConfig;
use climpro_di::provider;
use climpro_models::business::BusinessDetails;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Core
            SubmissionFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Core
        submission_feature_config: SubmissionFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig::new(
            config.http.real_ip.as_ref().map(|real_ip| RealIpConfig {
                header: real_ip.header.clone(),
                set_from: real_ip.set_from,
            }),
            &config.http.allowed_origins,
        )?;

        // Core
        let submission_feature_config = SubmissionFeatureConfig {
            recipients: Arc::new(config.submission.recipients.clone()),
            business: Arc::new(BusinessDetails::from(config.business.clone())),
        };

        Ok(Self {
            cache: Default::default(),

            // API
            rest_server_config,

            // Core
            submission_feature_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use climpro_di::Provide;
    use climpro_email_impl::SmtpEmailService;
    use types::RestServer;

    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let config = climpro_config::load_paths(&[climpro_config::DEFAULT_CONFIG_PATH]).unwrap();
        let config_provider = ConfigProvider::new(&config).unwrap();

        let email = SmtpEmailService::new(
            "smtp://127.0.0.1:1025",
            &config.email.from,
            config.email.timeout.into(),
        )
        .unwrap();

        let mut provider = Provider::new(config_provider, email.into());
        let _: RestServer = provider.provide();
    }
}
