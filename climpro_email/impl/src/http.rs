use std::{ops::Deref, sync::LazyLock, time::Duration};

use anyhow::Context;
use climpro_utils::climpro_version;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = climpro_version();

    format!("Climpro Backend ({homepage}, Version {version})")
});

const _: () = assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .timeout(timeout)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
