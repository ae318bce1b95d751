use climpro_config::SentryConfig;
use climpro_utils::climpro_version;
use sentry::{integrations::tracing::EventFilter, ClientInitGuard};
use tracing::{Level, Metadata};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log to stderr (filtered by `RUST_LOG`) and forward events to sentry.
pub fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .with(sentry::integrations::tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// The returned guard flushes pending events when dropped.
pub fn init_sentry(config: Option<&SentryConfig>) -> Option<ClientInitGuard> {
    let config = config?;
    Some(sentry::init((
        config.dsn.as_str(),
        sentry::ClientOptions {
            release: Some(climpro_version().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    )))
}

fn sentry_event_filter(meta: &Metadata<'_>) -> EventFilter {
    match *meta.level() {
        Level::ERROR => EventFilter::Exception,
        Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        Level::TRACE => EventFilter::Ignore,
    }
}
