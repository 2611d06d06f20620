use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging is silent unless `verbose` is set or `RUST_LOG` asks for it.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "off" };
    let app_filter = verbose.then(|| {
        Targets::new()
            .with_target("mxc", LevelFilter::DEBUG)
            .with_target("tower_http", LevelFilter::DEBUG)
    });
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}
