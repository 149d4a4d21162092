#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Installs a stderr subscriber. `RUST_LOG` wins over `default_filter`;
/// `json` switches to one JSON object per line.
#[cfg(feature = "trace")]
pub fn init_tracing(default_filter: &str, json: bool) {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter);
        if json {
            builder.json().init();
        } else {
            builder.init();
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_default_filter: &str, _json: bool) {}
