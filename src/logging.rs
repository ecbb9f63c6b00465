use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::env;

/// Installs the global subscriber. `SCHEDO_LOG` takes an env-filter
/// directive, `SCHEDO_LOG_FORMAT=json` switches to structured output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("SCHEDO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "schedo=debug,info"
        } else {
            "schedo=info,warn"
        })
    });

    let format = env::var("SCHEDO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}
