use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The `trace_init` function sets up logging for the application.
///
/// We read the filter from `RUST_LOG` using [`EnvFilter`], falling back to `info` so the results
/// of each exercise show up without any extra setup.  Calling this more than once is harmless:
/// the second subscriber fails to install, and we note that at the `trace` level and move on.
pub fn trace_init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("Subscriber already installed.");
    }
    tracing::trace!("Loading Dawdle...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_init_twice_is_harmless() {
        trace_init();
        trace_init();
    }
}
