use tracing_subscriber::EnvFilter;

/// Install a console subscriber for hosts that don't bring their own.
/// `RUST_LOG` overrides `default_level`. Calling this more than once is a
/// no-op.
pub fn init(default_level: &str) {
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .try_init();
}
