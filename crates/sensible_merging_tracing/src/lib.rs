use std::sync::atomic::AtomicBool;

use tracing::Level;

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber the first time it is called with `RUST_LOG` set.
///
/// Hosts that already own a subscriber never set `RUST_LOG` for us, so this stays a no-op for them.
pub fn enable_tracing_on_demand() {
  if std::env::var_os("RUST_LOG").is_some() {
    init();
  }
}

pub fn init() {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, std::sync::atomic::Ordering::SeqCst) {
    let _ = tracing_subscriber::registry()
      .with(fmt::layer())
      .with(EnvFilter::from_default_env())
      .with(
        tracing_subscriber::filter::Targets::new()
          .with_targets(vec![("sensible_merging", Level::TRACE)]),
      )
      .try_init();
  }
}
