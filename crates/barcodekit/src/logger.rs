//! Global `tracing` subscriber setup.

use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

fn derive_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "barcodekit=debug,barcodekit_frame=debug,barcodekit_io_pdf=debug,barcodekit_io_xlsx=debug,info"
        } else {
            "barcodekit=info,barcodekit_frame=info,barcodekit_io_pdf=info,barcodekit_io_xlsx=info,warn"
        })
    })
}

fn derive_fmt_layer() -> impl Layer<Registry> + Send + Sync {
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
}

/// Install the global compact subscriber. `RUST_LOG` overrides the default filter.
///
/// Panics if a global subscriber is already set; see [`try_init_logger`].
pub fn init_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(derive_fmt_layer().with_filter(derive_env_filter(verbose)))
        .init();
}

/// Like [`init_logger`], but returns `false` when a subscriber is already installed.
pub fn try_init_logger(verbose: bool) -> bool {
    tracing_subscriber::registry()
        .with(derive_fmt_layer().with_filter(derive_env_filter(verbose)))
        .try_init()
        .is_ok()
}
