//! Global tracing installation behind an `EnvFilter`.
//!
//! Separate from `tracing_bridge.rs` because each binary can install only one
//! global subscriber.

#![cfg(feature = "tracing")]

use std::sync::Arc;

use sevlog::{MemorySink, SyncDispatcher, init_tracing_with_filter};
use tracing_subscriber::EnvFilter;

#[test]
fn filter_layer_runs_before_the_dispatcher() {
    let dispatcher = Arc::new(SyncDispatcher::new(MemorySink::new()));
    dispatcher.set_line_template("[%2$s] %3$s");
    init_tracing_with_filter(Arc::clone(&dispatcher), EnvFilter::new("warn,noisy=off"));

    tracing::info!("below the filter");
    tracing::warn!(target: "noisy", "silenced target");
    tracing::warn!("low disk space");

    dispatcher.with(|dispatcher| {
        let lines: Vec<_> = dispatcher.sink().lines().collect();
        assert_eq!(lines, ["<warning>[WARNING] low disk space</warning>"]);
    });
}
