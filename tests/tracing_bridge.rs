//! Global tracing installation routed through a shared dispatcher.
//!
//! Lives in its own test binary because a global subscriber can only be
//! installed once per process.

#![cfg(feature = "tracing")]

use std::sync::Arc;

use sevlog::{MemorySink, SyncDispatcher, Verbosity, init_tracing};

#[test]
fn tracing_events_reach_the_dispatcher() {
    let dispatcher = Arc::new(SyncDispatcher::new(MemorySink::new()));
    dispatcher.set_line_template("[%2$s] %3$s");
    init_tracing(Arc::clone(&dispatcher));

    tracing::info!(files = 3_u64, "copied {{files}} files");
    tracing::warn!("low disk space");

    dispatcher
        .set_verbosity("debug", Verbosity::QUIET)
        .expect("integer accepted");

    dispatcher.with(|dispatcher| {
        let lines: Vec<_> = dispatcher.sink().lines().collect();
        assert_eq!(
            lines,
            ["[INFO] copied 3 files", "<warning>[WARNING] low disk space</warning>"]
        );
    });
}
