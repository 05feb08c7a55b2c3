//! Console logging for the viewer.
//!
//! On `wasm32` records go to the browser console through `console_log`.
//! `init` may be called more than once; only the first call installs the
//! backend, later calls just adjust the max level.

use log::LevelFilter;
use std::sync::OnceLock;

static INSTALLED: OnceLock<()> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn install() {
    // Err only means another logger is already installed.
    let _ = console_log::init_with_level(log::Level::Trace);
}

// Native builds (tests) only use the level filter.
#[cfg(not(target_arch = "wasm32"))]
fn install() {}

pub fn init(level: LevelFilter) {
    INSTALLED.get_or_init(install);
    log::set_max_level(level);
}
