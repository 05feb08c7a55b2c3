//! Read-only viewer for meeting and design notes.
//!
//! A client-side rendered Leptos application. Notes are markdown files
//! embedded at build time and grouped into categories by
//! `content/catalog.json`.

mod app;
mod catalog;
mod category;
mod code_block;
mod config;
mod error;
mod logging;
mod markdown;
mod navigation;
mod routing;

use app::App;
use catalog::Catalog;
use config::SiteConfig;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    let site = SiteConfig::shared();
    match site.level_filter() {
        Ok(level) => logging::init(level),
        Err(e) => log::warn!("{e}; keeping info"),
    }

    let catalog = Catalog::shared();
    log::info!(
        "{}: {} categories, {} notes",
        site.brand,
        catalog.categories.len(),
        catalog.note_count()
    );

    leptos::mount::mount_to_body(App);
}
