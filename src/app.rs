use leptos::prelude::*;
use leptos_router::components::Router;
use leptos_router::hooks::use_location;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::category::{CategoryView, MenuLink};
use crate::code_block::{CodeBlockRenderer, Theme};
use crate::config::SiteConfig;
use crate::markdown::MarkdownRenderer;
use crate::navigation::NavigationState;
use crate::routing::{MatchMode, RouteTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellPage {
    Index,
    /// Position of the category in the catalog.
    Category(usize),
}

/// `/` exactly for the index, then each category's base path as a prefix.
pub fn shell_routes(catalog: &Catalog) -> RouteTable<ShellPage> {
    let mut table = RouteTable::new().with("/", MatchMode::Exact, || ShellPage::Index);
    for (index, category) in catalog.categories.iter().enumerate() {
        table.insert(&category.href(), MatchMode::Prefix, move || {
            ShellPage::Category(index)
        });
    }
    table
}

pub fn nav_links(catalog: &Catalog) -> Vec<MenuLink> {
    catalog
        .categories
        .iter()
        .map(|category| MenuLink {
            href: category.href(),
            label: category.label.clone(),
        })
        .collect()
}

pub fn page_renderer(site: &SiteConfig) -> MarkdownRenderer {
    let theme = Theme::by_name(&site.theme).unwrap_or_else(|| {
        log::warn!("unknown theme `{}`, using {}", site.theme, Theme::default().name);
        Theme::default()
    });
    MarkdownRenderer::new(CodeBlockRenderer::new(theme))
}

fn note_summary(count: usize) -> String {
    match count {
        0 => "No notes yet".to_string(),
        1 => "1 note".to_string(),
        n => format!("{n} notes"),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let site = SiteConfig::shared();
    let catalog = Catalog::shared();
    let (nav, set_nav) = signal(NavigationState::default());

    let toggle_menu =
        move |explicit: Option<bool>| set_nav.update(|state| state.toggle_menu(explicit));

    let links = nav_links(catalog)
        .into_iter()
        .map(|link| {
            view! { <a class="navbar-item" href=link.href>{link.label}</a> }
        })
        .collect::<Vec<_>>();

    view! {
        <Router>
            <nav class="navbar is-fixed-top is-dark" aria-label="main navigation">
                <div class="navbar-brand">
                    <a class="navbar-item has-text-weight-semibold" href="/">{site.brand.clone()}</a>
                    <div
                        role="button"
                        class=move || nav.get().burger_class()
                        aria-label="menu"
                        aria-expanded=move || nav.get().aria_expanded()
                        on:click=move |_| toggle_menu(None)
                    >
                        <span aria-hidden="true"></span>
                        <span aria-hidden="true"></span>
                        <span aria-hidden="true"></span>
                    </div>
                </div>
                <div class=move || nav.get().menu_class() on:click=move |_| toggle_menu(Some(false))>
                    <div class="navbar-start">{links}</div>
                </div>
            </nav>
            <Show when=move || nav.get().menu_is_active>
                <div class="menu-overlay" on:click=move |_| toggle_menu(Some(false))></div>
            </Show>
            <main class="page">
                <PageOutlet catalog=catalog site=site />
            </main>
        </Router>
    }
}

#[component]
fn PageOutlet(catalog: &'static Catalog, site: &'static SiteConfig) -> impl IntoView {
    let routes = shell_routes(catalog);
    let pathname = use_location().pathname;
    let page = Memo::new(move |_| routes.render(&pathname.get()));
    let renderer = Arc::new(page_renderer(site));

    move || match page.get() {
        Some(ShellPage::Index) => view! {
            <IndexPage catalog=catalog brand=site.brand.clone() />
        }
        .into_any(),
        Some(ShellPage::Category(index)) => match catalog.categories.get(index) {
            Some(category) => view! {
                <CategoryView
                    category=category
                    menu_label=site.menu_label.clone()
                    renderer=Arc::clone(&renderer)
                />
            }
            .into_any(),
            None => ().into_any(),
        },
        None => ().into_any(),
    }
}

#[component]
fn IndexPage(catalog: &'static Catalog, brand: String) -> impl IntoView {
    let cards = catalog
        .categories
        .iter()
        .map(|category| {
            view! {
                <div class="column is-one-third">
                    <a class="box" href=category.href()>
                        <p class="title is-5">{category.label.clone()}</p>
                        <p class="subtitle is-6">{note_summary(category.notes.len())}</p>
                    </a>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <section class="section">
            <h1 class="title">{brand}</h1>
            <div class="columns is-multiline">{cards}</div>
        </section>
    }
}
