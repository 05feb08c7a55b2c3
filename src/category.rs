use leptos::prelude::*;
use leptos_router::hooks::use_location;
use std::sync::Arc;

use crate::catalog::Category;
use crate::markdown::{build_markdown_page, MarkdownRenderer, PageRenderer};
use crate::routing::{normalize_path, MatchMode, RouteTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuLink {
    pub href: String,
    pub label: String,
}

/// One link per note, in catalog order. Duplicates are kept as given.
pub fn build_menu(category: &Category) -> Vec<MenuLink> {
    category
        .notes
        .iter()
        .map(|note| MenuLink {
            href: category.note_path(note),
            label: note.title.clone(),
        })
        .collect()
}

/// One prefix route per note, each holding a deferred markdown page.
///
/// Paths below a note (`/meetings/kickoff/extra`) still show that note.
pub fn build_routes<R>(category: &Category, renderer: Arc<R>) -> RouteTable<String>
where
    R: PageRenderer + ?Sized + 'static,
{
    let mut table = RouteTable::new();
    for note in &category.notes {
        let path = category.note_path(note);
        let page = build_markdown_page(Arc::clone(&renderer), Arc::clone(&note.content));
        let label = path.clone();
        table.insert(&path, MatchMode::Prefix, move || {
            log::debug!("rendering {label}");
            page()
        });
    }
    table
}

#[component]
pub fn CategoryView(
    category: &'static Category,
    menu_label: String,
    renderer: Arc<MarkdownRenderer>,
) -> impl IntoView {
    let routes = build_routes(category, renderer);
    let pathname = use_location().pathname;

    let links = build_menu(category)
        .into_iter()
        .map(|link| {
            let target = link.href.clone();
            let class = move || {
                if normalize_path(&pathname.get()) == target {
                    "is-active"
                } else {
                    ""
                }
            };
            view! {
                <li>
                    <a href=link.href class=class>{link.label}</a>
                </li>
            }
        })
        .collect::<Vec<_>>();

    let page = move || routes.render(&pathname.get()).unwrap_or_default();

    view! {
        <div class="columns">
            <div class="column is-narrow" style="width: 200px;">
                <aside class="menu" style="padding: 10px 20px 0 10px;">
                    <p class="menu-label">{menu_label}</p>
                    <ul class="menu-list">{links}</ul>
                </aside>
            </div>
            <div class="column" inner_html=page></div>
            <div class="column is-narrow is-hidden-touch" style="width: 200px;"></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Note;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl PageRenderer for Counting {
        fn render(&self, content: &str) -> String {
            self.0.fetch_add(1, Ordering::SeqCst);
            format!("page:{content}")
        }
    }

    fn meetings() -> Category {
        Category::new(
            "Meetings",
            "/meetings/",
            vec![
                Note::new("/kickoff", "Kickoff", "# Hi"),
                Note::new("/sync", "Sync", "weekly"),
                Note::new("/retro", "Retro", "looking back"),
            ],
        )
    }

    #[test]
    fn menu_preserves_note_order() {
        let labels: Vec<_> = build_menu(&meetings())
            .into_iter()
            .map(|link| link.label)
            .collect();
        assert_eq!(labels, ["Kickoff", "Sync", "Retro"]);
    }

    #[test]
    fn kickoff_scenario() {
        let category = Category::new(
            "Meetings",
            "/meetings/",
            vec![Note::new("/kickoff", "Kickoff", "# Hi")],
        );
        assert_eq!(
            build_menu(&category),
            vec![MenuLink {
                href: "/meetings/kickoff".to_string(),
                label: "Kickoff".to_string(),
            }]
        );

        let routes = build_routes(&category, Arc::new(MarkdownRenderer::default()));
        let page = routes.render("/meetings/kickoff").unwrap();
        assert!(page.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn routes_are_keyed_by_full_path_and_isolated() {
        let category = meetings();
        let routes = build_routes(&category, Arc::new(Counting(AtomicUsize::new(0))));
        let paths: Vec<_> = routes.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["/meetings/kickoff", "/meetings/sync", "/meetings/retro"]);

        for note in &category.notes {
            let page = routes.render(&category.note_path(note)).unwrap();
            assert_eq!(page, format!("page:{}", note.content));
        }
    }

    #[test]
    fn conversion_waits_for_navigation() {
        let renderer = Arc::new(Counting(AtomicUsize::new(0)));
        let routes = build_routes(&meetings(), Arc::clone(&renderer));
        assert_eq!(routes.entries().len(), 3);
        assert_eq!(renderer.0.load(Ordering::SeqCst), 0);

        routes.render("/meetings/sync");
        assert_eq!(renderer.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_paths_leave_content_empty() {
        let renderer = Arc::new(Counting(AtomicUsize::new(0)));
        let routes = build_routes(&meetings(), Arc::clone(&renderer));
        assert_eq!(routes.render("/unknown"), None);
        assert_eq!(routes.render("/meetings"), None);
        assert_eq!(routes.render("/meetings/kickoffx"), None);
        assert_eq!(renderer.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn paths_below_a_note_show_that_note() {
        let routes = build_routes(&meetings(), Arc::new(Counting(AtomicUsize::new(0))));
        assert_eq!(
            routes.render("/meetings/kickoff/extra").as_deref(),
            Some("page:# Hi")
        );
        assert_eq!(
            routes.render("/meetings/retro/a/b/").as_deref(),
            Some("page:looking back")
        );
    }

    #[test]
    fn duplicate_routes_resolve_to_first_note() {
        let category = Category::new(
            "Meetings",
            "/meetings",
            vec![Note::new("a", "First", "one"), Note::new("a", "Second", "two")],
        );
        assert_eq!(build_menu(&category).len(), 2);

        let routes = build_routes(&category, Arc::new(Counting(AtomicUsize::new(0))));
        assert_eq!(routes.render("/meetings/a").as_deref(), Some("page:one"));
    }
}
