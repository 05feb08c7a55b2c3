//! URL path handling and route tables.
//!
//! A [`RouteTable`] maps normalised paths to deferred producers. Nothing is
//! produced while the table is built; `render` invokes only the producer of
//! the first entry matching the requested path.

use std::fmt;
use std::sync::Arc;

/// Zero-argument callable that does its work only when invoked.
pub type Producer<V> = Arc<dyn Fn() -> V + Send + Sync>;

pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Joins a base path and a route segment with exactly one `/` between them.
pub fn join_path(base: &str, route: &str) -> String {
    normalize_path(&format!("{base}/{route}"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    /// Matches the path itself and anything below it on a segment boundary.
    Prefix,
}

impl MatchMode {
    fn matches(self, pattern: &str, path: &str) -> bool {
        match self {
            MatchMode::Exact => pattern == path,
            MatchMode::Prefix => {
                if pattern == "/" {
                    return true;
                }
                path.strip_prefix(pattern)
                    .map(|rest| rest.is_empty() || rest.starts_with('/'))
                    .unwrap_or(false)
            }
        }
    }
}

pub struct RouteEntry<V> {
    pub path: String,
    pub mode: MatchMode,
    producer: Producer<V>,
}

impl<V> RouteEntry<V> {
    pub fn produce(&self) -> V {
        (self.producer)()
    }
}

impl<V> Clone for RouteEntry<V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            mode: self.mode,
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<V> fmt::Debug for RouteEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> Clone for RouteTable<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<V> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

impl<V> RouteTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        path: &str,
        mode: MatchMode,
        producer: impl Fn() -> V + Send + Sync + 'static,
    ) {
        self.entries.push(RouteEntry {
            path: normalize_path(path),
            mode,
            producer: Arc::new(producer),
        });
    }

    pub fn with(
        mut self,
        path: &str,
        mode: MatchMode,
        producer: impl Fn() -> V + Send + Sync + 'static,
    ) -> Self {
        self.insert(path, mode, producer);
        self
    }

    pub fn entries(&self) -> &[RouteEntry<V>] {
        &self.entries
    }

    /// First entry, in insertion order, whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry<V>> {
        let path = normalize_path(path);
        self.entries
            .iter()
            .find(|entry| entry.mode.matches(&entry.path, &path))
    }

    /// Produces the content for `path`, or `None` when nothing matches.
    pub fn render(&self, path: &str) -> Option<V> {
        match self.resolve(path) {
            Some(entry) => Some(entry.produce()),
            None => {
                log::debug!("no route for `{path}`");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn normalizes_paths() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("meetings"), "/meetings");
        assert_eq!(normalize_path("/meetings/"), "/meetings");
        assert_eq!(normalize_path("//meetings///kickoff/"), "/meetings/kickoff");
    }

    #[test]
    fn joins_base_and_route() {
        assert_eq!(join_path("/meetings/", "/kickoff"), "/meetings/kickoff");
        assert_eq!(join_path("/meetings", "kickoff"), "/meetings/kickoff");
        assert_eq!(join_path("/designs/", ""), "/designs");
    }

    #[test]
    fn prefix_matches_on_segment_boundary() {
        let table = RouteTable::new().with("/meetings", MatchMode::Prefix, || "meetings");
        assert_eq!(table.render("/meetings"), Some("meetings"));
        assert_eq!(table.render("/meetings/kickoff"), Some("meetings"));
        assert_eq!(table.render("/meetingsx"), None);
    }

    #[test]
    fn exact_route_ignores_trailing_slash() {
        let table = RouteTable::new().with("/", MatchMode::Exact, || "index");
        assert_eq!(table.render("/"), Some("index"));
        assert_eq!(table.render(""), Some("index"));
        assert_eq!(table.render("/meetings"), None);
    }

    #[test]
    fn unknown_path_renders_nothing() {
        let table = RouteTable::new()
            .with("/", MatchMode::Exact, || 0)
            .with("/designs", MatchMode::Prefix, || 1);
        assert_eq!(table.render("/unknown"), None);
    }

    #[test]
    fn first_matching_entry_wins() {
        let table = RouteTable::new()
            .with("/a", MatchMode::Exact, || "first")
            .with("/a/", MatchMode::Exact, || "second");
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.render("/a"), Some("first"));
    }

    #[test]
    fn producers_run_only_on_render() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut table = RouteTable::new();
        for path in ["/a", "/b", "/c"] {
            let calls = Arc::clone(&calls);
            table.insert(path, MatchMode::Exact, move || {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(table.resolve("/b").is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        table.render("/b");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
