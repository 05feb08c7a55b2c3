//! Static note data: which categories exist and which notes they hold.
//!
//! `content/catalog.json` lists categories and notes; each note names one of
//! the markdown files embedded in [`NOTE_SOURCES`].

use serde::Deserialize;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use crate::error::ConfigError;
use crate::routing::{join_path, normalize_path};

const CATALOG_JSON: &str = include_str!("../content/catalog.json");

const NOTE_SOURCES: &[(&str, &str)] = &[
    (
        "meetings/kickoff.md",
        include_str!("../content/meetings/kickoff.md"),
    ),
    (
        "meetings/weekly-sync.md",
        include_str!("../content/meetings/weekly-sync.md"),
    ),
    (
        "meetings/retrospective.md",
        include_str!("../content/meetings/retrospective.md"),
    ),
    (
        "designs/routing.md",
        include_str!("../content/designs/routing.md"),
    ),
    (
        "designs/markdown-pipeline.md",
        include_str!("../content/designs/markdown-pipeline.md"),
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub route: String,
    pub title: String,
    pub content: Arc<str>,
}

impl Note {
    pub fn new(route: &str, title: &str, content: &str) -> Self {
        Self {
            route: route.to_string(),
            title: title.to_string(),
            content: Arc::from(content),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub base_path: String,
    pub notes: Vec<Note>,
}

impl Category {
    pub fn new(label: &str, base_path: &str, notes: Vec<Note>) -> Self {
        Self {
            label: label.to_string(),
            base_path: base_path.to_string(),
            notes,
        }
    }

    /// The base path as used in links and route patterns.
    pub fn href(&self) -> String {
        normalize_path(&self.base_path)
    }

    pub fn note_path(&self, note: &Note) -> String {
        join_path(&self.base_path, &note.route)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Deserialize)]
struct CategoryEntry {
    label: String,
    base_path: String,
    #[serde(default)]
    notes: Vec<NoteEntry>,
}

#[derive(Deserialize)]
struct NoteEntry {
    route: String,
    title: String,
    source: String,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses a catalog, resolving each note's `source` against `sources`.
    pub fn from_json(json: &str, sources: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            file: "catalog.json",
            message: e.to_string(),
        })?;

        let mut categories = Vec::with_capacity(file.categories.len());
        for entry in file.categories {
            let mut notes = Vec::with_capacity(entry.notes.len());
            for note in entry.notes {
                let content = sources
                    .iter()
                    .find(|(name, _)| *name == note.source)
                    .map(|(_, text)| *text)
                    .ok_or_else(|| ConfigError::MissingNoteSource {
                        category: entry.label.clone(),
                        route: note.route.clone(),
                        note_file: note.source.clone(),
                    })?;
                notes.push(Note::new(&note.route, &note.title, content));
            }
            categories.push(Category::new(&entry.label, &entry.base_path, notes));
        }
        Self::new(categories)
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(CATALOG_JSON, NOTE_SOURCES)
    }

    /// The embedded catalog, loaded on first use.
    ///
    /// A catalog that fails to load is logged and replaced by an empty one.
    pub fn shared() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| match Self::embedded() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("{e}; starting with an empty catalog");
                Catalog::default()
            }
        })
    }

    pub fn note_count(&self) -> usize {
        self.categories.iter().map(|c| c.notes.len()).sum()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut bases = HashSet::new();
        for category in &self.categories {
            if category.href() == "/" {
                return Err(ConfigError::RootBasePath {
                    category: category.label.clone(),
                });
            }
            if !bases.insert(category.href()) {
                return Err(ConfigError::DuplicateBasePath {
                    path: category.href(),
                });
            }
            let mut paths = HashSet::new();
            for note in &category.notes {
                let path = category.note_path(note);
                if !paths.insert(path.clone()) {
                    return Err(ConfigError::DuplicateRoute {
                        category: category.label.clone(),
                        path,
                    });
                }
            }
        }
        Ok(())
    }
}
