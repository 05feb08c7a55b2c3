use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to parse {file}: {message}")]
    Parse { file: &'static str, message: String },

    #[error("note `{route}` in category `{category}` refers to unknown source `{note_file}`")]
    MissingNoteSource {
        category: String,
        route: String,
        note_file: String,
    },

    #[error("category `{category}` declares `{path}` more than once")]
    DuplicateRoute { category: String, path: String },

    #[error("base path `{path}` is used by more than one category")]
    DuplicateBasePath { path: String },

    #[error("category `{category}` cannot live at `/`, which is the index page")]
    RootBasePath { category: String },

    #[error("unsupported log level `{value}`")]
    InvalidLogLevel { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigError::MissingNoteSource {
            category: "Designs".to_string(),
            route: "x".to_string(),
            note_file: "missing.md".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "note `x` in category `Designs` refers to unknown source `missing.md`"
        );
        assert_eq!(
            ConfigError::RootBasePath {
                category: "All".to_string()
            }
            .to_string(),
            "category `All` cannot live at `/`, which is the index page"
        );
    }
}
