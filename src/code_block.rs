//! Syntax-highlighted code blocks.
//!
//! Each grammar is a single regex alternation of named groups, compiled
//! once. Text between matches is emitted escaped and unstyled; matches are
//! wrapped in a span coloured from the active [`Theme`]. An empty or
//! unknown language skips tokenisation but keeps the themed container.

use pulldown_cmark_escape::escape_html;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub comment: &'static str,
    pub red: &'static str,
    pub orange: &'static str,
    pub yellow: &'static str,
    pub green: &'static str,
    pub aqua: &'static str,
    pub blue: &'static str,
    pub purple: &'static str,
}

pub const TOMORROW_NIGHT: Theme = Theme {
    name: "tomorrow-night",
    background: "#1d1f21",
    foreground: "#c5c8c6",
    comment: "#969896",
    red: "#cc6666",
    orange: "#de935f",
    yellow: "#f0c674",
    green: "#b5bd68",
    aqua: "#8abeb7",
    blue: "#81a2be",
    purple: "#b294bb",
};

pub const TOMORROW: Theme = Theme {
    name: "tomorrow",
    background: "#ffffff",
    foreground: "#4d4d4c",
    comment: "#8e908c",
    red: "#c82829",
    orange: "#f5871f",
    yellow: "#eab700",
    green: "#718c00",
    aqua: "#3e999f",
    blue: "#4271ae",
    purple: "#8959a8",
};

impl Theme {
    pub fn by_name(name: &str) -> Option<Theme> {
        [TOMORROW_NIGHT, TOMORROW]
            .into_iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
    }

    fn color(&self, kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::Comment => self.comment,
            TokenKind::String => self.green,
            TokenKind::Number | TokenKind::Literal => self.orange,
            TokenKind::Keyword => self.purple,
            TokenKind::Type => self.blue,
            TokenKind::Meta => self.aqua,
            TokenKind::Variable => self.red,
            TokenKind::Attribute => self.yellow,
        }
    }

    fn container_style(&self) -> String {
        format!(
            "display: block; overflow-x: auto; padding: 0.5em; background: {}; color: {};",
            self.background, self.foreground
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        TOMORROW_NIGHT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Comment,
    String,
    Number,
    Keyword,
    Literal,
    Type,
    Meta,
    Variable,
    Attribute,
}

impl TokenKind {
    const ALL: [TokenKind; 9] = [
        TokenKind::Comment,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::Keyword,
        TokenKind::Literal,
        TokenKind::Type,
        TokenKind::Meta,
        TokenKind::Variable,
        TokenKind::Attribute,
    ];

    fn group(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Keyword => "keyword",
            TokenKind::Literal => "literal",
            TokenKind::Type => "type",
            TokenKind::Meta => "meta",
            TokenKind::Variable => "variable",
            TokenKind::Attribute => "attribute",
        }
    }
}

const C_COMMENT: &str = r"//[^\n]*|/\*[\s\S]*?\*/";
const HASH_COMMENT: &str = r"#[^\n]*";
const DQ_STRING: &str = r#""(?:\\.|[^"\\\n])*""#;
const SQ_STRING: &str = r"'(?:\\.|[^'\\\n])*'";
const NUMBER: &str = r"\b(?:0[xX][0-9a-fA-F_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?)\b";
const CAPITALIZED: &str = r"\b[A-Z][A-Za-z0-9_]*\b";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Grammar {
    Rust,
    JavaScript,
    Python,
    Shell,
    Json,
}

impl Grammar {
    fn for_language(language: &str) -> Option<Grammar> {
        match language.trim().to_ascii_lowercase().as_str() {
            "rust" | "rs" => Some(Grammar::Rust),
            "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => Some(Grammar::JavaScript),
            "python" | "py" => Some(Grammar::Python),
            "shell" | "sh" | "bash" | "zsh" | "console" => Some(Grammar::Shell),
            "json" => Some(Grammar::Json),
            _ => None,
        }
    }

    fn rules(self) -> Vec<(TokenKind, String)> {
        use TokenKind as K;
        match self {
            Grammar::Rust => vec![
                (K::Comment, C_COMMENT.to_string()),
                (K::String, format!(r"{DQ_STRING}|'(?:\\.|[^'\\\n])'")),
                (K::Meta, r"#!?\[[^\]\n]*\]|\b[a-z_][a-z0-9_]*!".to_string()),
                (K::Keyword, keywords(&[
                    "as", "async", "await", "break", "const", "continue", "crate", "dyn",
                    "else", "enum", "extern", "fn", "for", "if", "impl", "in", "let", "loop",
                    "match", "mod", "move", "mut", "pub", "ref", "return", "self", "static",
                    "struct", "super", "trait", "type", "unsafe", "use", "where", "while",
                ])),
                (K::Literal, keywords(&["true", "false", "None", "Some", "Ok", "Err"])),
                (K::Type, CAPITALIZED.to_string()),
                (K::Number, NUMBER.to_string()),
            ],
            Grammar::JavaScript => vec![
                (K::Comment, C_COMMENT.to_string()),
                (K::String, format!(r"{DQ_STRING}|{SQ_STRING}|`(?:\\.|[^`\\])*`")),
                (K::Keyword, keywords(&[
                    "async", "await", "break", "case", "catch", "class", "const", "continue",
                    "default", "delete", "do", "else", "export", "extends", "finally", "for",
                    "from", "function", "if", "import", "in", "instanceof", "interface",
                    "let", "new", "of", "return", "static", "super", "switch", "this",
                    "throw", "try", "type", "typeof", "var", "void", "while", "yield",
                ])),
                (K::Literal, keywords(&["true", "false", "null", "undefined", "NaN"])),
                (K::Type, CAPITALIZED.to_string()),
                (K::Number, NUMBER.to_string()),
            ],
            Grammar::Python => vec![
                (K::Comment, HASH_COMMENT.to_string()),
                (
                    K::String,
                    format!(r#""""[\s\S]*?"""|'''[\s\S]*?'''|{DQ_STRING}|{SQ_STRING}"#),
                ),
                (K::Meta, r"@[A-Za-z_][\w.]*".to_string()),
                (K::Keyword, keywords(&[
                    "and", "as", "assert", "async", "await", "break", "class", "continue",
                    "def", "del", "elif", "else", "except", "finally", "for", "from",
                    "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or",
                    "pass", "raise", "return", "try", "while", "with", "yield",
                ])),
                (K::Literal, keywords(&["True", "False", "None", "self"])),
                (K::Number, NUMBER.to_string()),
            ],
            Grammar::Shell => vec![
                (K::Variable, r"\$\{[^}\n]*\}|\$[A-Za-z_][A-Za-z0-9_]*|\$[0-9@#?*$!]".to_string()),
                (K::Comment, HASH_COMMENT.to_string()),
                (K::String, format!("{DQ_STRING}|{SQ_STRING}")),
                (K::Keyword, keywords(&[
                    "if", "then", "else", "elif", "fi", "for", "in", "do", "done", "case",
                    "esac", "while", "until", "function", "return", "export", "local",
                ])),
            ],
            Grammar::Json => vec![
                (K::Attribute, format!(r"{DQ_STRING}\s*:")),
                (K::String, DQ_STRING.to_string()),
                (K::Literal, keywords(&["true", "false", "null"])),
                (K::Number, r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b".to_string()),
            ],
        }
    }

    fn regex(self) -> &'static Regex {
        static RUST: OnceLock<Regex> = OnceLock::new();
        static JAVASCRIPT: OnceLock<Regex> = OnceLock::new();
        static PYTHON: OnceLock<Regex> = OnceLock::new();
        static SHELL: OnceLock<Regex> = OnceLock::new();
        static JSON: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            Grammar::Rust => &RUST,
            Grammar::JavaScript => &JAVASCRIPT,
            Grammar::Python => &PYTHON,
            Grammar::Shell => &SHELL,
            Grammar::Json => &JSON,
        };
        cell.get_or_init(|| {
            let pattern = self
                .rules()
                .into_iter()
                .map(|(kind, rule)| format!("(?P<{}>{})", kind.group(), rule))
                .collect::<Vec<_>>()
                .join("|");
            // The rule tables are fixed; a bad pattern is a programming error.
            Regex::new(&pattern).unwrap()
        })
    }
}

fn keywords(words: &[&str]) -> String {
    format!(r"\b(?:{})\b", words.join("|"))
}

fn push_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = escape_html(&mut *out, text);
}

fn highlight(grammar: Grammar, theme: &Theme, code: &str) -> String {
    let mut html = String::with_capacity(code.len() * 2);
    let mut last = 0;
    for caps in grammar.regex().captures_iter(code) {
        let Some((kind, token)) = TokenKind::ALL
            .into_iter()
            .find_map(|kind| caps.name(kind.group()).map(|m| (kind, m)))
        else {
            continue;
        };
        push_escaped(&mut html, &code[last..token.start()]);
        html.push_str("<span style=\"color: ");
        html.push_str(theme.color(kind));
        html.push_str(";\">");
        push_escaped(&mut html, token.as_str());
        html.push_str("</span>");
        last = token.end();
    }
    push_escaped(&mut html, &code[last..]);
    html
}

/// Renders fenced code with a fixed theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodeBlockRenderer {
    theme: Theme,
}

impl CodeBlockRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, language: &str, value: &str) -> String {
        let language = language.trim();
        let body = match Grammar::for_language(language) {
            Some(grammar) => highlight(grammar, &self.theme, value),
            None => {
                if !language.is_empty() {
                    log::debug!("no grammar for `{language}`, rendering plain");
                }
                let mut plain = String::with_capacity(value.len());
                push_escaped(&mut plain, value);
                plain
            }
        };
        let mut html = String::with_capacity(body.len() + 160);
        html.push_str("<pre class=\"code-block\" data-language=\"");
        push_escaped(&mut html, language);
        html.push_str("\" style=\"");
        html.push_str(&self.theme.container_style());
        html.push_str("\"><code>");
        html.push_str(&body);
        html.push_str("</code></pre>");
        html
    }
}
