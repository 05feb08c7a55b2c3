//! Markdown note pages.
//!
//! Notes are operator-authored and trusted: raw HTML inside a note is passed
//! through unescaped. Do not feed visitor-supplied text through this
//! renderer.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use std::sync::Arc;

use crate::code_block::CodeBlockRenderer;

const PAGE_STYLE: &str = "padding: 10px 20px 0;";

/// Converts a note's raw text into page markup.
pub trait PageRenderer: Send + Sync {
    fn render(&self, content: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    code_blocks: CodeBlockRenderer,
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(CodeBlockRenderer::default())
    }
}

impl MarkdownRenderer {
    pub fn new(code_blocks: CodeBlockRenderer) -> Self {
        Self {
            code_blocks,
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    pub fn to_html(&self, content: &str) -> String {
        let mut events = Vec::new();
        let mut code: Option<(String, String)> = None;

        for event in Parser::new_ext(content, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code = Some((fence_language(&kind).to_string(), String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, text)) = code.take() {
                        let value = text.strip_suffix('\n').unwrap_or(&text);
                        let rendered = self.code_blocks.render(&language, value);
                        events.push(Event::Html(rendered.into()));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, buf)) = code.as_mut() {
                        buf.push_str(&text);
                    }
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

impl PageRenderer for MarkdownRenderer {
    fn render(&self, content: &str) -> String {
        format!(
            "<div class=\"content\" style=\"{PAGE_STYLE}\">{}</div>",
            self.to_html(content)
        )
    }
}

/// First word of a fence's info string; indented blocks have no language.
fn fence_language<'a>(kind: &'a CodeBlockKind<'_>) -> &'a str {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',')
            .next()
            .unwrap_or(""),
        CodeBlockKind::Indented => "",
    }
}

/// Wraps `content` in a deferred producer; no conversion happens until the
/// returned closure is called.
pub fn build_markdown_page<R>(
    renderer: Arc<R>,
    content: Arc<str>,
) -> impl Fn() -> String + Send + Sync + 'static
where
    R: PageRenderer + ?Sized + 'static,
{
    move || renderer.render(&content)
}
