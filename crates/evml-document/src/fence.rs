//! Extraction of diagram sources from fenced code blocks.
//!
//! Hosts hand the body of every fenced block tagged with the diagram
//! language to the pipeline. This module finds those blocks in a Markdown
//! document with a CommonMark parser, so container prefixes (block quotes,
//! list items) and fence indentation are stripped from the body exactly as
//! a Markdown renderer strips them.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Language identifier of diagram blocks.
pub const LANGUAGE: &str = "evml";

/// A fenced block whose info string names the requested language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    body: String,
    line: usize,
}

impl CodeBlock {
    /// Returns the block body without its fences.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the 1-based line number of the opening fence.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Returns every fenced block in `markdown` tagged with `language`, in
/// document order.
///
/// The body carries no trailing line break. An unclosed block runs to the
/// end of its container.
///
/// # Example
///
/// ```
/// # use evml_document::fence::extract_blocks;
/// let markdown = "# Orders\n\n```evml\nslice Checkout\n```\n";
/// let blocks = extract_blocks(markdown, "evml");
///
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].body(), "slice Checkout");
/// assert_eq!(blocks[0].line(), 3);
/// ```
pub fn extract_blocks(markdown: &str, language: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<CodeBlock> = None;

    for (event, range) in Parser::new_ext(markdown, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                if info.split_whitespace().next() == Some(language) {
                    open = Some(CodeBlock {
                        body: String::new(),
                        line: line_of(markdown, range.start),
                    });
                }
            }
            Event::Text(text) => {
                if let Some(block) = open.as_mut() {
                    block.body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(mut block) = open.take() {
                    if block.body.ends_with('\n') {
                        block.body.pop();
                    }
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }

    blocks
}

fn line_of(markdown: &str, offset: usize) -> usize {
    markdown[..offset].matches('\n').count() + 1
}
