//! Builder pattern for constructing tool responses.

use super::types::{ContentItem, FileContent, ToolResult};

/// Builder for constructing ToolResult with fluent API.
#[derive(Debug, Default)]
pub struct ContentBuilder {
    items: Vec<ContentItem>,
    is_error: bool,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, message: impl Into<String>) -> Self {
        self.items.push(ContentItem::text(message));
        self
    }

    pub fn file_content(mut self, file: FileContent) -> Self {
        self.items.push(ContentItem::from_file_content(file));
        self
    }

    /// Add a rendered HTML page.
    pub fn html(self, page: &str, filename: &str) -> Self {
        self.file_content(FileContent::html(filename, page))
    }

    /// Mark this result as an error.
    pub fn error(mut self) -> Self {
        self.is_error = true;
        self
    }

    pub fn build(self) -> ToolResult {
        ToolResult {
            content: self.items,
            is_error: self.is_error,
        }
    }
}
