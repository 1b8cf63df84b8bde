//! Core content types for tool results.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const HTML_MIME: &str = "text/html; charset=utf-8";

/// Metadata for file content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Filename with extension
    pub filename: String,
    /// MIME type (e.g., "text/html")
    pub mime_type: String,
    /// File size in bytes
    pub size_bytes: usize,
    /// Creation timestamp in ISO8601 format
    pub created_at: String,
}

impl FileMetadata {
    /// Create new file metadata with current timestamp.
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: usize,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            size_bytes,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// File content with metadata and base64-encoded data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub metadata: FileMetadata,
    /// Base64-encoded file data
    pub data: String,
}

impl FileContent {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, data: &[u8]) -> Self {
        let filename = filename.into();
        let mime_type = mime_type.into();
        Self {
            metadata: FileMetadata::new(&filename, &mime_type, data.len()),
            data: BASE64.encode(data),
        }
    }

    /// A rendered HTML page.
    pub fn html(filename: impl Into<String>, page: &str) -> Self {
        Self::new(filename, HTML_MIME, page.as_bytes())
    }

    /// The content as a `data:` URL, suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.metadata.mime_type, self.data)
    }
}

/// Content item in a tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64-encoded data (for resource type)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileMetadata>,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: Some(text.into()),
            data: None,
            mime_type: None,
            metadata: None,
        }
    }

    pub fn from_file_content(file: FileContent) -> Self {
        Self {
            content_type: "resource".to_string(),
            text: Some(format!("Berkas dibuat: {}", file.metadata.filename)),
            data: Some(file.data),
            mime_type: Some(file.metadata.mime_type.clone()),
            metadata: Some(file.metadata),
        }
    }

    pub fn is_resource(&self) -> bool {
        self.content_type == "resource"
    }
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: Vec<ContentItem>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: true,
        }
    }

    /// First text item, if any.
    pub fn message(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|item| item.content_type == "text")
            .and_then(|item| item.text.as_deref())
    }

    /// Decoded bytes of the first resource item.
    pub fn resource_bytes(&self) -> Option<Vec<u8>> {
        self.content
            .iter()
            .find(|item| item.is_resource())
            .and_then(|item| item.data.as_deref())
            .and_then(|data| BASE64.decode(data).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_metadata_creation() {
        let metadata = FileMetadata::new("surat.html", HTML_MIME, 1024);
        assert_eq!(metadata.filename, "surat.html");
        assert_eq!(metadata.size_bytes, 1024);
        assert!(!metadata.created_at.is_empty());
    }

    #[test]
    fn test_file_content_html() {
        let file = FileContent::html("surat.html", "<p>Halo</p>");
        assert_eq!(file.metadata.mime_type, HTML_MIME);
        assert_eq!(file.data, "PHA+SGFsbzwvcD4=");
    }

    #[test]
    fn test_data_url() {
        let file = FileContent::new("logo.png", "image/png", &[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(file.data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("Gagal");
        assert!(result.is_error);
        assert_eq!(result.message(), Some("Gagal"));
        assert!(result.resource_bytes().is_none());
    }

    #[test]
    fn test_tool_result_serialization() {
        let result = ToolResult::success(vec![
            ContentItem::text("ok"),
            ContentItem::from_file_content(FileContent::html("a.html", "<html></html>")),
        ]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], false);
        assert_eq!(json["content"][1]["type"], "resource");
        assert_eq!(json["content"][1]["mimeType"], HTML_MIME);
        assert_eq!(result.resource_bytes().unwrap(), b"<html></html>");
    }
}
