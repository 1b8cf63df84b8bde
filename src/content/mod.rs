//! Content types for tool results and uploaded files.
//!
//! Rendered pages travel as base64 resources next to a short text summary,
//! and uploaded logos become `data:` URLs stored in the document model.

pub mod builder;
pub mod file;
pub mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use builder::ContentBuilder;
pub use file::{detect_mime_from_bytes, detect_mime_type, logo_data_url, ImageFormat, LogoFile};
pub use types::{ContentItem, FileContent, FileMetadata, ToolResult};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Gagal membaca berkas {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Berkas {filename} ({mime}) bukan gambar logo yang didukung")]
    UnsupportedLogo { filename: String, mime: String },

    #[error("Logo terlalu besar: {size} byte (maksimal {max} byte)")]
    LogoTooLarge { size: usize, max: usize },
}
