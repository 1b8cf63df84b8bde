//! Logo files and MIME type detection.

use std::fs;
use std::path::Path;

use log::info;
use sanitize_filename::sanitize;

use super::types::FileContent;
use super::ContentError;

/// Largest logo accepted into a document model.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Image formats accepted as a letterhead logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/svg+xml" => Some(Self::Svg),
            _ => None,
        }
    }
}

/// Detect MIME type from the filename extension.
pub fn detect_mime_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Detect MIME type from file content magic bytes.
pub fn detect_mime_from_bytes(data: &[u8]) -> Option<&'static str> {
    if data.len() < 4 {
        return None;
    }

    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(b"GIF8") {
        return Some("image/gif");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if data.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if data.starts_with(b"<svg") || data.starts_with(b"<?xml") {
        return Some("image/svg+xml");
    }

    None
}

/// A logo read from disk, ready to be stored in the model.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoFile {
    pub filename: String,
    pub format: ImageFormat,
    pub size_bytes: usize,
    pub data_url: String,
}

/// Read an image file and encode it as a `data:` URL.
///
/// Content sniffing wins over the extension; anything that is not one of the
/// [`ImageFormat`]s is rejected.
pub fn logo_data_url(path: &Path) -> Result<LogoFile, ContentError> {
    let data = fs::read(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let original = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("logo");
    let filename = sanitize(original);

    if data.len() > MAX_LOGO_BYTES {
        return Err(ContentError::LogoTooLarge {
            size: data.len(),
            max: MAX_LOGO_BYTES,
        });
    }

    let mime = detect_mime_from_bytes(&data)
        .map(str::to_string)
        .unwrap_or_else(|| detect_mime_type(&filename));
    let format = ImageFormat::from_mime(&mime).ok_or_else(|| ContentError::UnsupportedLogo {
        filename: filename.clone(),
        mime: mime.clone(),
    })?;

    let content = FileContent::new(&filename, format.mime_type(), &data);
    info!("Logo loaded: {} ({}, {} bytes)", filename, mime, data.len());

    Ok(LogoFile {
        filename,
        format,
        size_bytes: data.len(),
        data_url: content.data_url(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_detect_mime_type_from_extension() {
        assert_eq!(detect_mime_type("logo.PNG"), "image/png");
        assert_eq!(detect_mime_type("logo.jpg"), "image/jpeg");
        assert_eq!(detect_mime_type("catatan"), "application/octet-stream");
    }

    #[test]
    fn test_detect_mime_from_bytes() {
        assert_eq!(detect_mime_from_bytes(&PNG_HEADER), Some("image/png"));
        assert_eq!(detect_mime_from_bytes(b"GIF89a"), Some("image/gif"));
        assert_eq!(detect_mime_from_bytes(b"%PDF-1.7"), Some("application/pdf"));
        assert_eq!(detect_mime_from_bytes(b"ab"), None);
    }

    #[test]
    fn test_logo_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo perusahaan.png");
        fs::File::create(&path).unwrap().write_all(&PNG_HEADER).unwrap();

        let logo = logo_data_url(&path).unwrap();
        assert_eq!(logo.format, ImageFormat::Png);
        assert_eq!(logo.size_bytes, PNG_HEADER.len());
        assert!(logo.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_logo_sniffing_beats_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.txt");
        fs::write(&path, PNG_HEADER).unwrap();
        assert_eq!(logo_data_url(&path).unwrap().format, ImageFormat::Png);
    }

    #[test]
    fn test_logo_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kontrak.pdf");
        fs::write(&path, b"%PDF-1.7 ...").unwrap();
        assert!(matches!(
            logo_data_url(&path),
            Err(ContentError::UnsupportedLogo { .. })
        ));
    }

    #[test]
    fn test_logo_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            logo_data_url(&dir.path().join("tidak-ada.png")),
            Err(ContentError::Io { .. })
        ));
    }
}
