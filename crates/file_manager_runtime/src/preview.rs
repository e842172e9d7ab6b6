//! File preview classification and viewer content states.

use platform_host::{FileContent, ZipEntry};

/// Substring the backend uses when refusing to return content for large files.
pub const TOO_LARGE_MARKER: &str = "File is too large to display";

const VIDEO: &[&str] = &["mp4", "webm", "mov", "mkv", "avi"];
const AUDIO: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];
const IMAGE: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp"];
const TEXT: &[&str] = &[
    "txt", "md", "rtf", "tex", "csv", "tsv", "yml", "yaml", "json", "sh", "py", "js", "jsx",
    "html", "css", "dockerfile", "log",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    Video,
    Audio,
    Image,
    Pdf,
    Zip,
    Text,
    Unsupported,
}

impl PreviewKind {
    /// Classifies by the text after the last dot, or the whole name when there is none.
    pub fn classify(file_name: &str) -> Self {
        let extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let extension = extension.as_str();
        if VIDEO.contains(&extension) {
            Self::Video
        } else if AUDIO.contains(&extension) {
            Self::Audio
        } else if IMAGE.contains(&extension) {
            Self::Image
        } else if extension == "pdf" {
            Self::Pdf
        } else if extension == "zip" {
            Self::Zip
        } else if TEXT.contains(&extension) {
            Self::Text
        } else {
            Self::Unsupported
        }
    }

    /// Text and archives are read through the content endpoint.
    pub fn uses_content_endpoint(self) -> bool {
        matches!(self, Self::Text | Self::Zip)
    }

    /// Media is fetched as raw bytes and shown through an object URL.
    pub fn is_media(self) -> bool {
        matches!(self, Self::Video | Self::Audio | Self::Image | Self::Pdf)
    }

    pub fn mime_type(file_name: &str) -> &'static str {
        let extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "mp4" => "video/mp4",
            "webm" => "video/webm",
            "mov" => "video/quicktime",
            "mkv" => "video/x-matroska",
            "avi" => "video/x-msvideo",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "ogg" => "audio/ogg",
            "flac" => "audio/flac",
            "m4a" => "audio/mp4",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Loading,
    Text(String),
    Zip(Vec<ZipEntry>),
    Media { url: String },
    TooLarge,
    Unsupported,
    Failed(String),
}

impl PreviewState {
    pub fn from_content(content: FileContent) -> Self {
        match content {
            FileContent::Text(text) => Self::Text(text),
            FileContent::ZipListing(entries) => Self::Zip(entries),
        }
    }

    /// Maps a load failure, recognizing the backend's size refusal.
    pub fn from_failure(message: String) -> Self {
        if message.contains(TOO_LARGE_MARKER) {
            Self::TooLarge
        } else {
            Self::Failed(message)
        }
    }

    /// Explanatory text shown next to the download link, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::TooLarge => Some("This file is too large to display a preview."),
            Self::Unsupported => Some("No preview available for this file type."),
            Self::Zip(entries) if entries.is_empty() => {
                Some("This ZIP file is empty or could not be read.")
            }
            _ => None,
        }
    }

    /// Whether the viewer should offer a direct download link.
    pub fn offers_download(&self) -> bool {
        matches!(self, Self::TooLarge | Self::Unsupported | Self::Zip(_))
    }

    pub fn object_url(&self) -> Option<&str> {
        match self {
            Self::Media { url } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn classification_follows_extension() {
        for (name, kind) in [
            ("clip.MP4", PreviewKind::Video),
            ("song.flac", PreviewKind::Audio),
            ("photo.jpeg", PreviewKind::Image),
            ("manual.pdf", PreviewKind::Pdf),
            ("backup.zip", PreviewKind::Zip),
            ("compose.yml", PreviewKind::Text),
            ("Dockerfile", PreviewKind::Text),
            ("disk.img", PreviewKind::Unsupported),
        ] {
            assert_eq!(PreviewKind::classify(name), kind, "{name}");
        }
        assert!(PreviewKind::Zip.uses_content_endpoint());
        assert!(PreviewKind::Pdf.is_media());
        assert_eq!(PreviewKind::mime_type("a.SVG"), "image/svg+xml");
    }

    #[test]
    fn backend_size_refusal_becomes_too_large() {
        assert_eq!(
            PreviewState::from_failure("File is too large to display (12 MB)".to_string()),
            PreviewState::TooLarge
        );
        assert_eq!(
            PreviewState::from_failure("Failed to load file.".to_string()),
            PreviewState::Failed("Failed to load file.".to_string())
        );
        assert_eq!(
            PreviewState::TooLarge.notice(),
            Some("This file is too large to display a preview.")
        );
    }

    #[test]
    fn empty_archives_get_a_notice() {
        assert_eq!(
            PreviewState::from_content(FileContent::ZipListing(Vec::new())).notice(),
            Some("This ZIP file is empty or could not be read.")
        );
        assert!(PreviewState::Zip(Vec::new()).offers_download());
        assert_eq!(PreviewState::Text("hi".to_string()).notice(), None);
    }
}
