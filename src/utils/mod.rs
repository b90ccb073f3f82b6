use std::path::Path;

use tracing::debug;
use url::Url;

/// Name offered in the save dialog when nothing better can be derived.
pub const DEFAULT_FILENAME: &str = "downloaded_file";

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Final path component as an owned string, if it has one.
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Pick the name to offer for a download: the engine's suggested path first,
/// then the last URL path segment, then [`DEFAULT_FILENAME`].
pub fn suggested_filename(suggested_path: &Path, url: &str) -> String {
    let from_path = file_name_of(suggested_path).map(|name| sanitize_filename(&name));
    let from_url = || {
        let parsed = Url::parse(url).ok()?;
        let last = parsed.path_segments()?.next_back()?;
        if last.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
            debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
            last.into()
        });
        Some(sanitize_filename(&decoded))
    };

    from_path
        .filter(|name| !name.is_empty())
        .or_else(|| from_url().filter(|name| !name.is_empty()))
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test/file.mp3"), "test_file.mp3");
        assert_eq!(sanitize_filename("normal-name.mp3"), "normal-name.mp3");
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(
            file_name_of(Path::new("/home/u/report.pdf")).as_deref(),
            Some("report.pdf")
        );
        assert_eq!(file_name_of(Path::new("")), None);
        assert_eq!(file_name_of(Path::new("/")), None);
    }

    #[test]
    fn test_suggested_filename_prefers_engine_path() {
        let path = PathBuf::from("/tmp/Downloads/report.pdf");
        assert_eq!(
            suggested_filename(&path, "https://example.com/other.bin"),
            "report.pdf"
        );
    }

    #[test]
    fn test_suggested_filename_falls_back_to_url() {
        assert_eq!(
            suggested_filename(Path::new(""), "https://example.com/files/my%20notes.txt"),
            "my notes.txt"
        );
    }

    #[test]
    fn test_suggested_filename_default() {
        assert_eq!(suggested_filename(Path::new(""), ""), DEFAULT_FILENAME);
        assert_eq!(
            suggested_filename(Path::new(""), "https://example.com/"),
            DEFAULT_FILENAME
        );
        assert_eq!(
            suggested_filename(
                Path::new(""),
                "blob:https://example.com/5d1c9a4e-7f00-4e5b-9a53-8b0a1c2d3e4f"
            ),
            DEFAULT_FILENAME
        );
    }
}
