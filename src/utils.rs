// ABOUTME: Utility functions for the slideshow-agent application
// ABOUTME: Provides output file naming, directory creation and HTML file writing

use crate::errors::{Result, SlideshowError};
use chrono::{DateTime, Local};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Reduce a topic to characters that are safe in a file name.
///
/// Keeps alphanumerics, spaces, underscores and hyphens, trims, then turns
/// spaces into underscores.
pub fn safe_topic(topic: &str) -> String {
    let kept: String = topic
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    kept.trim().replace(' ', "_")
}

/// File name for a slideshow generated at `timestamp`
pub fn output_file_name(topic: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "slideshow_{}_{}.html",
        safe_topic(topic),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Default output path in the current directory
pub fn default_output_path(topic: &str) -> PathBuf {
    PathBuf::from(output_file_name(topic, Local::now()))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(SlideshowError::Validation(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory_exists(parent),
        _ => Ok(()),
    }
}

/// Write HTML content to a file and return the number of bytes on disk
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<u64> {
    info!("Writing HTML to file: {:?}", output_path);

    ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, html_content)?;

    Ok(fs::metadata(output_path)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_safe_topic_strips_punctuation() {
        assert_eq!(safe_topic("  Mastering n8n: From Beginner!  "), "Mastering_n8n_From_Beginner");
        assert_eq!(safe_topic("a/b\\c"), "abc");
        assert_eq!(safe_topic("well-known_name"), "well-known_name");
    }

    #[test]
    fn test_output_file_name_format() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            output_file_name("Rust Basics", timestamp),
            "slideshow_Rust_Basics_20240305_140709.html"
        );
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("deck.html");

        let size = write_html_to_file("<html></html>", &path).unwrap();

        assert_eq!(size, 13);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_file_as_directory_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory_exists(&file).is_err());
    }
}
