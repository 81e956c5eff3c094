//! Media discovery and the loading gate shown while a gallery loads
//!
//! Discovery walks the deployment's asset tree once, keeps images under the
//! requested folder and hands the paths to `gallery::ordered`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use walkdir::WalkDir;

use crate::gallery::{ordered, MediaList, SortMode};

/// Image extensions a gallery will show
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg"];

/// Minimum time the loading screen stays up
pub const MIN_LOADING_TIME: Duration = Duration::from_millis(1500);

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Asset directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Failed to read asset directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Checks if a file has a supported image extension
pub fn is_gallery_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn in_folder(path: &Path, root: &Path, folder: &str) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .parent()
        .map(|dir| dir.components().any(|c| c.as_os_str() == folder))
        .unwrap_or(false)
}

/// Find every image under `root` inside a directory named `folder` (at any
/// depth) and order the results with `mode`.
///
/// Ordering looks at paths relative to `root`, so digits in the deployment's
/// own directory names never leak into the natural sort key. Unreadable
/// entries below the root are logged and skipped.
pub fn discover(root: &Path, folder: &str, mode: SortMode) -> Result<MediaList, MediaError> {
    if !root.is_dir() {
        return Err(MediaError::MissingRoot(root.to_path_buf()));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(MediaError::Walk {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable asset entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_gallery_image(path) && in_folder(path, root, folder) {
            let relative = path.strip_prefix(root).unwrap_or(path);
            found.push(relative.to_string_lossy().into_owned());
        }
    }

    tracing::debug!(folder, count = found.len(), "Discovered gallery media");
    Ok(ordered(found, mode).map(|relative| root.join(relative).to_string_lossy().into_owned()))
}

/// Holds content back until assets are loaded and a minimum time has passed
#[derive(Debug, Clone, Copy)]
pub struct LoadingGate {
    started: Instant,
    min_duration: Duration,
    loaded: bool,
}

impl LoadingGate {
    pub fn new(started: Instant, min_duration: Duration) -> Self {
        Self {
            started,
            min_duration,
            loaded: false,
        }
    }

    /// Assets finished loading (successfully or not)
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Time since the gate was created, for the loading animation
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.loaded && now.saturating_duration_since(self.started) >= self.min_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"fake image data").unwrap();
    }

    fn file_names(list: &MediaList) -> Vec<String> {
        list.iter()
            .map(|p| Path::new(p).file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_filters_folder_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "studio/2-10.jpg");
        touch(dir.path(), "studio/1-5.JPG");
        touch(dir.path(), "studio/2-2.png");
        touch(dir.path(), "studio/clip.mp4");
        touch(dir.path(), "studio/notes.txt");
        touch(dir.path(), "daily/1-1.jpg");

        let list = discover(dir.path(), "studio", SortMode::NaturalNumeric).unwrap();
        assert_eq!(file_names(&list), ["1-5.JPG", "2-2.png", "2-10.jpg"]);
    }

    #[test]
    fn test_discover_matches_nested_folders() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "photos/best/b.jpg");
        touch(dir.path(), "photos/best/a.jpg");
        touch(dir.path(), "best.jpg");

        let list = discover(dir.path(), "best", SortMode::Lexicographic).unwrap();
        assert_eq!(file_names(&list), ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover(&dir.path().join("nope"), "studio", SortMode::Lexicographic);
        assert!(matches!(result, Err(MediaError::MissingRoot(_))));
    }

    #[test]
    fn test_discover_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "daily/1-1.jpg");
        let list = discover(dir.path(), "studio", SortMode::Lexicographic).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_loading_gate_waits_for_both() {
        let start = Instant::now();
        let mut gate = LoadingGate::new(start, MIN_LOADING_TIME);
        assert!(!gate.is_ready(start + Duration::from_secs(2)));

        gate.mark_loaded();
        assert!(!gate.is_ready(start + Duration::from_millis(1000)));
        assert!(gate.is_ready(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_loading_gate_waits_for_slow_assets() {
        let start = Instant::now();
        let mut gate = LoadingGate::new(start, MIN_LOADING_TIME);
        assert!(!gate.is_loaded());
        assert!(!gate.is_ready(start + Duration::from_secs(5)));
        gate.mark_loaded();
        assert!(gate.is_loaded());
        assert!(gate.is_ready(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_loading_gate_elapsed_counts_from_creation() {
        let start = Instant::now();
        let gate = LoadingGate::new(start + Duration::from_secs(3), MIN_LOADING_TIME);
        assert_eq!(gate.elapsed(start + Duration::from_millis(3250)), Duration::from_millis(250));
        assert_eq!(gate.elapsed(start), Duration::ZERO);
    }

    #[test]
    fn test_is_gallery_image() {
        assert!(is_gallery_image(Path::new("a/b/c.jpeg")));
        assert!(is_gallery_image(Path::new("logo.SVG")));
        assert!(!is_gallery_image(Path::new("clip.mp4")));
        assert!(!is_gallery_image(Path::new("README")));
    }
}
