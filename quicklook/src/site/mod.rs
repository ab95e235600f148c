//! Asset tree operations
//!
//! A [`Site`] binds a [`SiteConfig`] to a root directory and exposes the
//! batch jobs that keep the portfolio's derived files in step with its
//! project folders:
//!
//! - [`manifest`]: regenerate `manifest.json` files
//! - [`thumbnail`]: resolve a project's thumbnail by naming convention
//! - [`html`]: patch the grid and `projectNames` literal of the index page
//! - [`organize`]: rename project images to `assets/asset_NNN.<ext>`
//! - [`seed`]: create missing thumbnails from project images

pub mod html;
pub mod manifest;
pub mod organize;
pub mod seed;
pub mod thumbnail;

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use quicklook_core::config::{ImageRules, MANIFEST_FILE_NAME, ManifestLayout, SiteConfig};

use crate::error::SiteError;

/// A portfolio site: configuration resolved against a root directory.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
}

impl Site {
    /// Creates a site rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Site root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Image recognition rules.
    #[must_use]
    pub const fn image_rules(&self) -> &ImageRules {
        &self.config.images
    }

    /// Directory holding project (or discipline) folders.
    #[must_use]
    pub fn projects_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.projects_dir)
    }

    /// Directory holding thumbnails.
    #[must_use]
    pub fn thumbnails_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.thumbnails_dir)
    }

    /// HTML document patched from the manifest.
    #[must_use]
    pub fn index_html(&self) -> PathBuf {
        self.root.join(&self.config.paths.index_html)
    }

    /// Folder of one discipline.
    #[must_use]
    pub fn discipline_dir(&self, discipline: &str) -> PathBuf {
        self.projects_dir().join(discipline)
    }

    /// Manifest path of the flat layout.
    #[must_use]
    pub fn flat_manifest_path(&self) -> PathBuf {
        self.projects_dir().join(MANIFEST_FILE_NAME)
    }

    /// Manifest path of one discipline.
    #[must_use]
    pub fn discipline_manifest_path(&self, discipline: &str) -> PathBuf {
        self.discipline_dir(discipline).join(MANIFEST_FILE_NAME)
    }

    /// Folders scanned for projects under `layout`, paired with their group name.
    ///
    /// The flat layout yields the projects directory under the empty name.
    /// Discipline folders that do not exist are skipped.
    #[must_use]
    pub fn groups(&self, layout: ManifestLayout) -> Vec<(String, PathBuf)> {
        match layout {
            ManifestLayout::Flat => vec![(String::new(), self.projects_dir())],
            ManifestLayout::Disciplines => self
                .config
                .disciplines
                .iter()
                .filter_map(|name| {
                    let dir = self.discipline_dir(name);
                    if dir.is_dir() {
                        Some((name.clone(), dir))
                    } else {
                        tracing::debug!(discipline = %name, "discipline folder missing, skipping");
                        None
                    }
                })
                .collect(),
        }
    }
}

/// Orders file names case-insensitively, breaking ties by the exact name.
#[must_use]
pub fn case_insensitive_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Lists the non-hidden subdirectories of `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn list_subdirs(dir: &Path) -> Result<Vec<String>, SiteError> {
    let mut names = list_entries(dir, |entry| entry.file_type().is_ok_and(|t| t.is_dir()))?;
    names.retain(|name| !name.starts_with('.'));
    names.sort_unstable();
    Ok(names)
}

/// Lists the qualifying image files directly inside `dir`, sorted
/// case-insensitively.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn list_images(dir: &Path, rules: &ImageRules) -> Result<Vec<String>, SiteError> {
    let mut names = list_entries(dir, |entry| entry.file_type().is_ok_and(|t| t.is_file()))?;
    names.retain(|name| rules.qualifies(name));
    names.sort_by(|a, b| case_insensitive_cmp(a, b));
    Ok(names)
}

fn list_entries(
    dir: &Path,
    keep: impl Fn(&std::fs::DirEntry) -> bool,
) -> Result<Vec<String>, SiteError> {
    let entries = std::fs::read_dir(dir).map_err(SiteError::io("read directory", dir))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(SiteError::io("read directory", dir))?;
        if !keep(&entry) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!(name = ?raw, dir = %dir.display(), "skipping non UTF-8 file name"),
        }
    }
    Ok(names)
}

/// Writes `contents` to `path`, replacing any previous file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    std::fs::write(path, contents).map_err(SiteError::io("write", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_case_insensitive_order() {
        let mut names = vec!["b.png", "A.png", "a.png", "C.png"];
        names.sort_by(|a, b| case_insensitive_cmp(a, b));
        assert_eq!(names, vec!["A.png", "a.png", "b.png", "C.png"]);
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.JPG", "a.png", "Thumbnail.png", "notes.txt", "C.webp"] {
            touch(&dir.path().join(name));
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let images = list_images(dir.path(), &ImageRules::default()).unwrap();
        assert_eq!(images, vec!["a.png", "b.JPG", "C.webp"]);
    }

    #[test]
    fn test_list_subdirs_skips_hidden_and_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("002_b")).unwrap();
        std::fs::create_dir(dir.path().join("001_a")).unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        touch(&dir.path().join("manifest.json"));

        assert_eq!(list_subdirs(dir.path()).unwrap(), vec!["001_a", "002_b"]);
    }

    #[test]
    fn test_list_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_subdirs(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }

    #[test]
    fn test_groups_skip_missing_disciplines() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets/projects/Painter")).unwrap();
        let site = Site::new(dir.path(), SiteConfig::default());

        let groups = site.groups(ManifestLayout::Disciplines);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Painter");

        let flat = site.groups(ManifestLayout::Flat);
        assert_eq!(flat, vec![(String::new(), site.projects_dir())]);
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let site = Site::new("/srv/site", SiteConfig::default());
        assert_eq!(site.thumbnails_dir(), PathBuf::from("/srv/site/assets/thubnails"));
        assert_eq!(
            site.discipline_manifest_path("Painter"),
            PathBuf::from("/srv/site/assets/projects/Painter/manifest.json")
        );
    }
}
