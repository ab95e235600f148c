//! Configuration schema types
//!
//! These types are deserialized from `quicklook.yaml`. Every field has a
//! default matching the portfolio site's historical layout, so an absent or
//! empty file yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default projects directory, relative to the site root.
pub const DEFAULT_PROJECTS_DIR: &str = "assets/projects";

/// Default thumbnails directory. The misspelling is what the site serves.
pub const DEFAULT_THUMBNAILS_DIR: &str = "assets/thubnails";

/// Default HTML document patched by `html` and `sync`.
pub const DEFAULT_INDEX_HTML: &str = "index.html";

/// Default URL prefix written into grid `<img src>` attributes.
pub const DEFAULT_THUMBNAIL_URL_PREFIX: &str = "/design_quick_look/assets/thubnails/";

/// File name of every manifest written by the tool.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Disciplines scanned when the configuration does not list any.
pub const DEFAULT_DISCIPLINES: [&str; 6] = [
    "Product Designer",
    "Brand Designer",
    "Illustrator",
    "Generative Designer",
    "Painter",
    "Immersion Designer",
];

/// Image extensions recognized when the configuration does not list any.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Root configuration for a portfolio site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory layout of the asset tree.
    pub paths: PathsConfig,

    /// How project folders are grouped under the projects directory.
    pub layout: ManifestLayout,

    /// Discipline folder names, scanned in this order.
    pub disciplines: Vec<String>,

    /// Image file recognition rules.
    pub images: ImageRules,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            layout: ManifestLayout::default(),
            disciplines: DEFAULT_DISCIPLINES.iter().map(ToString::to_string).collect(),
            images: ImageRules::default(),
        }
    }
}

/// Paths of the asset tree, relative to the site root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Folder holding project folders (flat) or discipline folders.
    pub projects_dir: PathBuf,

    /// Folder holding `<project-id>.png` thumbnails.
    pub thumbnails_dir: PathBuf,

    /// HTML document containing the grid and `projectNames` markers.
    pub index_html: PathBuf,

    /// Prefix prepended to thumbnail file names in generated markup.
    pub thumbnail_url_prefix: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from(DEFAULT_PROJECTS_DIR),
            thumbnails_dir: PathBuf::from(DEFAULT_THUMBNAILS_DIR),
            index_html: PathBuf::from(DEFAULT_INDEX_HTML),
            thumbnail_url_prefix: DEFAULT_THUMBNAIL_URL_PREFIX.to_string(),
        }
    }
}

/// Manifest layout of the projects directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ManifestLayout {
    /// `projects/<project-id>/`, one `projects/manifest.json`.
    #[default]
    Flat,
    /// `projects/<Discipline>/<project-id>/`, one manifest per discipline.
    Disciplines,
}

/// Rules deciding which files count as project images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageRules {
    /// Accepted extensions, without the dot, compared case-insensitively.
    pub extensions: Vec<String>,

    /// Files whose name contains this marker (case-insensitive) are skipped.
    pub exclude_marker: String,
}

impl Default for ImageRules {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            exclude_marker: "thumbnail".to_string(),
        }
    }
}

impl ImageRules {
    /// Returns `true` if `name` has an accepted extension.
    #[must_use]
    pub fn has_image_extension(&self, name: &str) -> bool {
        let Some((stem, ext)) = name.rsplit_once('.') else {
            return false;
        };
        !stem.is_empty()
            && self
                .extensions
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }

    /// Returns `true` if `name` carries the exclusion marker.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        !self.exclude_marker.is_empty()
            && name
                .to_lowercase()
                .contains(&self.exclude_marker.to_lowercase())
    }

    /// Returns `true` if `name` belongs in a manifest image list.
    #[must_use]
    pub fn qualifies(&self, name: &str) -> bool {
        self.has_image_extension(name) && !self.is_excluded(name)
    }
}
