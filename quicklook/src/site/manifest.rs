//! Manifest regeneration
//!
//! Lists every project folder's images and rewrites the manifest of each
//! scanned group in full. Nothing is merged with a previous manifest, so a
//! second run over an unchanged tree writes identical bytes.

use std::path::{Path, PathBuf};

use quicklook_core::config::{ImageRules, ManifestLayout};
use quicklook_core::manifest::{Manifest, SiteManifest};

use super::{Site, list_images, list_subdirs, write_file};
use crate::error::SiteError;

/// Subfolder produced by the asset organizer.
pub const ORGANIZED_DIR: &str = "assets";

/// Summary of one written manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenManifest {
    /// Discipline name, empty for the flat layout.
    pub group: String,
    /// Where the manifest was written.
    pub path: PathBuf,
    /// Number of projects listed.
    pub projects: usize,
    /// Number of images listed.
    pub images: usize,
}

/// Lists the images of one project folder.
///
/// Top-level images come first, followed by images of the organized
/// `assets/` subfolder prefixed with `assets/`.
///
/// # Errors
///
/// Returns an error if the project folder cannot be read.
pub fn project_images(project_dir: &Path, rules: &ImageRules) -> Result<Vec<String>, SiteError> {
    let mut images = list_images(project_dir, rules)?;

    let organized = project_dir.join(ORGANIZED_DIR);
    if organized.is_dir() {
        images.extend(
            list_images(&organized, rules)?
                .into_iter()
                .map(|name| format!("{ORGANIZED_DIR}/{name}")),
        );
    }

    Ok(images)
}

/// Builds the manifest of one group folder (the flat projects folder or a
/// discipline folder).
///
/// # Errors
///
/// Returns an error if the folder or one of its projects cannot be read.
pub fn build_manifest(group_dir: &Path, rules: &ImageRules) -> Result<Manifest, SiteError> {
    let mut manifest = Manifest::new();
    for project in list_subdirs(group_dir)? {
        let images = project_images(&group_dir.join(&project), rules)?;
        tracing::trace!(project = %project, images = images.len(), "listed project");
        manifest.insert(project, images);
    }
    Ok(manifest)
}

/// Scans every group of `layout` without writing anything.
///
/// A missing flat projects folder yields an empty manifest.
///
/// # Errors
///
/// Returns an error if an existing folder cannot be read.
pub fn scan(site: &Site, layout: ManifestLayout) -> Result<SiteManifest, SiteError> {
    let mut result = SiteManifest::new();
    for (group, dir) in site.groups(layout) {
        let manifest = if dir.is_dir() {
            build_manifest(&dir, site.image_rules())?
        } else {
            tracing::warn!(dir = %dir.display(), "projects folder missing");
            Manifest::new()
        };
        result.insert(group, manifest);
    }
    Ok(result)
}

/// Path of the manifest file of `group` under `layout`.
#[must_use]
pub fn manifest_path(site: &Site, layout: ManifestLayout, group: &str) -> PathBuf {
    match layout {
        ManifestLayout::Flat => site.flat_manifest_path(),
        ManifestLayout::Disciplines => site.discipline_manifest_path(group),
    }
}

/// Writes a manifest as 2-space indented JSON, replacing the file.
///
/// # Errors
///
/// Returns an error if the parent folder is missing or the write fails.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), SiteError> {
    let json = manifest
        .to_json()
        .map_err(|source| SiteError::InvalidManifest {
            path: path.to_path_buf(),
            source,
        })?;
    write_file(path, &json)
}

/// Reads an existing manifest.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a manifest.
pub fn read_manifest(path: &Path) -> Result<Manifest, SiteError> {
    let text = std::fs::read_to_string(path).map_err(SiteError::io("read", path))?;
    Manifest::from_json(&text).map_err(|source| SiteError::InvalidManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the manifest of every group of `layout` that has one on disk.
///
/// Groups without a manifest file are skipped with a warning.
///
/// # Errors
///
/// Returns an error if an existing manifest cannot be read or parsed.
pub fn read_all(site: &Site, layout: ManifestLayout) -> Result<SiteManifest, SiteError> {
    let mut result = SiteManifest::new();
    for (group, _) in site.groups(layout) {
        let path = manifest_path(site, layout, &group);
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "manifest missing, skipping");
            continue;
        }
        result.insert(group, read_manifest(&path)?);
    }
    Ok(result)
}

/// Regenerates and writes every manifest of `layout`.
///
/// Returns the scanned manifests together with a summary per written file.
///
/// # Errors
///
/// Returns an error if scanning or writing fails.
pub fn regenerate(
    site: &Site,
    layout: ManifestLayout,
) -> Result<(SiteManifest, Vec<WrittenManifest>), SiteError> {
    let scanned = scan(site, layout)?;
    let mut written = Vec::with_capacity(scanned.len());

    for (group, manifest) in scanned.iter() {
        let path = manifest_path(site, layout, group);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SiteError::io("create directory", parent))?;
        }
        write_manifest(&path, manifest)?;
        tracing::info!(
            path = %path.display(),
            projects = manifest.len(),
            "updated manifest"
        );
        written.push(WrittenManifest {
            group: group.to_string(),
            path,
            projects: manifest.len(),
            images: manifest.image_count(),
        });
    }

    Ok((scanned, written))
}
