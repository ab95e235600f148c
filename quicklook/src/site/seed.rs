//! Thumbnail seeding
//!
//! Creates `<thumbnails>/<project-id>.png` for listed projects that have no
//! exact-name thumbnail yet. The source is picked from the project folder:
//! a `*thumbnail*` file first, then the first manifest image, then the first
//! image found on disk. Bytes are copied as-is.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use quicklook_core::config::ImageRules;

use super::manifest::{manifest_path, read_manifest};
use super::{Site, list_entries, list_images};
use crate::error::SiteError;

/// Extensions tried for `*thumbnail*` sources, in order.
const SOURCE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A thumbnail copied into the thumbnails folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededThumbnail {
    /// Project id.
    pub project: String,
    /// File the thumbnail was copied from.
    pub source: PathBuf,
    /// Created thumbnail.
    pub target: PathBuf,
}

/// Result of a seeding run.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Thumbnails created.
    pub created: Vec<SeededThumbnail>,
    /// Projects that already had `<project-id>.png`.
    pub existing: usize,
    /// Projects without any usable image.
    pub without_image: Vec<String>,
}

/// Picks the file to seed a project's thumbnail from.
///
/// # Errors
///
/// Returns an error if the project folder cannot be read.
pub fn pick_source(
    project_dir: &Path,
    manifest_images: &[String],
    rules: &ImageRules,
) -> Result<Option<PathBuf>, SiteError> {
    let mut names = list_entries(project_dir, |e| e.file_type().is_ok_and(|t| t.is_file()))?;
    names.sort_unstable();

    for ext in SOURCE_EXTENSIONS {
        let Ok(pattern) = Pattern::new(&format!("*thumbnail*.{ext}")) else {
            continue;
        };
        if let Some(name) = names.iter().find(|n| pattern.matches_with(n, MATCH_OPTIONS)) {
            return Ok(Some(project_dir.join(name)));
        }
    }

    if let Some(first) = manifest_images.first() {
        let path = project_dir.join(first);
        if path.is_file() {
            return Ok(Some(path));
        }
    }

    Ok(list_images(project_dir, rules)?
        .into_iter()
        .next()
        .map(|name| project_dir.join(name)))
}

/// Seeds missing thumbnails for every project listed in the site's manifests.
///
/// Groups without a manifest file are skipped.
///
/// # Errors
///
/// Returns an error if a manifest is unreadable, the thumbnails folder cannot
/// be created, or a copy fails.
pub fn seed_thumbnails(site: &Site) -> Result<SeedReport, SiteError> {
    let layout = site.config().layout;
    let thumbs = site.thumbnails_dir();
    let mut report = SeedReport::default();

    std::fs::create_dir_all(&thumbs).map_err(SiteError::io("create directory", &thumbs))?;

    for (group, dir) in site.groups(layout) {
        let path = manifest_path(site, layout, &group);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no manifest, skipping");
            continue;
        }
        let manifest = read_manifest(&path)?;

        for (project, images) in manifest.iter() {
            let project_dir = dir.join(project);
            if !project_dir.is_dir() {
                tracing::debug!(project = %project, "project folder missing, skipping");
                continue;
            }

            let target = thumbs.join(format!("{project}.png"));
            if target.exists() {
                report.existing += 1;
                continue;
            }

            let Some(source) = pick_source(&project_dir, images, site.image_rules())? else {
                tracing::warn!(project = %project, "no image to seed thumbnail from");
                report.without_image.push(project.to_string());
                continue;
            };

            if !source
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            {
                tracing::debug!(source = %source.display(), "copying non-PNG source unconverted");
            }
            std::fs::copy(&source, &target).map_err(SiteError::io("copy", &source))?;
            tracing::info!(project = %project, source = %source.display(), "seeded thumbnail");

            report.created.push(SeededThumbnail {
                project: project.to_string(),
                source,
                target,
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicklook_core::config::{ManifestLayout, SiteConfig};

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_pick_prefers_thumbnail_file_by_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path();
        write(&project.join("a.png"), "a");
        write(&project.join("cover_thumbnail.jpg"), "jpg");
        write(&project.join("z_thumbnail.png"), "png");

        let source = pick_source(project, &["a.png".to_string()], &ImageRules::default()).unwrap();
        assert_eq!(source, Some(project.join("z_thumbnail.png")));
    }

    #[test]
    fn test_pick_falls_back_to_manifest_then_disk() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path();
        write(&project.join("b.png"), "b");
        write(&project.join("assets/asset_001.png"), "asset");

        let rules = ImageRules::default();
        let source = pick_source(project, &["assets/asset_001.png".to_string()], &rules).unwrap();
        assert_eq!(source, Some(project.join("assets/asset_001.png")));

        let source = pick_source(project, &["gone.png".to_string()], &rules).unwrap();
        assert_eq!(source, Some(project.join("b.png")));
    }

    #[test]
    fn test_pick_none_without_images() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("notes.txt"), "n");
        let source = pick_source(dir.path(), &[], &ImageRules::default()).unwrap();
        assert_eq!(source, None);
    }

    #[test]
    fn test_pick_reports_unreadable_project_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("001_gone");
        let err = pick_source(&missing, &[], &ImageRules::default()).unwrap_err();
        assert!(
            matches!(&err, SiteError::Io { action, path, .. } if *action == "read directory" && *path == missing),
            "{err:?}"
        );
    }

    #[test]
    fn test_seed_copies_and_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            layout: ManifestLayout::Disciplines,
            ..SiteConfig::default()
        };
        let site = Site::new(dir.path(), config);
        let painter = site.discipline_dir("Painter");
        write(&painter.join("001_oil/one.png"), "oil");
        write(&painter.join("002_ink/two.jpg"), "ink");
        write(&painter.join("003_empty/readme.md"), "none");
        write(
            &site.discipline_manifest_path("Painter"),
            r#"{"001_oil": ["one.png"], "002_ink": ["two.jpg"], "003_empty": [], "004_gone": []}"#,
        );
        write(&site.thumbnails_dir().join("001_oil.png"), "kept");

        let report = seed_thumbnails(&site).unwrap();
        assert_eq!(report.existing, 1);
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].project, "002_ink");
        assert_eq!(report.without_image, vec!["003_empty".to_string()]);

        let thumbs = site.thumbnails_dir();
        assert_eq!(std::fs::read_to_string(thumbs.join("001_oil.png")).unwrap(), "kept");
        assert_eq!(std::fs::read_to_string(thumbs.join("002_ink.png")).unwrap(), "ink");
        assert!(!thumbs.join("004_gone.png").exists());
    }

    #[test]
    fn test_seed_without_manifest_creates_folder_only() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path(), SiteConfig::default());
        write(&site.projects_dir().join("001_a/a.png"), "a");

        let report = seed_thumbnails(&site).unwrap();
        assert!(report.created.is_empty());
        assert!(site.thumbnails_dir().is_dir());
    }
}
