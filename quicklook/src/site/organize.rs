//! Asset organization
//!
//! Moves each project's top-level images into its `assets/` subfolder under
//! sequential names (`asset_001.png`, `asset_002.jpg`, ...) and regenerates
//! the group manifest afterwards. Numbering follows the case-insensitive
//! order of the original names and continues after the highest number
//! already present, so a re-run never overwrites an organized file.
//!
//! Moves are not transactional: a failure part-way leaves the project
//! partially organized.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use quicklook_core::config::ImageRules;
use regex::Regex;

use super::manifest::{
    ORGANIZED_DIR, WrittenManifest, build_manifest, manifest_path, write_manifest,
};
use super::{Site, list_entries, list_images, list_subdirs};
use crate::error::SiteError;

static ASSET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^asset_(\d+)\.[^.]+$").expect("valid regex"));

/// One planned or performed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMove {
    /// Original file.
    pub from: PathBuf,
    /// New location inside `assets/`.
    pub to: PathBuf,
}

/// Result of organizing a site.
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    /// Project folders visited.
    pub projects: usize,
    /// Moves performed (or planned, in a dry run).
    pub moves: Vec<AssetMove>,
    /// Manifests rewritten afterwards. Empty in a dry run.
    pub manifests: Vec<WrittenManifest>,
}

/// Name of the `index`-th organized asset with extension `ext`.
///
/// `asset_name(7, "PNG")` → `"asset_007.png"`.
#[must_use]
pub fn asset_name(index: usize, ext: &str) -> String {
    format!("asset_{index:03}.{}", ext.to_lowercase())
}

/// Highest `asset_NNN` number among `names`, or 0.
fn highest_asset_number<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names
        .into_iter()
        .filter_map(|name| ASSET_NAME_RE.captures(name))
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

/// Plans the moves that organize one project folder.
///
/// # Errors
///
/// Returns an error if the project or its `assets/` folder cannot be read.
pub fn plan_project(project_dir: &Path, rules: &ImageRules) -> Result<Vec<AssetMove>, SiteError> {
    let assets_dir = project_dir.join(ORGANIZED_DIR);

    let existing = if assets_dir.is_dir() {
        list_entries(&assets_dir, |_| true)?
    } else {
        Vec::new()
    };
    let start = highest_asset_number(existing.iter().map(String::as_str)) + 1;

    let moves = list_images(project_dir, rules)?
        .into_iter()
        .enumerate()
        .map(|(offset, name)| {
            let ext = name.rsplit_once('.').map_or("", |(_, ext)| ext);
            AssetMove {
                to: assets_dir.join(asset_name(start + offset, ext)),
                from: project_dir.join(name),
            }
        })
        .collect();

    Ok(moves)
}

/// Organizes one project folder.
///
/// In a dry run nothing is created or moved; the planned moves are returned.
///
/// # Errors
///
/// Returns an error if planning fails or a file cannot be moved.
pub fn organize_project(
    project_dir: &Path,
    rules: &ImageRules,
    dry_run: bool,
) -> Result<Vec<AssetMove>, SiteError> {
    let moves = plan_project(project_dir, rules)?;
    if dry_run {
        return Ok(moves);
    }

    let assets_dir = project_dir.join(ORGANIZED_DIR);
    std::fs::create_dir_all(&assets_dir).map_err(SiteError::io("create directory", &assets_dir))?;

    for step in &moves {
        if step.to.exists() {
            return Err(SiteError::io("move", &step.from)(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", step.to.display()),
            )));
        }
        std::fs::rename(&step.from, &step.to).map_err(SiteError::io("move", &step.from))?;
        tracing::debug!(from = %step.from.display(), to = %step.to.display(), "moved asset");
    }

    Ok(moves)
}

/// Organizes every project of the site's layout and rewrites its manifests.
///
/// # Errors
///
/// Returns an error if a folder cannot be read, a move fails, or a manifest
/// cannot be written.
pub fn organize_site(site: &Site, dry_run: bool) -> Result<OrganizeReport, SiteError> {
    let layout = site.config().layout;
    let mut report = OrganizeReport::default();

    for (group, dir) in site.groups(layout) {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "projects folder missing");
            continue;
        }

        for project in list_subdirs(&dir)? {
            let moves = organize_project(&dir.join(&project), site.image_rules(), dry_run)?;
            if moves.is_empty() {
                tracing::debug!(project = %project, "no assets to organize");
            } else {
                tracing::info!(project = %project, assets = moves.len(), dry_run, "organized assets");
            }
            report.projects += 1;
            report.moves.extend(moves);
        }

        if dry_run {
            continue;
        }

        let manifest = build_manifest(&dir, site.image_rules())?;
        let path = manifest_path(site, layout, &group);
        write_manifest(&path, &manifest)?;
        tracing::info!(path = %path.display(), projects = manifest.len(), "updated manifest");
        report.manifests.push(WrittenManifest {
            group,
            path,
            projects: manifest.len(),
            images: manifest.image_count(),
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicklook_core::config::{ManifestLayout, SiteConfig};

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, path.file_name().unwrap().as_encoded_bytes()).unwrap();
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(asset_name(1, "png"), "asset_001.png");
        assert_eq!(asset_name(42, "JPEG"), "asset_042.jpeg");
        assert_eq!(asset_name(1234, "gif"), "asset_1234.gif");
    }

    #[test]
    fn test_highest_asset_number() {
        assert_eq!(highest_asset_number(["asset_003.png", "asset_010.jpg", "x.png"]), 10);
        assert_eq!(highest_asset_number(["asset_.png", "asset_2"]), 0);
        assert_eq!(highest_asset_number(std::iter::empty()), 0);
    }

    #[test]
    fn test_numbering_follows_case_insensitive_order() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("001_logo");
        touch(&project.join("b.PNG"));
        touch(&project.join("A.jpg"));
        touch(&project.join("c.gif"));
        touch(&project.join("cover_thumbnail.png"));
        touch(&project.join("notes.txt"));

        let moves = organize_project(&project, &ImageRules::default(), false).unwrap();
        assert_eq!(moves.len(), 3);

        let assets = project.join("assets");
        assert_eq!(
            file_names(&assets),
            vec!["asset_001.jpg", "asset_002.png", "asset_003.gif"]
        );
        assert_eq!(std::fs::read(assets.join("asset_001.jpg")).unwrap(), b"A.jpg");
        assert_eq!(std::fs::read(assets.join("asset_002.png")).unwrap(), b"b.PNG");
        // Thumbnails and non-images stay where they were
        assert_eq!(
            file_names(&project),
            vec!["assets", "cover_thumbnail.png", "notes.txt"]
        );
    }

    #[test]
    fn test_rerun_continues_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("002_poster");
        touch(&project.join("one.png"));
        organize_project(&project, &ImageRules::default(), false).unwrap();

        touch(&project.join("two.png"));
        let moves = organize_project(&project, &ImageRules::default(), false).unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(
            file_names(&project.join("assets")),
            vec!["asset_001.png", "asset_002.png"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_numbering_skips_non_utf8_asset_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("004_scan");
        touch(&project.join("assets/asset_005.png"));
        std::fs::write(
            project.join("assets").join(OsStr::from_bytes(b"asset_\xff.png")),
            b"raw",
        )
        .unwrap();
        touch(&project.join("page.png"));

        let moves = plan_project(&project, &ImageRules::default()).unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, project.join("assets/asset_006.png"));
    }

    #[test]
    fn test_plan_reports_missing_project_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("005_gone");
        let err = plan_project(&missing, &ImageRules::default()).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }), "{err:?}");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("003_zine");
        touch(&project.join("page.webp"));

        let moves = organize_project(&project, &ImageRules::default(), true).unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, project.join("assets/asset_001.webp"));
        assert!(!project.join("assets").exists());
        assert!(project.join("page.webp").exists());
    }

    #[test]
    fn test_organize_site_rewrites_discipline_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            layout: ManifestLayout::Disciplines,
            ..SiteConfig::default()
        };
        let site = Site::new(dir.path(), config);
        touch(&site.discipline_dir("Painter").join("001_oil/b.png"));
        touch(&site.discipline_dir("Painter").join("001_oil/a.png"));
        touch(&site.discipline_dir("Painter").join(".hidden/x.png"));

        let report = organize_site(&site, false).unwrap();
        assert_eq!(report.projects, 1);
        assert_eq!(report.moves.len(), 2);
        assert_eq!(report.manifests.len(), 1);

        let manifest = std::fs::read_to_string(site.discipline_manifest_path("Painter")).unwrap();
        assert_eq!(
            manifest,
            "{\n  \"001_oil\": [\n    \"assets/asset_001.png\",\n    \"assets/asset_002.png\"\n  ]\n}"
        );
        assert!(site.discipline_dir("Painter").join(".hidden/x.png").exists());
    }

    #[test]
    fn test_organize_site_dry_run_writes_no_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path(), SiteConfig::default());
        touch(&site.projects_dir().join("001_a/a.png"));

        let report = organize_site(&site, true).unwrap();
        assert_eq!(report.moves.len(), 1);
        assert!(report.manifests.is_empty());
        assert!(!site.flat_manifest_path().exists());
    }
}
