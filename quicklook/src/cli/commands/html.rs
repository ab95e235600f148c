//! `html` command
//!
//! Patches the index page from manifests already on disk.

use quicklook_core::config::ManifestLayout;
use quicklook_core::manifest::{Manifest, SiteManifest};

use crate::cli::args::HtmlArgs;
use crate::error::QuickLookError;
use crate::site::Site;
use crate::site::html::{PatchOutcome, patch_file};
use crate::site::manifest::{read_all, read_manifest};
use crate::site::thumbnail::ThumbnailResolver;

/// Patch the index page grid and names literal.
///
/// # Errors
///
/// Returns an error if a manifest or the page cannot be read, or the page
/// cannot be written.
pub fn run(site: &Site, args: &HtmlArgs) -> Result<(), QuickLookError> {
    let manifest = match &args.manifest {
        Some(path) => read_manifest(path)?,
        None => match site.config().layout {
            ManifestLayout::Flat => read_manifest(&site.flat_manifest_path())?,
            ManifestLayout::Disciplines => merged(&read_all(site, ManifestLayout::Disciplines)?),
        },
    };

    patch(site, &manifest)?;
    Ok(())
}

/// Flattens per-discipline manifests, warning about shadowed project ids.
pub(crate) fn merged(all: &SiteManifest) -> Manifest {
    let (manifest, shadowed) = all.flatten();
    for project in shadowed {
        tracing::warn!(
            project = %project,
            "project id appears in several disciplines, keeping the last"
        );
    }
    manifest
}

/// Patches the site's index page from `manifest`.
///
/// # Errors
///
/// Returns an error if the thumbnails folder or the page cannot be read, or
/// the page cannot be written.
pub(crate) fn patch(site: &Site, manifest: &Manifest) -> Result<PatchOutcome, QuickLookError> {
    let resolver = ThumbnailResolver::open(&site.thumbnails_dir())?;
    let outcome = patch_file(
        &site.index_html(),
        manifest,
        &resolver,
        &site.config().paths.thumbnail_url_prefix,
    )?;

    if let PatchOutcome::Patched { report, .. } = &outcome
        && !report.missing_thumbnails.is_empty()
    {
        tracing::warn!(
            missing = report.missing_thumbnails.len(),
            "some projects have no thumbnail and were left out of the grid"
        );
    }
    Ok(outcome)
}
