//! `sync` command
//!
//! Regenerates the manifests of the configured layout, then patches the
//! index page from the fresh scan.

use quicklook_core::config::ManifestLayout;

use super::html::{merged, patch};
use crate::error::QuickLookError;
use crate::site::Site;
use crate::site::manifest::regenerate;

/// Regenerate manifests and patch the index page.
///
/// # Errors
///
/// Returns an error if scanning, writing a manifest, or patching fails.
pub fn run(site: &Site) -> Result<(), QuickLookError> {
    let layout = site.config().layout;
    let (scanned, _) = regenerate(site, layout)?;

    let manifest = match layout {
        ManifestLayout::Flat => scanned.get("").cloned().unwrap_or_default(),
        ManifestLayout::Disciplines => merged(&scanned),
    };

    patch(site, &manifest)?;
    Ok(())
}
