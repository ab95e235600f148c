//! `manifest` command

use crate::cli::args::ManifestArgs;
use crate::error::QuickLookError;
use crate::site::Site;
use crate::site::manifest::regenerate;

/// Regenerate the manifests of the requested (or configured) layout.
///
/// # Errors
///
/// Returns an error if a folder cannot be scanned or a manifest written.
pub fn run(site: &Site, args: &ManifestArgs) -> Result<(), QuickLookError> {
    let layout = args.layout.unwrap_or(site.config().layout);
    let (_, written) = regenerate(site, layout)?;

    let images: usize = written.iter().map(|w| w.images).sum();
    tracing::info!(manifests = written.len(), images, "manifests regenerated");
    Ok(())
}
