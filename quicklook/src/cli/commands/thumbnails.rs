//! `thumbnails` command

use crate::error::QuickLookError;
use crate::site::Site;
use crate::site::seed::seed_thumbnails;

/// Seed missing `<project-id>.png` thumbnails.
///
/// # Errors
///
/// Returns an error if a manifest is unreadable or a copy fails.
pub fn run(site: &Site) -> Result<(), QuickLookError> {
    let report = seed_thumbnails(site)?;
    tracing::info!(
        created = report.created.len(),
        existing = report.existing,
        without_image = report.without_image.len(),
        "thumbnail seeding finished"
    );
    Ok(())
}
