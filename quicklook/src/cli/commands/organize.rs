//! `organize` command

use std::path::Path;

use crate::cli::args::OrganizeArgs;
use crate::error::QuickLookError;
use crate::site::Site;
use crate::site::organize::organize_site;

/// Move project images into `assets/` and rewrite the manifests.
///
/// With `--dry-run` the planned moves are printed to stdout instead.
///
/// # Errors
///
/// Returns an error if a folder cannot be read, a move fails, or a manifest
/// cannot be written.
pub fn run(site: &Site, args: &OrganizeArgs) -> Result<(), QuickLookError> {
    let report = organize_site(site, args.dry_run)?;

    if args.dry_run {
        for step in &report.moves {
            println!(
                "{} -> {}",
                relative(site.root(), &step.from).display(),
                relative(site.root(), &step.to).display()
            );
        }
    }

    tracing::info!(
        projects = report.projects,
        moved = report.moves.len(),
        dry_run = args.dry_run,
        "organize finished"
    );
    Ok(())
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
