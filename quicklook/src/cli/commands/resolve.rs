//! `resolve` command
//!
//! Prints which thumbnail a project id resolves to, and by which strategy.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::error::QuickLookError;
use crate::site::Site;
use crate::site::thumbnail::{Resolution, ThumbnailResolver};

#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    project_id: &'a str,
    #[serde(flatten)]
    resolution: Option<Resolution>,
    url: Option<String>,
}

/// Resolve one project's thumbnail and print the result.
///
/// # Errors
///
/// Returns an error if the thumbnails folder cannot be read.
pub fn run(site: &Site, args: &ResolveArgs) -> Result<(), QuickLookError> {
    let resolver = ThumbnailResolver::open(&site.thumbnails_dir())?;
    let resolution = resolver.resolve(&args.project_id);
    let prefix = &site.config().paths.thumbnail_url_prefix;

    match args.format {
        OutputFormat::Human => match &resolution {
            Some(found) => println!("{} ({})", found.file_name, found.strategy),
            None => println!("{}: no thumbnail found", args.project_id),
        },
        OutputFormat::Json => {
            let output = ResolveOutput {
                project_id: &args.project_id,
                url: resolution.as_ref().map(|r| format!("{prefix}{}", r.file_name)),
                resolution,
            };
            println!("{}", serde_json::to_string(&output)?);
        }
    }
    Ok(())
}
