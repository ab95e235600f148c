//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod html;
pub mod manifest;
pub mod organize;
pub mod resolve;
pub mod sync;
pub mod thumbnails;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigLoader, LoaderOptions};
use crate::error::QuickLookError;
use crate::site::Site;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if configuration loading or the dispatched command fails.
pub fn dispatch(cli: Cli) -> Result<(), QuickLookError> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Manifest(args) => manifest::run(&load_site(&cli.root, config)?, &args),
        Commands::Html(args) => html::run(&load_site(&cli.root, config)?, &args),
        Commands::Sync => sync::run(&load_site(&cli.root, config)?),
        Commands::Organize(args) => organize::run(&load_site(&cli.root, config)?, &args),
        Commands::Thumbnails => thumbnails::run(&load_site(&cli.root, config)?),
        Commands::Resolve(args) => resolve::run(&load_site(&cli.root, config)?, &args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads the site configuration rooted at `root`.
///
/// Load warnings are logged; they never fail the command.
///
/// # Errors
///
/// Returns an error if the root is not a directory, or if the configuration
/// cannot be loaded or validated.
pub fn load_site(root: &Path, config: Option<&Path>) -> Result<Site, QuickLookError> {
    if !root.is_dir() {
        return Err(QuickLookError::Usage(format!(
            "site root {} is not a directory",
            root.display()
        )));
    }

    let options = LoaderOptions {
        site_root: Some(root.to_path_buf()),
        ..LoaderOptions::default()
    };
    let result = ConfigLoader::new(options).discover(config, root)?;

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    Ok(Site::new(root, result.config))
}
