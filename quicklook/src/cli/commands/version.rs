//! `quicklook version`

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};

/// Renders the build's name and version in `format`.
fn render(format: OutputFormat) -> String {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    match format {
        OutputFormat::Human => format!("{name} {version}"),
        OutputFormat::Json => json!({ "name": name, "version": version }).to_string(),
    }
}

/// Prints the build's name and version.
pub fn run(args: &VersionArgs) {
    println!("{}", render(args.format));
}
