//! CLI argument definitions
//!
//! All Clap derive structs for `QuickLook` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use quicklook_core::config::ManifestLayout;

// ============================================================================
// Root CLI
// ============================================================================

/// Keeps a design portfolio's manifests, thumbnails and index grid in step
/// with its project folders.
#[derive(Parser, Debug)]
#[command(name = "quicklook", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "QUICKLOOK_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "QUICKLOOK_LOG_FORMAT")]
    pub log_format: LogFormatArg,

    /// Path to the YAML configuration file (default: `<root>/quicklook.yaml`).
    #[arg(long, global = true, env = "QUICKLOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Site root directory.
    #[arg(long, default_value = ".", global = true, env = "QUICKLOOK_ROOT")]
    pub root: PathBuf,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Regenerate project manifests from the folders on disk.
    Manifest(ManifestArgs),

    /// Patch the index page grid from an existing manifest.
    Html(HtmlArgs),

    /// Regenerate the manifests of the configured layout, then patch the index page.
    Sync,

    /// Move project images to `assets/asset_NNN.<ext>`.
    Organize(OrganizeArgs),

    /// Create missing thumbnails from project images.
    Thumbnails,

    /// Show which thumbnail a project resolves to.
    Resolve(ResolveArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Asset Commands
// ============================================================================

/// Arguments for `manifest`.
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Manifest layout (defaults to the configured layout).
    #[arg(long)]
    pub layout: Option<ManifestLayout>,
}

/// Arguments for `html`.
#[derive(Args, Debug)]
pub struct HtmlArgs {
    /// Manifest to read (default: the configured layout's manifests, merged
    /// across disciplines for the disciplines layout).
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Arguments for `organize`.
#[derive(Args, Debug)]
pub struct OrganizeArgs {
    /// Print the planned moves without touching any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Project folder name, e.g. `014_sketches`.
    pub project_id: String,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for `completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    pub shell: Shell,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// Log output format as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Result output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// JSON.
    Json,
}

/// Shells supported by `completions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash
    Bash,
    /// Zsh
    Zsh,
    /// Fish
    Fish,
    /// `PowerShell`
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
