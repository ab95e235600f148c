//! Configuration validation
//!
//! Validation runs on the deserialized [`SiteConfig`] and collects ALL issues
//! rather than stopping at the first one. When a site root is known, the
//! configured disciplines are also checked against the folders on disk.

use crate::error::{Severity, ValidationIssue};

use quicklook_core::config::{ManifestLayout, SiteConfig};
use std::collections::HashSet;
use std::path::Path;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    pub fn validate(&mut self, config: &SiteConfig, site_root: Option<&Path>) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_paths(config);
        self.validate_images(config);
        self.validate_disciplines(config);

        if let Some(root) = site_root
            && config.layout == ManifestLayout::Disciplines
        {
            self.validate_disciplines_on_disk(config, root);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_paths(&mut self, config: &SiteConfig) {
        let paths = &config.paths;
        for (field, value) in [
            ("paths.projects_dir", &paths.projects_dir),
            ("paths.thumbnails_dir", &paths.thumbnails_dir),
            ("paths.index_html", &paths.index_html),
        ] {
            if value.as_os_str().is_empty() {
                self.add_error(field, "path cannot be empty");
            }
        }

        if paths.thumbnail_url_prefix.contains('"') {
            self.add_error(
                "paths.thumbnail_url_prefix",
                "URL prefix cannot contain a double quote",
            );
        }
    }

    fn validate_images(&mut self, config: &SiteConfig) {
        let images = &config.images;
        if images.extensions.is_empty() {
            self.add_error("images.extensions", "at least one extension is required");
        }

        for (i, ext) in images.extensions.iter().enumerate() {
            let path = format!("images.extensions[{i}]");
            if ext.is_empty() {
                self.add_error(&path, "extension cannot be empty");
            } else if let Some(bare) = ext.strip_prefix('.') {
                self.add_error(&path, &format!("write '{bare}' without the leading dot"));
            } else if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                self.add_error(&path, &format!("extension '{ext}' must be alphanumeric"));
            }
        }

        if images.exclude_marker.is_empty() {
            self.add_warning(
                "images.exclude_marker",
                "empty exclusion marker: thumbnail files will be listed as project images",
            );
        }
    }

    fn validate_disciplines(&mut self, config: &SiteConfig) {
        if config.layout == ManifestLayout::Disciplines && config.disciplines.is_empty() {
            self.add_error(
                "disciplines",
                "at least one discipline is required for the disciplines layout",
            );
        }

        let mut seen = HashSet::new();
        for (i, name) in config.disciplines.iter().enumerate() {
            let path = format!("disciplines[{i}]");
            if name.trim().is_empty() {
                self.add_error(&path, "discipline name cannot be empty");
            } else if name.contains(['/', '\\']) {
                self.add_error(&path, &format!("discipline '{name}' must be a single folder name"));
            } else if !seen.insert(name.as_str()) {
                self.add_warning(&path, &format!("duplicate discipline '{name}'"));
            }
        }
    }

    fn validate_disciplines_on_disk(&mut self, config: &SiteConfig, root: &Path) {
        let projects_dir = root.join(&config.paths.projects_dir);
        let Ok(entries) = std::fs::read_dir(&projects_dir) else {
            self.add_warning(
                "paths.projects_dir",
                &format!("projects directory {} does not exist", projects_dir.display()),
            );
            return;
        };

        let on_disk: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();

        for (i, name) in config.disciplines.iter().enumerate() {
            if on_disk.iter().any(|d| d == name) {
                continue;
            }
            let message = suggest(name, &on_disk).map_or_else(
                || format!("discipline folder '{name}' not found"),
                |hint| format!("discipline folder '{name}' not found (did you mean '{hint}'?)"),
            );
            self.add_warning(&format!("disciplines[{i}]"), &message);
        }
    }

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

/// Returns the closest candidate to `name`, if any is close enough.
fn suggest<'a>(name: &str, candidates: &'a [String]) -> Option<&'a str> {
    let lowered = name.to_lowercase();
    candidates
        .iter()
        .map(|c| (c, strsim::jaro_winkler(&lowered, &c.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c.as_str())
}
