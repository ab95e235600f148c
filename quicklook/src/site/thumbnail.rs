//! Thumbnail resolution
//!
//! Thumbnails are not owned by projects; they are found by naming convention
//! in the thumbnails folder. Resolution tries, in order:
//!
//! 1. the exact name `<project-id>.png`
//! 2. any PNG whose name contains the project slug (text after the first `_`);
//!    an id without a slug matches any PNG
//! 3. any PNG named `<number>_*.png` with the project's numeric prefix
//! 4. any PNG named `<number - 1>_*.png`, zero-padded to three digits
//!
//! Candidates within one strategy are tried in sorted name order.

use std::fmt;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::error::SiteError;

const THUMBNAIL_EXTENSION: &str = "png";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Strategy that produced a thumbnail match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// `<project-id>.png`
    Exact,
    /// Name contains the project slug.
    Slug,
    /// Name starts with the project number.
    Number,
    /// Name starts with the previous project number.
    PreviousNumber,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Slug => "slug",
            Self::Number => "number",
            Self::PreviousNumber => "previous-number",
        })
    }
}

/// A resolved thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// File name inside the thumbnails folder.
    pub file_name: String,
    /// Strategy that matched.
    pub strategy: MatchStrategy,
}

/// Resolves project thumbnails against one listing of the thumbnails folder.
#[derive(Debug, Clone)]
pub struct ThumbnailResolver {
    candidates: Vec<String>,
}

impl ThumbnailResolver {
    /// Lists the thumbnails folder once.
    ///
    /// A missing folder resolves nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder exists but cannot be read.
    pub fn open(dir: &Path) -> Result<Self, SiteError> {
        let mut candidates = Vec::new();
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries {
                    let entry = entry.map_err(SiteError::io("read directory", dir))?;
                    if !entry.file_type().is_ok_and(|t| t.is_file()) {
                        continue;
                    }
                    if let Ok(name) = entry.file_name().into_string() {
                        candidates.push(name);
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = %dir.display(), "thumbnails folder missing");
            }
            Err(e) => return Err(SiteError::io("read directory", dir)(e)),
        }
        Ok(Self::from_names(candidates))
    }

    /// Builds a resolver over a known list of file names.
    #[must_use]
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut candidates: Vec<String> = names.into_iter().collect();
        candidates.sort_unstable();
        Self { candidates }
    }

    /// Resolves the thumbnail of `project_id`, or `None` when no strategy matches.
    #[must_use]
    pub fn resolve(&self, project_id: &str) -> Option<Resolution> {
        let exact = format!("{project_id}.{THUMBNAIL_EXTENSION}");
        if self.candidates.iter().any(|name| *name == exact) {
            return Some(Resolution {
                file_name: exact,
                strategy: MatchStrategy::Exact,
            });
        }

        let (number, slug) = project_id.split_once('_').unwrap_or((project_id, ""));

        // `**` is not a valid pattern fragment, so an empty slug gets `*.png`
        let pattern = if slug.is_empty() {
            format!("*.{THUMBNAIL_EXTENSION}")
        } else {
            format!("*{}*.{THUMBNAIL_EXTENSION}", Pattern::escape(slug))
        };
        if let Some(found) = self.first_match(&pattern, MatchStrategy::Slug) {
            return Some(found);
        }

        let pattern = format!("{}_*.{THUMBNAIL_EXTENSION}", Pattern::escape(number));
        if let Some(found) = self.first_match(&pattern, MatchStrategy::Number) {
            return Some(found);
        }

        let previous = previous_number(number)?;
        let pattern = format!("{previous}_*.{THUMBNAIL_EXTENSION}");
        self.first_match(&pattern, MatchStrategy::PreviousNumber)
    }

    fn first_match(&self, pattern: &str, strategy: MatchStrategy) -> Option<Resolution> {
        let pattern = Pattern::new(pattern).ok()?;
        self.candidates
            .iter()
            .find(|name| pattern.matches_with(name, MATCH_OPTIONS))
            .map(|name| Resolution {
                file_name: name.clone(),
                strategy,
            })
    }
}

/// `"014"` → `"013"`; `None` for non-numeric or zero prefixes.
fn previous_number(number: &str) -> Option<String> {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = number.parse().ok()?;
    let previous = value.checked_sub(1)?;
    Some(format!("{previous:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(names: &[&str]) -> ThumbnailResolver {
        ThumbnailResolver::from_names(names.iter().map(ToString::to_string))
    }

    #[test]
    fn test_exact_match_wins() {
        let r = resolver(&["014_sketches.png", "014_other.png", "sketches_v2.png"]);
        let found = r.resolve("014_sketches").unwrap();
        assert_eq!(found.file_name, "014_sketches.png");
        assert_eq!(found.strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_slug_match() {
        let r = resolver(&["015_sketches.png", "020_paintings.png"]);
        let found = r.resolve("014_sketches").unwrap();
        assert_eq!(found.file_name, "015_sketches.png");
        assert_eq!(found.strategy, MatchStrategy::Slug);
    }

    #[test]
    fn test_number_match_takes_first_sorted() {
        let r = resolver(&["014_zeta.png", "014_alpha.png"]);
        let found = r.resolve("014_sketches").unwrap();
        assert_eq!(found.file_name, "014_alpha.png");
        assert_eq!(found.strategy, MatchStrategy::Number);
    }

    #[test]
    fn test_previous_number_fallback() {
        let r = resolver(&["013_x.png", "012_y.png"]);
        let found = r.resolve("014_sketches").unwrap();
        assert_eq!(found.file_name, "013_x.png");
        assert_eq!(found.strategy, MatchStrategy::PreviousNumber);
    }

    #[test]
    fn test_not_found() {
        let r = resolver(&["099_far.png", "014_sketches.jpg"]);
        assert_eq!(r.resolve("014_sketches"), None);
    }

    #[test]
    fn test_only_png_considered() {
        let r = resolver(&["sketches.jpg", "014_a.webp"]);
        assert_eq!(r.resolve("014_sketches"), None);
    }

    #[test]
    fn test_glob_metacharacters_in_id_are_literal() {
        let r = resolver(&["001_a.png", "[x].png"]);
        assert_eq!(r.resolve("abc_[x]").map(|m| m.file_name), Some("[x].png".to_string()));
        assert_eq!(r.resolve("zzz_*"), None);
    }

    #[test]
    fn test_id_without_underscore_matches_first_png() {
        let r = resolver(&["misc.png", "b.png", ".hidden.png", "a.jpg"]);
        let found = r.resolve("misc_").unwrap();
        assert_eq!(found.file_name, "b.png");
        assert_eq!(found.strategy, MatchStrategy::Slug);

        let found = r.resolve("plain").unwrap();
        assert_eq!(found.file_name, "b.png");
        assert_eq!(found.strategy, MatchStrategy::Slug);

        assert_eq!(resolver(&[".hidden.png", "a.jpg"]).resolve("plain"), None);
    }

    #[test]
    fn test_hidden_files_not_matched_by_wildcard() {
        let r = resolver(&[".sketches.png"]);
        assert_eq!(r.resolve("014_sketches"), None);
    }

    #[test]
    fn test_previous_number() {
        assert_eq!(previous_number("014").as_deref(), Some("013"));
        assert_eq!(previous_number("1").as_deref(), Some("000"));
        assert_eq!(previous_number("1000").as_deref(), Some("999"));
        assert_eq!(previous_number("000"), None);
        assert_eq!(previous_number("abc"), None);
        assert_eq!(previous_number(""), None);
    }

    #[test]
    fn test_open_missing_dir_resolves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let r = ThumbnailResolver::open(&dir.path().join("thubnails")).unwrap();
        assert_eq!(r.resolve("001_a"), None);
    }

    #[test]
    fn test_open_lists_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("001_a.png"), b"png").unwrap();
        std::fs::create_dir(dir.path().join("002_b.png")).unwrap();
        let r = ThumbnailResolver::open(dir.path()).unwrap();
        assert!(r.resolve("001_a").is_some());
        assert_eq!(r.resolve("002_b"), None);
    }
}
