//! Index page patching
//!
//! The index page is hand-authored; two regions of it are generated from the
//! manifest:
//!
//! - the `<div class="grid">` container, one tile per project with a
//!   thumbnail, and
//! - the `const projectNames = { ... };` literal mapping ids to display names.
//!
//! Both are located by their textual markers, not by parsing the document.
//! The grid's end is found by counting nested `<div>` tags. When the grid
//! cannot be located the document is left untouched.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use quicklook_core::manifest::Manifest;
use regex::Regex;

use super::thumbnail::ThumbnailResolver;
use super::write_file;
use crate::error::SiteError;

/// Opening tag of the generated grid.
pub const GRID_OPEN: &str = r#"<div class="grid">"#;

/// Opening token of the generated names literal.
pub const NAMES_OPEN: &str = "const projectNames = {";

const NAMES_CLOSE: &str = "};";
const DIV_OPEN: &str = "<div";
const DIV_CLOSE: &str = "</div>";
const INDENT_STEP: &str = "    ";

static GRID_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="grid-item item-\d+([^"]*)" data-project="([^"]+)">"#)
        .expect("valid regex")
});

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+_").expect("valid regex"));

/// One generated grid tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    /// 1-based position in the grid.
    pub index: usize,
    /// Project folder name.
    pub project_id: String,
    /// Extra classes carried over from the previous page (e.g. `span-2`).
    pub span_class: Option<String>,
    /// Thumbnail file name.
    pub thumbnail: String,
    /// Display name used as `alt` text.
    pub name: String,
}

/// Summary of a successful patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Tiles written to the grid.
    pub items: Vec<GridItem>,
    /// Projects omitted because no thumbnail was found.
    pub missing_thumbnails: Vec<String>,
    /// Whether the `projectNames` literal was found and replaced.
    pub names_updated: bool,
}

/// Outcome of patching a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Both regions were regenerated (the names literal only if present).
    Patched {
        /// The rewritten document.
        html: String,
        /// What was written.
        report: PatchReport,
    },
    /// No `<div class="grid">` in the document.
    GridNotFound,
    /// The grid's closing tag could not be found.
    GridUnbalanced,
}

/// Converts a project folder name into its display name.
///
/// `"014_brand_identity"` → `"Brand Identity"`.
#[must_use]
pub fn display_name(project_id: &str) -> String {
    let stripped = LEADING_NUMBER_RE.replace(project_id, "");
    title_case(&stripped.replace('_', " "))
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Collects the extra classes of existing grid tiles, keyed by project id.
///
/// Tiles without extra classes are recorded with an empty string.
#[must_use]
pub fn existing_span_classes(html: &str) -> HashMap<String, String> {
    GRID_ITEM_RE
        .captures_iter(html)
        .map(|caps| {
            let classes = caps[1].trim().to_string();
            let project_id = unescape_html(&caps[2]);
            (project_id, classes)
        })
        .collect()
}

/// Location of the grid container in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRegion {
    /// Byte range from the opening `<div` to the end of the matching `</div>`.
    Found(Range<usize>),
    /// No `<div class="grid">` in the document.
    Missing,
    /// The opening tag has no matching closing tag.
    Unbalanced,
}

/// Locates the grid by counting nested `<div>` tags from its opening tag.
#[must_use]
pub fn find_grid_region(html: &str) -> GridRegion {
    let Some(start) = html.find(GRID_OPEN) else {
        return GridRegion::Missing;
    };

    let bytes = html.as_bytes();
    let mut depth = 0usize;
    let mut pos = start;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if rest.starts_with(DIV_OPEN.as_bytes())
            && rest
                .get(DIV_OPEN.len())
                .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>')
        {
            depth += 1;
            pos += DIV_OPEN.len();
        } else if rest.starts_with(DIV_CLOSE.as_bytes()) {
            depth = depth.saturating_sub(1);
            pos += DIV_CLOSE.len();
            if depth == 0 {
                return GridRegion::Found(start..pos);
            }
        } else {
            pos += 1;
        }
    }

    GridRegion::Unbalanced
}

/// Whitespace preceding `pos` on its line, or `""` if the line has other text
/// before `pos`.
fn line_indent(html: &str, pos: usize) -> &str {
    let line_start = html[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &html[line_start..pos];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

/// Builds the grid tiles for every project of `manifest`, in id order.
///
/// Projects without a thumbnail are skipped and returned separately.
#[must_use]
pub fn build_grid_items(
    manifest: &Manifest,
    resolver: &ThumbnailResolver,
    spans: &HashMap<String, String>,
) -> (Vec<GridItem>, Vec<String>) {
    let mut items = Vec::new();
    let mut missing = Vec::new();

    for project_id in manifest.sorted_project_ids() {
        let Some(found) = resolver.resolve(project_id) else {
            tracing::warn!(project = %project_id, "no thumbnail found, omitting grid item");
            missing.push(project_id.to_string());
            continue;
        };
        tracing::debug!(
            project = %project_id,
            thumbnail = %found.file_name,
            strategy = %found.strategy,
            "resolved thumbnail"
        );
        items.push(GridItem {
            index: items.len() + 1,
            project_id: project_id.to_string(),
            span_class: spans.get(project_id).filter(|s| !s.is_empty()).cloned(),
            thumbnail: found.file_name,
            name: display_name(project_id),
        });
    }

    (items, missing)
}

/// Renders the grid container, starting at its opening tag.
///
/// `indent` is the indentation of the opening tag's line.
#[must_use]
pub fn render_grid(items: &[GridItem], indent: &str, url_prefix: &str) -> String {
    let item_indent = format!("{indent}{INDENT_STEP}");
    let image_indent = format!("{item_indent}{INDENT_STEP}");

    let mut out = String::from(GRID_OPEN);
    out.push('\n');
    for item in items {
        let span = item
            .span_class
            .as_deref()
            .map_or_else(String::new, |s| format!(" {s}"));
        let _ = writeln!(
            out,
            r#"{item_indent}<div class="grid-item item-{}{span}" data-project="{}">"#,
            item.index,
            escape_html(&item.project_id),
        );
        let _ = writeln!(
            out,
            r#"{image_indent}<img src="{url_prefix}{}" alt="{}" class="grid-image">"#,
            escape_html(&item.thumbnail),
            escape_html(&item.name),
        );
        let _ = writeln!(out, "{item_indent}{DIV_CLOSE}");
    }
    out.push_str(indent);
    out.push_str(DIV_CLOSE);
    out
}

/// Renders the `projectNames` literal, starting at `const`.
#[must_use]
pub fn render_project_names(manifest: &Manifest, indent: &str) -> String {
    let entries: Vec<String> = manifest
        .sorted_project_ids()
        .into_iter()
        .map(|id| {
            format!(
                "{indent}{INDENT_STEP}'{}': '{}'",
                escape_js(id),
                escape_js(&display_name(id))
            )
        })
        .collect();

    let mut out = String::from(NAMES_OPEN);
    out.push('\n');
    if !entries.is_empty() {
        out.push_str(&entries.join(",\n"));
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(NAMES_CLOSE);
    out
}

/// Regenerates the grid and the names literal of `html` from `manifest`.
#[must_use]
pub fn patch_document(
    html: &str,
    manifest: &Manifest,
    resolver: &ThumbnailResolver,
    url_prefix: &str,
) -> PatchOutcome {
    let region = match find_grid_region(html) {
        GridRegion::Found(region) => region,
        GridRegion::Missing => return PatchOutcome::GridNotFound,
        GridRegion::Unbalanced => return PatchOutcome::GridUnbalanced,
    };

    let spans = existing_span_classes(html);
    let (items, missing_thumbnails) = build_grid_items(manifest, resolver, &spans);

    let indent = line_indent(html, region.start);
    let grid = render_grid(&items, indent, url_prefix);

    let mut out = String::with_capacity(html.len() + grid.len());
    out.push_str(&html[..region.start]);
    out.push_str(&grid);
    out.push_str(&html[region.end..]);

    let names_updated = replace_project_names(&mut out, manifest);

    PatchOutcome::Patched {
        html: out,
        report: PatchReport {
            items,
            missing_thumbnails,
            names_updated,
        },
    }
}

/// Replaces the first names literal in place. Returns `false` if absent.
fn replace_project_names(html: &mut String, manifest: &Manifest) -> bool {
    let Some(start) = html.find(NAMES_OPEN) else {
        tracing::warn!("projectNames literal not found, leaving it unchanged");
        return false;
    };
    let Some(close) = html[start..].find(NAMES_CLOSE) else {
        tracing::warn!("projectNames literal is not closed, leaving it unchanged");
        return false;
    };
    let end = start + close + NAMES_CLOSE.len();

    let literal = render_project_names(manifest, line_indent(html, start));
    html.replace_range(start..end, &literal);
    true
}

/// Patches the HTML file at `path` in place.
///
/// The file is only written when the patched text differs from the current
/// one; when the grid cannot be located it is not written at all.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn patch_file(
    path: &Path,
    manifest: &Manifest,
    resolver: &ThumbnailResolver,
    url_prefix: &str,
) -> Result<PatchOutcome, SiteError> {
    let html = std::fs::read_to_string(path).map_err(SiteError::io("read", path))?;
    let outcome = patch_document(&html, manifest, resolver, url_prefix);

    match &outcome {
        PatchOutcome::Patched {
            html: patched,
            report,
        } => {
            if *patched == html {
                tracing::info!(path = %path.display(), "HTML already up to date");
            } else {
                write_file(path, patched)?;
                tracing::info!(
                    path = %path.display(),
                    items = report.items.len(),
                    "updated HTML grid"
                );
            }
        }
        PatchOutcome::GridNotFound => {
            tracing::warn!(path = %path.display(), "could not find grid in HTML, file left unchanged");
        }
        PatchOutcome::GridUnbalanced => {
            tracing::warn!(path = %path.display(), "grid has no closing tag, file left unchanged");
        }
    }

    Ok(outcome)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            // `};` closes the literal on the next run
            '}' => out.push_str("\\x7d"),
            _ => out.push(c),
        }
    }
    out
}
