//! Manifest model
//!
//! A manifest maps project ids to the ordered image file names of each
//! project. It is a derived cache of the asset tree and is rewritten in full
//! whenever it is regenerated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Project id → ordered image file names.
///
/// Serializes as a plain JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    projects: IndexMap<String, Vec<String>>,
}

impl Manifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of string arrays.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Renders the manifest as 2-space indented JSON without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Inserts or replaces a project's image list.
    ///
    /// Returns the previous list when the project was already present.
    pub fn insert(&mut self, project_id: impl Into<String>, images: Vec<String>) -> Option<Vec<String>> {
        self.projects.insert(project_id.into(), images)
    }

    /// Returns the image list of a project.
    #[must_use]
    pub fn images(&self, project_id: &str) -> Option<&[String]> {
        self.projects.get(project_id).map(Vec::as_slice)
    }

    /// Returns `true` if the project is listed.
    #[must_use]
    pub fn contains(&self, project_id: &str) -> bool {
        self.projects.contains_key(project_id)
    }

    /// Iterates over project ids in manifest order.
    pub fn project_ids(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    /// Returns the project ids in lexicographic order.
    #[must_use]
    pub fn sorted_project_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.project_ids().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates over `(project id, images)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.projects
            .iter()
            .map(|(id, images)| (id.as_str(), images.as_slice()))
    }

    /// Number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns `true` if no project is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Total number of images across all projects.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.projects.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            projects: iter.into_iter().collect(),
        }
    }
}

/// Discipline → manifest, in scan order.
///
/// The flat layout is represented by a single group keyed by the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteManifest {
    groups: IndexMap<String, Manifest>,
}

impl SiteManifest {
    /// Creates an empty site manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the manifest of one discipline (or of the flat projects folder).
    pub fn insert(&mut self, discipline: impl Into<String>, manifest: Manifest) {
        self.groups.insert(discipline.into(), manifest);
    }

    /// Returns the manifest of one discipline.
    #[must_use]
    pub fn get(&self, discipline: &str) -> Option<&Manifest> {
        self.groups.get(discipline)
    }

    /// Iterates over `(discipline, manifest)` pairs in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Manifest)> {
        self.groups.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no group was scanned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Merges every group into one project manifest.
    ///
    /// When two disciplines hold the same project id the later one wins; the
    /// shadowed ids are returned alongside the merged manifest.
    #[must_use]
    pub fn flatten(&self) -> (Manifest, Vec<String>) {
        let mut merged = Manifest::new();
        let mut shadowed = Vec::new();
        for manifest in self.groups.values() {
            for (id, images) in manifest.iter() {
                if merged.insert(id, images.to_vec()).is_some() {
                    shadowed.push(id.to_string());
                }
            }
        }
        (merged, shadowed)
    }
}
