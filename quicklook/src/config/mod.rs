//! Configuration loading and validation
//!
//! The schema lives in `quicklook-core`; this module reads `quicklook.yaml`,
//! expands environment variables and validates the result against the site.

pub mod loader;
pub mod validation;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE, LoadResult, LoadWarning, LoaderOptions};
pub use quicklook_core::config::*;
pub use validation::{ValidationResult, Validator};
