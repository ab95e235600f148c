//! `QuickLook` - asset maintenance for the design quick-look portfolio
//!
//! Keeps the portfolio's derived files (project manifests, the thumbnail
//! grid of `index.html`, organized asset names, seeded thumbnails) in step
//! with the project folders on disk.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod site;
