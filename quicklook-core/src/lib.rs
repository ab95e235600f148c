//! `QuickLook` Core - shared types and configuration schema
//!
//! This crate provides the site configuration types, the manifest model and
//! the error types shared by the `quicklook` CLI and its fuzz targets.

pub mod config;
pub mod error;
pub mod manifest;
