#![doc = "gallery-source: build-time gallery data from Immich or Cloudinary."]

//! Fetches album and asset metadata from a remote photo backend and normalizes it into a flat,
//! deduplicated, sortable list of [`format::Image`] records for a static site generator.
//!
//! # Usage
//! Build a store with [`store::build_store`] from a [`load_config::load_config`] result, or wire
//! an [`aggregate::ImmichGallery`] / [`cloudinary::CloudinaryGallery`] by hand, then call
//! [`store::ImageStore::get_images`] and [`store::ImageStore::get_collections`].

pub mod aggregate;
pub mod album;
pub mod cli;
pub mod client;
pub mod cloudinary;
pub mod config;
pub mod contract;
pub mod error;
pub mod format;
pub mod immich_types;
pub mod load_config;
pub mod store;

pub use cli::{run, Cli, Commands};
pub use error::{FetchError, GalleryError, MappingError};
