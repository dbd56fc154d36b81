//! # Birdlog Common Library
//!
//! Shared code for the birdlog services including:
//! - Database initialization, schema and migrations
//! - Record models (species, sightings, checklists)
//! - Bootstrap configuration loading
//! - CSV seed import

pub mod config;
pub mod db;
pub mod error;
pub mod seed;

pub use error::{Error, Result};
