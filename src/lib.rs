//! Rust client for the Nature Dopes image/species catalog API.
//!
//! The library has three parts:
//! a small JSON configuration store (`~/.naturedopes-cli/config.json`),
//! a blocking [`Client`] that sends every request through one executor,
//! and typed accessors for images and API keys.
//!
//! ## Quick start
//! - Configure the base URL and key with `naturedopes-cli config set api-url <url>` /
//!   `config set api-key <key>`, or through the `API_URL` / `API_KEY` environment variables
//!   when no config file exists yet.
//! - Build a [`Client`] from the loaded [`Config`] and call an accessor.
//!
//! ```no_run
//! use anyhow::Result;
//! use naturedopes::{Client, config};
//!
//! fn main() -> Result<()> {
//!     let cfg = config::load()?;
//!     let client = Client::from_config(&cfg)?;
//!     for image in client.search_images("Quercus robur", 0)? {
//!         println!("{} at ({}, {})", image.species_name, image.gps_lat, image.gps_long);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod cli;
mod client;
pub mod commands;
pub mod config;
mod error;
mod images;
mod keys;
mod models;
mod util;

pub use client::{API_KEY_HEADER, Client, HttpRequest, HttpResponse, Transport};
pub use config::{Config, ConfigKey, ConfigStore};
pub use error::{BoxError, Error, Result};
pub use models::{ApiKey, Image};
