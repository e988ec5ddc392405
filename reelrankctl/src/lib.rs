//! Command line front end for reelrank.
//!
//! The binary is a thin shell over this library: [`config`] resolves the
//! layered settings, [`render`] turns a summary into text or JSON.

pub mod config;
pub mod render;

pub use config::{
    ConfigLoad, ConfigLoader, ConfigOverrides, ConfigSource,
    error::ConfigLoadError,
};
pub use render::{OutputFormat, render};
