#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![allow(clippy::module_inception)]

pub mod logger;

pub mod config;
pub mod export;
pub mod html;
pub mod markdown;
pub mod model;
pub mod site;

pub mod error {
    pub use anyhow::{Error, Result};

    pub use crate::export::ImportError;
}
