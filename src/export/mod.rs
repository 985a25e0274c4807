//! Renderers that turn a normalized course into output artifacts.

pub mod json;

pub use json::{deserialize, normalize, serialize, ImportError};

use anyhow::bail;
use std::path::{Component, Path, PathBuf};

use crate::{config::Config, error::Result, model::Course, site::SiteGenerator};

/// A single output file, with its path relative to the export destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Where the artifact lands below `destination`. Paths that are absolute or
    /// step outside the destination are rejected.
    pub fn target(&self, destination: &Path) -> Result<PathBuf> {
        let path = Path::new(&self.path);
        let plain = path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if self.path.is_empty() || !plain {
            bail!("Artifact path `{}` leaves the export destination", self.path);
        }

        Ok(destination.join(path))
    }
}

pub trait Renderer {
    fn name(&self) -> &str;

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>>;
}

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub course: &'a Course,
    pub config: &'a Config,
}

impl<'a> RenderContext<'a> {
    pub fn new(course: &'a Course, config: &'a Config) -> Self {
        Self { course, config }
    }
}

/// Writes the course as a single pretty-printed JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let json = json::to_json(ctx.course)?;

        Ok(vec![Artifact::new(ctx.config.export.json_file.clone(), json)])
    }
}

/// Writes the course as a static site, one artifact per page.
#[derive(Debug, Default, Clone, Copy)]
pub struct SiteRenderer;

impl Renderer for SiteRenderer {
    fn name(&self) -> &str {
        "site"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let site = SiteGenerator::from_config(&ctx.config.site).generate(ctx.course);

        Ok(site
            .pages
            .into_iter()
            .map(|page| Artifact::new(page.filename, page.html))
            .collect())
    }
}
