use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};
use toml::{value::Table, Value};

use crate::{
    error::{Error, Result},
    model::Template,
};

pub const DEFAULT_FONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&display=swap";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where and what to export.
    pub export: ExportConfig,

    /// Options for the generated static site.
    pub site: SiteConfig,

    /// Any remaining tables, for renderers that bring their own settings.
    rest: Value,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let mut buffer = String::new();
        File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?
            .read_to_string(&mut buffer)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Config::from_str(&buffer)
    }

    /// Read a table that is not part of the built-in configuration.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .rest
            .get(key)
            .with_context(|| format!("Config has no `{key}` table"))?;

        value
            .clone()
            .try_into()
            .with_context(|| format!("Failed to deserialize config table `{key}`"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            site: SiteConfig::default(),
            rest: Value::Table(Table::default()),
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = Value::deserialize(deserializer)?;
        let Value::Table(mut table) = raw else {
            return Err(D::Error::custom("coursebook.toml must always be a toml table"));
        };

        let export: ExportConfig = table
            .remove("export")
            .map(|export| export.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let site: SiteConfig = table
            .remove("site")
            .map(|site| site.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        Ok(Config {
            export,
            site,
            rest: Value::Table(table),
        })
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).with_context(|| "Attempted to parse invalid configuration file")
    }
}

/// An output format the exporter knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Site,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Output directory, relative to the working directory.
    pub destination: PathBuf,
    /// Renderers to run, in order.
    pub formats: Vec<Format>,
    /// File name of the JSON artifact.
    pub json_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("./dist"),
            formats: vec![Format::Json, Format::Site],
            json_file: String::from("course.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Stylesheet link for the web font every page loads.
    pub font_url: String,
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// Overrides the template chosen by the course itself.
    pub template: Option<Template>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            font_url: String::from(DEFAULT_FONT_URL),
            lang: String::from("en"),
            template: None,
        }
    }
}
