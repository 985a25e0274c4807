//! cbook: export course documents as JSON and static HTML sites.

use anyhow::Context;
use clap::{ColorChoice, Parser, Subcommand};
use coursebook::{
    config::{Config, Format},
    error::Result,
    export::{self, JsonRenderer, RenderContext, Renderer, SiteRenderer},
    log, logger,
    model::Course,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = "coursebook.toml";

/// Course document exporter
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Export a course as JSON and/or a static site
    #[command(visible_alias = "e")]
    Export {
        /// Course document in JSON form
        #[arg(value_hint = clap::ValueHint::FilePath)]
        course: PathBuf,

        /// Config file path (default: coursebook.toml when present)
        #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
        config: Option<PathBuf>,

        /// Output directory, overrides the configured destination
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        dest: Option<PathBuf>,

        /// Formats to export, overrides the configured formats
        #[arg(short, long = "format", value_enum)]
        formats: Vec<Format>,
    },

    /// Validate a course document and print a summary
    #[command(visible_alias = "c")]
    Check {
        /// Course document in JSON form
        #[arg(value_hint = clap::ValueHint::FilePath)]
        course: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    logger::set_verbose(cli.verbose);

    match cli.command {
        Commands::Export {
            course,
            config,
            dest,
            formats,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(dest) = dest {
                config.export.destination = dest;
            }
            if !formats.is_empty() {
                config.export.formats = formats;
            }

            export_course(&course, &config)
        }
        Commands::Check { course } => check_course(&course),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(CONFIG_FILE).is_file() => Config::load(CONFIG_FILE),
        None => Ok(Config::default()),
    }
}

fn read_course(path: &Path) -> Result<Course> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read course file {}", path.display()))?;

    export::deserialize(&json)
        .with_context(|| format!("Failed to import course file {}", path.display()))
}

fn export_course(path: &Path, config: &Config) -> Result<()> {
    let course = read_course(path)?;
    let ctx = RenderContext::new(&course, config);
    let destination = &config.export.destination;

    for format in &config.export.formats {
        let renderer: Box<dyn Renderer> = match format {
            Format::Json => Box::new(JsonRenderer),
            Format::Site => Box::new(SiteRenderer),
        };

        let artifacts = renderer
            .render(&ctx)
            .with_context(|| format!("Renderer `{}` failed", renderer.name()))?;

        for artifact in artifacts {
            let target = artifact.target(destination)?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&target, artifact.contents)
                .with_context(|| format!("Failed to write {}", target.display()))?;

            log!("export"; "{} -> {}", renderer.name(), target.display());
        }
    }

    Ok(())
}

fn check_course(path: &Path) -> Result<()> {
    let course = read_course(path)?;

    log!("check"; "{} ({})", course.title, course.slug);
    log!(
        "check";
        "{} sections, {} lessons, {} minutes, template {}",
        course.sections.len(),
        course.lesson_count(),
        course.total_minutes(),
        course.template
    );

    Ok(())
}
