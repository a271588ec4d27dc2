//! `advisor build` command implementation.

use std::path::{Path, PathBuf};

use advisor_config::{CliSettings, Config};
use advisor_page::{
    BuildConfig, BuildError, EditLink, PageBuilder, PageRendererConfig, Record,
};
use clap::Args;

use super::fields::stream_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Record JSON files to render.
    #[arg(required = true)]
    records: Vec<PathBuf>,

    /// Output directory for pages and `_redirects` (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover advisor.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL the pages will be served from; preview URLs get an edit link.
    #[arg(long, env = "ADVISOR_PAGE_URL")]
    page_url: Option<String>,

    /// Render the related-content sections (overrides config).
    #[arg(long)]
    related_content: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir.clone(),
            related_content: self.related_content.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let output_dir = &config.build_resolved.output_dir;
        output.output_dir(output_dir);

        let builder = PageBuilder::new(build_config(&config, self.page_url));
        let default_locale = config.stream.locales.first().map_or("en", String::as_str);

        tracing::debug!(records = self.records.len(), "Building pages");
        let mut built = 0;
        for path in &self.records {
            let record = read_record(path, default_locale)?;
            match builder.build(&record, output_dir) {
                Ok(page) => {
                    output.page_built(path, &page.path);
                    built += 1;
                }
                Err(
                    err @ (BuildError::EntityType { .. }
                    | BuildError::Locale { .. }
                    | BuildError::Path { .. }),
                ) => output.skipped(path, &err),
                Err(err) => return Err(err.into()),
            }
        }

        output.summary(built, output_dir);
        Ok(())
    }
}

fn read_record(path: &Path, default_locale: &str) -> Result<Record, CliError> {
    let json = std::fs::read_to_string(path)?;
    Ok(Record::from_json(&json)?.with_default_locale(default_locale))
}

fn build_config(config: &Config, page_url: Option<String>) -> BuildConfig {
    BuildConfig {
        stream: stream_config(config),
        renderer: PageRendererConfig {
            stylesheet: config.build_resolved.stylesheet.clone(),
            edit: EditLink {
                base_url: config.edit.base_url.clone(),
                preview_marker: config.edit.preview_marker.clone(),
            },
            related_content: config.sections.related_content,
        },
        page_url,
    }
}
