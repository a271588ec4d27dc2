//! Writes one rendered profile page to an output directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::page::{PageRenderer, PageRendererConfig};
use crate::path::output_file;
use crate::stream::StreamConfig;
use crate::Record;

/// Redirect rules file in the output directory.
pub const REDIRECTS_FILE: &str = "_redirects";

/// Characters escaped in redirect rule paths.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Configuration for page building.
#[derive(Clone, Debug, Default)]
pub struct BuildConfig {
    pub stream: StreamConfig,
    pub renderer: PageRendererConfig,
    /// URL the page will be viewed at, when known.
    pub page_url: Option<String>,
}

/// Error returned by the page builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record {id} has entity type {entity_type}, not selected by the stream filter")]
    EntityType { id: String, entity_type: String },

    #[error("Record {id} has locale {locale}, not one of the stream locales")]
    Locale { id: String, locale: String },

    #[error("Record {id} resolves to {path}, which is outside the output directory")]
    Path { id: String, path: String },
}

/// Summary of a built page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOutput {
    /// Path the page lives at.
    pub path: String,
    /// Written HTML file.
    pub file: PathBuf,
    /// Legacy paths redirecting to the page.
    pub redirects: Vec<String>,
}

/// Builds a single profile page.
pub struct PageBuilder {
    stream: StreamConfig,
    renderer: PageRenderer,
    page_url: Option<String>,
}

impl PageBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            stream: config.stream,
            renderer: PageRenderer::new(config.renderer),
            page_url: config.page_url,
        }
    }

    /// Render `record` and write it under `output_dir`.
    ///
    /// Redirect rules are appended to `{output_dir}/_redirects`; rules already
    /// present are not repeated.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::EntityType` or `BuildError::Locale` if the stream
    /// does not select the record, `BuildError::Path` if the page path leaves
    /// `output_dir`, `BuildError::Io` if writing fails.
    pub fn build(&self, record: &Record, output_dir: &Path) -> Result<BuildOutput, BuildError> {
        self.check_stream(record)?;

        let page = self.renderer.render(record, self.page_url.as_deref());
        let relative = output_file(&page.path);
        if !is_contained(&relative) {
            tracing::warn!(id = %record.id, path = %page.path, "Page path escapes output directory");
            return Err(BuildError::Path {
                id: record.id.clone(),
                path: page.path,
            });
        }
        let file = output_dir.join(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, &page.html)?;
        tracing::info!(id = %record.id, file = %file.display(), "Wrote page");

        write_redirects(output_dir, &page.path, &page.redirects)?;

        Ok(BuildOutput {
            path: page.path,
            file,
            redirects: page.redirects,
        })
    }

    fn check_stream(&self, record: &Record) -> Result<(), BuildError> {
        if !self.stream.filter.admits(record) {
            let entity_type = record.entity_type().unwrap_or_default().to_owned();
            tracing::warn!(id = %record.id, %entity_type, "Record rejected by stream filter");
            return Err(BuildError::EntityType {
                id: record.id.clone(),
                entity_type,
            });
        }
        if !self.stream.localization.admits(record) {
            let locale = record.locale().unwrap_or_default().to_owned();
            tracing::warn!(id = %record.id, %locale, "Record rejected by stream localization");
            return Err(BuildError::Locale {
                id: record.id.clone(),
                locale,
            });
        }
        Ok(())
    }
}

/// True if `path` only descends, so joining it keeps us under the base.
fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Format one redirect rule: `/{from} /{to} 301`.
pub fn redirect_rule(from: &str, to: &str) -> String {
    format!(
        "/{} /{} 301",
        utf8_percent_encode(from.trim_start_matches('/'), PATH_SET),
        utf8_percent_encode(to.trim_start_matches('/'), PATH_SET)
    )
}

fn write_redirects(output_dir: &Path, to: &str, from: &[String]) -> Result<(), BuildError> {
    let file = output_dir.join(REDIRECTS_FILE);
    let mut content = match fs::read_to_string(&file) {
        Ok(existing) => existing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let existing: HashSet<String> = content.lines().map(str::to_owned).collect();

    let mut added = 0;
    for path in from {
        let rule = redirect_rule(path, to);
        if existing.contains(&rule) {
            continue;
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&rule);
        content.push('\n');
        added += 1;
    }

    if added > 0 {
        fs::create_dir_all(output_dir)?;
        fs::write(&file, content)?;
        tracing::debug!(added, file = %file.display(), "Updated redirect rules");
    }
    Ok(())
}
