//! `advisor fields` command implementation.

use std::path::PathBuf;

use advisor_config::Config;
use advisor_page::{Localization, STREAM_FIELDS, StreamConfig, StreamFilter};
use clap::Args;

use crate::error::CliError;

/// Arguments for the fields command.
#[derive(Args)]
pub(crate) struct FieldsArgs {
    /// Path to configuration file (default: auto-discover advisor.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl FieldsArgs {
    #[allow(clippy::print_stdout)]
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let json = serde_json::to_string_pretty(&stream_config(&config))?;
        println!("{json}");
        Ok(())
    }
}

/// Stream configuration described by the `[stream]` section.
pub(crate) fn stream_config(config: &Config) -> StreamConfig {
    StreamConfig {
        id: config.stream.id.clone(),
        fields: STREAM_FIELDS.iter().map(|&f| f.to_owned()).collect(),
        filter: StreamFilter {
            entity_types: config.stream.entity_types.clone(),
            saved_filter_ids: config.stream.saved_filter_ids.clone(),
        },
        localization: Localization {
            locales: config.stream.locales.clone(),
            primary: config.stream.primary,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config_matches_default_stream() {
        assert_eq!(stream_config(&Config::default()), StreamConfig::default());
    }

    #[test]
    fn test_stream_json_shape() {
        let value = serde_json::to_value(stream_config(&Config::default())).unwrap();
        assert_eq!(value["$id"], "my-stream-id-1");
        assert_eq!(value["filter"]["entityTypes"][0], "financialProfessional");
        assert_eq!(value["filter"]["savedFilterIds"][0], "1306250257");
        assert_eq!(value["localization"]["locales"][0], "en");
        assert_eq!(value["localization"]["primary"], false);
        assert!(
            value["fields"]
                .as_array()
                .unwrap()
                .iter()
                .any(|f| f == "c_associatedBlogs.name")
        );
    }
}
