//! CLI command implementations.

pub mod config;
pub mod normalize;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::CliConfig;

/// Arguments for the run command. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Source store base URL.
    #[arg(long)]
    pub source_url: Option<String>,

    /// Source Admin API access token.
    #[arg(long)]
    pub source_token: Option<String>,

    /// Source Admin API version.
    #[arg(long)]
    pub api_version: Option<String>,

    /// Records per source page (1-250).
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Read source records from a local JSON file.
    #[arg(short, long, conflicts_with = "source_url")]
    pub input: Option<PathBuf>,

    /// Target endpoint URL.
    #[arg(long)]
    pub target_url: Option<String>,

    /// Target bearer token.
    #[arg(long)]
    pub target_token: Option<String>,

    /// Write canonical products to a local JSON file instead of posting.
    #[arg(short, long, conflicts_with = "target_url")]
    pub output: Option<PathBuf>,

    /// Exit with an error when any record was skipped.
    #[arg(long)]
    pub strict: bool,
}

impl RunArgs {
    /// Overlay flags onto the loaded config.
    pub fn apply(&self, config: &mut CliConfig) {
        // Choosing a source or target kind on the command line replaces the file's choice.
        if self.source_url.is_some() || self.input.is_some() {
            config.source.url = self.source_url.clone();
            config.source.input = self.input.clone();
        }
        if let Some(token) = &self.source_token {
            config.source.access_token = Some(token.clone());
        }
        if let Some(version) = &self.api_version {
            config.source.api_version = version.clone();
        }
        if let Some(page_size) = self.page_size {
            config.source.page_size = page_size;
        }

        if self.target_url.is_some() || self.output.is_some() {
            config.target.url = self.target_url.clone();
            config.target.output = self.output.clone();
        }
        if let Some(token) = &self.target_token {
            config.target.access_token = Some(token.clone());
        }
    }
}

/// Arguments for the normalize command.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// JSON file of source records (array or `{"products": [...]}`).
    pub input: PathBuf,

    /// Write canonical products here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Check that a source and a target resolve.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SourceSpec, TargetSpec};

    fn file_config() -> CliConfig {
        let mut config = CliConfig::default();
        config.source.url = Some("https://shop.example.com".to_string());
        config.source.access_token = Some("shpat_file".to_string());
        config.target.output = Some(PathBuf::from("out.json"));
        config
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = file_config();
        let args = RunArgs {
            source_token: Some("shpat_flag".to_string()),
            page_size: Some(10),
            target_url: Some("https://target.example.com/products".to_string()),
            target_token: Some("tok".to_string()),
            ..Default::default()
        };
        args.apply(&mut config);

        assert_eq!(
            config.source_spec().unwrap(),
            SourceSpec::Shopify {
                url: "https://shop.example.com".to_string(),
                access_token: "shpat_flag".to_string(),
                api_version: cart_migrate_http::DEFAULT_API_VERSION.to_string(),
                page_size: 10,
            }
        );
        // --target-url replaces the file's output path.
        assert_eq!(
            config.target_spec().unwrap(),
            TargetSpec::Http {
                url: "https://target.example.com/products".to_string(),
                access_token: "tok".to_string(),
            }
        );
    }

    #[test]
    fn test_input_flag_replaces_source_url() {
        let mut config = file_config();
        let args = RunArgs {
            input: Some(PathBuf::from("records.json")),
            ..Default::default()
        };
        args.apply(&mut config);

        assert_eq!(
            config.source_spec().unwrap(),
            SourceSpec::File(PathBuf::from("records.json"))
        );
        assert_eq!(
            config.target_spec().unwrap(),
            TargetSpec::File(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn test_no_flags_keeps_file() {
        let mut config = file_config();
        RunArgs::default().apply(&mut config);
        assert!(config.source.url.is_some());
        assert_eq!(config.target.output, Some(PathBuf::from("out.json")));
    }
}
