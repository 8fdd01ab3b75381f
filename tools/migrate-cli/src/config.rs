//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cart_migrate_http::{DEFAULT_API_VERSION, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors resolving the effective source and target.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No source configured: set source.url or source.input (or pass --source-url / --input)")]
    MissingSource,

    #[error("No target configured: set target.url or target.output (or pass --target-url / --output)")]
    MissingTarget,

    #[error("Missing access token for {0}")]
    MissingToken(&'static str),

    #[error("Both a URL and a file are configured for {0}; pick one")]
    Conflicting(&'static str),
}

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where source records come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Where canonical products go.
    #[serde(default)]
    pub target: TargetConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Anchor relative file paths at `base` (the config file's directory).
    pub fn rebase_paths(&mut self, base: &Path) {
        let rebase = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut().filter(|p| p.is_relative()) {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.source.input);
        rebase(&mut self.target.output);
    }

    /// Resolve the source to read from.
    pub fn source_spec(&self) -> Result<SourceSpec, ConfigError> {
        let source = &self.source;
        match (&source.url, &source.input) {
            (Some(_), Some(_)) => Err(ConfigError::Conflicting("source")),
            (None, Some(path)) => Ok(SourceSpec::File(path.clone())),
            (Some(url), None) => {
                let access_token = source
                    .access_token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(ConfigError::MissingToken("source"))?;
                Ok(SourceSpec::Shopify {
                    url: url.clone(),
                    access_token,
                    api_version: source.api_version.clone(),
                    page_size: source.page_size,
                })
            }
            (None, None) => Err(ConfigError::MissingSource),
        }
    }

    /// Resolve the target to submit to.
    pub fn target_spec(&self) -> Result<TargetSpec, ConfigError> {
        let target = &self.target;
        match (&target.url, &target.output) {
            (Some(_), Some(_)) => Err(ConfigError::Conflicting("target")),
            (None, Some(path)) => Ok(TargetSpec::File(path.clone())),
            (Some(url), None) => {
                let access_token = target
                    .access_token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(ConfigError::MissingToken("target"))?;
                Ok(TargetSpec::Http {
                    url: url.clone(),
                    access_token,
                })
            }
            (None, None) => Err(ConfigError::MissingTarget),
        }
    }
}

/// Source platform settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Store base URL (e.g. https://shop.myshopify.com).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Admin API access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Admin API version.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Read records from a local JSON file instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            access_token: None,
            api_version: default_api_version(),
            page_size: default_page_size(),
            input: None,
        }
    }
}

/// Target platform settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Endpoint receiving `{"products": [...]}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Bearer token for the target endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Write products to a local JSON file instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Resolved source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Shopify {
        url: String,
        access_token: String,
        api_version: String,
        page_size: u32,
    },
    File(PathBuf),
}

/// Resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    Http { url: String, access_token: String },
    File(PathBuf),
}

/// Generate a starter config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# cart-migrate configuration

[source]
# url = "https://your-store.myshopify.com"
# access_token = "shpat_..."
api_version = "{}"
page_size = {}
# input = "products.json"

[target]
# url = "https://target.example.com/api/products"
# access_token = "..."
output = "migrated-products.json"
"#,
        DEFAULT_API_VERSION, MAX_PAGE_SIZE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = CliConfig::parse("migrate.toml", "").unwrap();
        assert_eq!(config.source.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.source.page_size, MAX_PAGE_SIZE);
        assert!(config.target.url.is_none());
    }

    #[test]
    fn test_parse_toml_sections() {
        let config = CliConfig::parse(
            "migrate.toml",
            r#"
[source]
url = "https://shop.example.com"
access_token = "shpat_1"
page_size = 50

[target]
url = "https://target.example.com/products"
access_token = "tok"
"#,
        )
        .unwrap();

        assert_eq!(
            config.source_spec().unwrap(),
            SourceSpec::Shopify {
                url: "https://shop.example.com".to_string(),
                access_token: "shpat_1".to_string(),
                api_version: DEFAULT_API_VERSION.to_string(),
                page_size: 50,
            }
        );
        assert_matches!(config.target_spec(), Ok(TargetSpec::Http { .. }));
    }

    #[test]
    fn test_parse_json_config() {
        let config = CliConfig::parse(
            "migrate.json",
            r#"{"source": {"input": "in.json"}, "target": {"output": "out.json"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.source_spec().unwrap(),
            SourceSpec::File(PathBuf::from("in.json"))
        );
        assert_eq!(
            config.target_spec().unwrap(),
            TargetSpec::File(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn test_rebase_relative_paths() {
        let mut config = CliConfig::default();
        config.source.input = Some(PathBuf::from("data/in.json"));
        config.target.output = Some(PathBuf::from("/abs/out.json"));
        config.rebase_paths(Path::new("/project"));

        assert_eq!(config.source.input, Some(PathBuf::from("/project/data/in.json")));
        assert_eq!(config.target.output, Some(PathBuf::from("/abs/out.json")));
    }

    #[test]
    fn test_missing_source_and_target() {
        let config = CliConfig::default();
        assert_eq!(config.source_spec(), Err(ConfigError::MissingSource));
        assert_eq!(config.target_spec(), Err(ConfigError::MissingTarget));
    }

    #[test]
    fn test_url_without_token() {
        let mut config = CliConfig::default();
        config.source.url = Some("https://shop.example.com".to_string());
        config.source.access_token = Some("  ".to_string());
        assert_eq!(config.source_spec(), Err(ConfigError::MissingToken("source")));
    }

    #[test]
    fn test_url_and_file_conflict() {
        let mut config = CliConfig::default();
        config.target.url = Some("https://target.example.com".to_string());
        config.target.output = Some(PathBuf::from("out.json"));
        assert_eq!(config.target_spec(), Err(ConfigError::Conflicting("target")));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = CliConfig::parse("migrate.toml", &generate_default_config()).unwrap();
        assert_eq!(
            config.target_spec().unwrap(),
            TargetSpec::File(PathBuf::from("migrated-products.json"))
        );
        assert_eq!(config.source_spec(), Err(ConfigError::MissingSource));
    }
}
