//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, SourceSpec, TargetSpec};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn mask(token: &Option<String>) -> String {
    match token {
        Some(t) if t.chars().count() > 4 => {
            format!("{}****", t.chars().take(4).collect::<String>())
        }
        Some(_) => "****".to_string(),
        None => "(unset)".to_string(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let mut config = ctx.config.clone();
        config.source.access_token = config.source.access_token.as_ref().map(|_| "****".into());
        config.target.access_token = config.target.access_token.as_ref().map(|_| "****".into());
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none found)"),
    }

    let source = &ctx.config.source;
    ctx.output.info("[source]");
    if let Some(url) = &source.url {
        ctx.output.kv("url", url);
    }
    if let Some(input) = &source.input {
        ctx.output.kv("input", &input.display().to_string());
    }
    ctx.output.kv("access_token", &mask(&source.access_token));
    ctx.output.kv("api_version", &source.api_version);
    ctx.output.kv("page_size", &source.page_size.to_string());

    let target = &ctx.config.target;
    ctx.output.info("[target]");
    if let Some(url) = &target.url {
        ctx.output.kv("url", url);
    }
    if let Some(output) = &target.output {
        ctx.output.kv("output", &output.display().to_string());
    }
    ctx.output.kv("access_token", &mask(&target.access_token));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let source = ctx.config.source_spec();
    let target = ctx.config.target_spec();

    if ctx.output.is_json() {
        let status = |described: Result<String, String>| match described {
            Ok(spec) => serde_json::json!({ "ok": true, "resolved": spec }),
            Err(error) => serde_json::json!({ "ok": false, "error": error }),
        };
        ctx.output.json(&serde_json::json!({
            "source": status(source.as_ref().map(describe_source).map_err(|e| e.to_string())),
            "target": status(target.as_ref().map(describe_target).map_err(|e| e.to_string())),
        }));
    } else {
        ctx.output.header("Validating configuration");
        match &source {
            Ok(spec) => ctx.output.success(&format!("source: {}", describe_source(spec))),
            Err(e) => ctx.output.warn(&format!("source: {}", e)),
        }
        match &target {
            Ok(spec) => ctx.output.success(&format!("target: {}", describe_target(spec))),
            Err(e) => ctx.output.warn(&format!("target: {}", e)),
        }
    }

    if source.is_err() || target.is_err() {
        bail!("Configuration is incomplete");
    }
    Ok(())
}

fn describe_source(spec: &SourceSpec) -> String {
    match spec {
        SourceSpec::Shopify {
            url, api_version, ..
        } => format!("{} (Admin API {})", url, api_version),
        SourceSpec::File(path) => format!("file {}", path.display()),
    }
}

fn describe_target(spec: &TargetSpec) -> String {
    match spec {
        TargetSpec::Http { url, .. } => url.clone(),
        TargetSpec::File(path) => format!("file {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask(&Some("shpat_abcdef".to_string())), "shpa****");
        assert_eq!(mask(&Some("abc".to_string())), "****");
        assert_eq!(mask(&None), "(unset)");
    }

    #[test]
    fn test_describe_specs() {
        let source = SourceSpec::Shopify {
            url: "https://shop.example.com".to_string(),
            access_token: "t".to_string(),
            api_version: "2024-01".to_string(),
            page_size: 250,
        };
        assert_eq!(
            describe_source(&source),
            "https://shop.example.com (Admin API 2024-01)"
        );
        assert_eq!(
            describe_target(&TargetSpec::File(PathBuf::from("out.json"))),
            "file out.json"
        );
    }
}
