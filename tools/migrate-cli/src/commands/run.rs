//! Full migration: fetch, normalize, submit.

use anyhow::{bail, Context as _, Result};
use cart_migrate_core::{MigrationDriver, SourceCollector, TargetSubmitter};
use cart_migrate_http::{HttpTarget, JsonFileSource, JsonFileTarget, ShopifySource};

use super::RunArgs;
use crate::config::{SourceSpec, TargetSpec};
use crate::context::Context;

/// Run the migrate command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    args.apply(&mut config);

    let source = build_source(config.source_spec()?, ctx);
    let target = build_target(config.target_spec()?, ctx);

    let report = MigrationDriver::new()
        .run(source.as_ref(), target.as_ref())
        .await
        .context("Migration aborted")?;

    ctx.output.summary(&report);

    if args.strict && !report.is_complete() {
        bail!("{} source records could not be migrated", report.failed_count());
    }

    Ok(())
}

fn build_source(spec: SourceSpec, ctx: &Context) -> Box<dyn SourceCollector> {
    match spec {
        SourceSpec::Shopify {
            url,
            access_token,
            api_version,
            page_size,
        } => {
            ctx.output.info(&format!("Reading products from {}", url));
            Box::new(
                ShopifySource::new(url, access_token)
                    .with_api_version(api_version)
                    .with_page_size(page_size),
            )
        }
        SourceSpec::File(path) => {
            let path = ctx.resolve_path(&path);
            ctx.output
                .info(&format!("Reading products from {}", path.display()));
            Box::new(JsonFileSource::new(path))
        }
    }
}

fn build_target(spec: TargetSpec, ctx: &Context) -> Box<dyn TargetSubmitter> {
    match spec {
        TargetSpec::Http { url, access_token } => {
            ctx.output.info(&format!("Submitting products to {}", url));
            Box::new(HttpTarget::new(url, access_token))
        }
        TargetSpec::File(path) => {
            let path = ctx.resolve_path(&path);
            ctx.output
                .info(&format!("Writing products to {}", path.display()));
            Box::new(JsonFileTarget::new(path))
        }
    }
}
