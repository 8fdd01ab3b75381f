//! Offline normalization of a local records file.

use anyhow::{Context as _, Result};
use cart_migrate_core::{MigrationDriver, SourceCollector, TargetSubmitter};
use cart_migrate_http::{JsonFileSource, JsonFileTarget};

use super::NormalizeArgs;
use crate::context::Context;

/// Run the normalize command.
///
/// Prints `{"products": [...]}` to stdout unless `--output` is given.
/// Skipped records are reported through the log.
pub async fn run(args: NormalizeArgs, ctx: &Context) -> Result<()> {
    let source = JsonFileSource::new(ctx.resolve_path(&args.input));
    let records = source
        .fetch_all()
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let batch = MigrationDriver::new().normalize_all(records);

    match args.output {
        Some(path) => {
            let target = JsonFileTarget::new(ctx.resolve_path(&path));
            let written = target.submit(&batch.products).await?;
            ctx.output.success(&format!(
                "Wrote {} products to {} ({} skipped)",
                written,
                path.display(),
                batch.failures.len()
            ));
        }
        None => {
            ctx.output
                .json(&serde_json::json!({ "products": batch.products }));
        }
    }

    Ok(())
}
