//! `modelsmith listPackages`, `listTags` and `listBranches`.
//!
//! Each prints bare names, one per line, so the output can be piped.

use tracing::instrument;

use crate::{context::AppContext, error::CliResult, output::OutputManager};

/// Distinct packages of the selected model version, in first-seen order.
#[instrument(skip_all, fields(tag = %ctx.global().tag))]
pub fn packages(ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let loader = ctx.model_loader()?;
    let request = ctx.artifact_request()?;

    let spinner = output.spinner(&format!("Loading model ({})...", request.reference));
    let loaded = loader.load(&request);
    spinner.finish_and_clear();
    let loaded = loaded?;

    if let Some(warning) = &loaded.cache_warning {
        output.warning(&format!("Artifact not cached: {warning}"))?;
    }
    output.list(&loaded.inventory.packages())?;
    Ok(())
}

#[instrument(skip_all)]
pub fn tags(ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let catalog = ctx.catalog()?;
    let spinner = output.spinner(&format!("Fetching tags of {}...", catalog.repository()));
    let tags = catalog.tags();
    spinner.finish_and_clear();
    output.list(&tags?)?;
    Ok(())
}

#[instrument(skip_all)]
pub fn branches(ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let catalog = ctx.catalog()?;
    let spinner = output.spinner(&format!(
        "Fetching branches of {}...",
        catalog.repository()
    ));
    let branches = catalog.branches();
    spinner.finish_and_clear();
    output.list(&branches?)?;
    Ok(())
}
