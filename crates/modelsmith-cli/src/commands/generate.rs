//! Implementation of the `modelsmith generate` command.
//!
//! Regenerates the whole generated area from the selected model version.

use tracing::{info, instrument};

use crate::{context::AppContext, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(tag = %ctx.global().tag, force = ctx.global().force))]
pub fn execute(ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let generator = ctx.model_generator()?;
    let request = ctx.artifact_request()?;

    let spinner = output.spinner(&format!("Generating model ({})...", request.reference));
    let report = generator.generate(&request);
    spinner.finish_and_clear();
    let report = report?;

    info!(
        reference = %report.reference,
        classes = report.classes,
        "Generation finished"
    );

    if let Some(warning) = &report.cache_warning {
        output.warning(&format!("Artifact not cached: {warning}"))?;
    }
    output.success(&format!(
        "Generated {} classes in {} packages from {}",
        report.classes,
        report.packages.len(),
        report.reference
    ))?;
    output.print(&format!("  {}", report.root.display()))?;

    Ok(())
}
