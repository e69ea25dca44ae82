//! Implementation of the `modelsmith setup` command.
//!
//! Responsibility: translate CLI arguments into a [`SetupRequest`], call the
//! core scaffold service, and display results. No business logic lives here.

use tracing::{info, instrument};

use modelsmith_core::application::{SetupReport, SetupRequest};

use crate::{cli::SetupArgs, context::AppContext, error::CliResult, output::OutputManager};

/// Execute the `modelsmith setup` command.
///
/// A missing `--name` or `--component` is passed on as an empty string and
/// rejected by the scaffolder before anything is written.
#[instrument(skip_all, fields(name = ?args.name, component = ?args.component))]
pub fn execute(args: SetupArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let request = build_request(args, ctx)?;
    let service = ctx.scaffold_service()?;

    output.header(&format!(
        "Setting up {}...",
        service.project_path(&request.name).display()
    ))?;

    let spinner = output.spinner(&format!(
        "Scaffolding {} / {} ({})...",
        request.component, request.package, request.artifact.reference
    ));
    let report = service.setup(&request);
    spinner.finish_and_clear();
    let report = report?;

    info!(project = %report.project_path.display(), "Setup completed");
    show_report(&report, output)?;
    Ok(())
}

fn build_request(args: SetupArgs, ctx: &AppContext) -> CliResult<SetupRequest> {
    Ok(SetupRequest {
        name: args.name.unwrap_or_default(),
        component: args.component.unwrap_or_default(),
        package: args.package,
        include_person: args.include_person,
        artifact: ctx.artifact_request()?,
    })
}

fn show_report(report: &SetupReport, output: &OutputManager) -> CliResult<()> {
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    output.success(&format!(
        "Project created at {} (model {})",
        report.project_path.display(),
        report.reference
    ))?;

    let models: Vec<&str> = report.models.iter().map(|m| m.name.as_str()).collect();
    output.print(&format!("  Models: {}", models.join(", ")))?;
    if let Some(commit) = &report.commit {
        output.print(&format!("  Commit: {commit}"))?;
    }
    Ok(())
}
