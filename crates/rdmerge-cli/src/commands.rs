use colored::Colorize;

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let report = rdmerge_core::merge_resources(
        &cli.project_path,
        cli.project_name.as_deref(),
        &cli.source,
        &cli.target,
    )?;

    if report.written {
        println!(
            "{} Merged {} dictionaries ({} resources) into {}",
            "✓".green().bold(),
            report.documents.to_string().bold(),
            report.resources,
            report.target.display().to_string().yellow(),
        );
    } else {
        println!(
            "{} {} already up to date",
            "✓".green(),
            report.target.display().to_string().yellow(),
        );
    }
    Ok(())
}
