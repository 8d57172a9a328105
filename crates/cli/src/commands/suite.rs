use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use app_utils::{Settings, Suite};
use colored::*;

pub fn run(file: &Path, json: bool, settings: &Settings) -> anyhow::Result<ExitCode> {
    let suite =
        Suite::load(file).with_context(|| format!("Failed to load suite {}", file.display()))?;
    let report = suite.run(&settings.limits);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let title = report.name.as_deref().unwrap_or("unnamed suite");
        println!("{} {}", "Running suite:".bold(), title);
        for result in &report.results {
            if result.passed {
                println!("  {} {} ({})", "✓".green(), result.name, result.outcome);
            } else {
                println!(
                    "  {} {}: expected {:?}, got {}",
                    "✗".red(),
                    result.name,
                    result.expected,
                    result.outcome
                );
            }
        }

        println!();
        if report.all_passed() {
            println!("{} {} case(s) passed", "✓".green().bold(), report.passed());
        } else {
            println!(
                "{} {} passed, {} failed",
                "✗".red().bold(),
                report.passed(),
                report.failed()
            );
        }
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
