use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use app_utils::Settings;
use colored::*;
use core_sexp::{parse_with, print::pretty};

pub fn run(expr: Option<&str>, file: Option<&Path>, settings: &Settings) -> anyhow::Result<ExitCode> {
    let (source, bytes) = match (expr, file) {
        (_, Some(path)) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), bytes)
        }
        (Some(text), None) => ("argument".to_string(), text.as_bytes().to_vec()),
        (None, None) => anyhow::bail!("Nothing to parse: give an expression or --file"),
    };

    let expr = parse_with(&bytes, &settings.limits)
        .with_context(|| format!("Failed to parse {}", source))?;

    println!("{}", pretty(&expr));
    println!();
    println!(
        "  {} {} ({} bytes, depth {})",
        "✓".green(),
        expr.variant_name().bold(),
        bytes.len(),
        expr.depth()
    );
    Ok(ExitCode::SUCCESS)
}
