use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use app_utils::Settings;

use super::parse_arg;

pub fn run(expr: &str, settings: &Settings) -> anyhow::Result<ExitCode> {
    let expr = parse_arg("expression", expr, &settings.limits)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&expr.to_canonical())
        .and_then(|()| stdout.write_all(b"\n"))
        .context("Failed to write to stdout")?;
    Ok(ExitCode::SUCCESS)
}
