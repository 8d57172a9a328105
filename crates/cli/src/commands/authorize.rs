use std::process::ExitCode;

use app_utils::Settings;
use colored::*;
use core_sexp::{Decision, Matcher};
use serde_json::json;

use super::parse_arg;

pub fn run(rule: &str, query: &str, json: bool, settings: &Settings) -> anyhow::Result<ExitCode> {
    let rule = parse_arg("rule", rule, &settings.limits)?;
    let query = parse_arg("query", query, &settings.limits)?;

    let result = Matcher::from_limits(&settings.limits).authorize(&query, &rule);

    if json {
        let value = match &result {
            Ok(Decision::Allow) => json!({ "decision": "allow" }),
            Ok(Decision::Deny(reason)) => json!({
                "decision": "deny",
                "reason": reason.as_ref().map(ToString::to_string),
            }),
            Err(err) => json!({ "decision": "error", "reason": err.to_string() }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &result {
            Ok(Decision::Allow) => println!("{} {}", "✓".green(), "allow".green().bold()),
            Ok(Decision::Deny(None)) => println!("{} {}", "✗".red(), "deny".red().bold()),
            Ok(Decision::Deny(Some(reason))) => {
                println!("{} {}: {}", "✗".red(), "deny".red().bold(), reason)
            }
            Err(err) => println!("{} {}: {}", "⚠".yellow(), "error".yellow().bold(), err),
        }
    }

    Ok(match result {
        Ok(Decision::Allow) => ExitCode::SUCCESS,
        Ok(Decision::Deny(_)) => ExitCode::from(1),
        Err(_) => ExitCode::from(2),
    })
}
