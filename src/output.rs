//! Output rendering for check and verify commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-finding fields and a top-level summary.

use crate::models::verify::VerifyResult;
use crate::models::{Finding, Severity, Summary};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print scan findings in the requested format.
pub fn print_findings(findings: &[Finding], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_findings_json(findings)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for f in findings {
                let sev = match f.severity {
                    Severity::High => {
                        if color {
                            "⟦high⟧".red().bold().to_string()
                        } else {
                            "⟦high⟧".to_string()
                        }
                    }
                    Severity::Medium => {
                        if color {
                            "⟦medium⟧".yellow().bold().to_string()
                        } else {
                            "⟦medium⟧".to_string()
                        }
                    }
                    Severity::Low => {
                        if color {
                            "⟦low⟧".blue().bold().to_string()
                        } else {
                            "⟦low⟧".to_string()
                        }
                    }
                };
                let icon = match f.severity {
                    Severity::High => "✖".red().to_string(),
                    Severity::Medium => "▲".yellow().to_string(),
                    Severity::Low => "◆".blue().to_string(),
                };
                let loc = match f.location.line {
                    Some(line) => format!("{}:{}", f.location.file, line),
                    None => f.location.file.clone(),
                };
                let loc = if color { loc.bold().to_string() } else { loc };
                println!("{} {} {} ❲{}❳ — {}", icon, sev, loc, f.rule_id, f.message);
                if !f.suggestion.is_empty() {
                    println!("    ↳ {}", f.suggestion);
                }
            }
            let s = Summary::tally(findings);
            let summary = format!(
                "— Summary — high={} medium={} low={} files={}",
                s.high, s.medium, s.low, s.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print a verification result.
pub fn print_verify(res: &VerifyResult, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_verify_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            if res.ok {
                if color {
                    println!("{} repair verified", "✔".green().bold());
                } else {
                    println!("✔ repair verified");
                }
            } else {
                let reason = res.reason.as_deref().unwrap_or("unknown");
                if color {
                    println!("{} repair rejected ({})", "✖".red().bold(), reason);
                } else {
                    println!("✖ repair rejected ({})", reason);
                }
            }
            for key in &res.resolved {
                println!("  resolved: {}", key);
            }
            for f in &res.regressed {
                println!(
                    "  regressed: {} {} — {}",
                    f.severity.as_str(),
                    f.identity_key(),
                    f.message
                );
            }
            if let Some(d) = &res.post_digest {
                println!("  remaining findings: {}", d.total);
            }
        }
    }
}

/// Compose findings JSON object (pure) for testing/snapshot purposes.
pub fn compose_findings_json(findings: &[Finding]) -> JsonVal {
    json!({
        "findings": findings,
        "summary": Summary::tally(findings),
    })
}

/// Compose verify JSON object (pure) for testing/snapshot purposes.
pub fn compose_verify_json(res: &VerifyResult) -> JsonVal {
    serde_json::to_value(res).unwrap()
}
