//! Reflint CLI binary entry point.
//! Delegates to modules for rule evaluation and verification and prints
//! results.

mod classify;
mod cli;
mod confidence;
mod config;
mod graph;
mod input;
mod models;
mod output;
mod rules;
mod schema;
mod utils;
mod verify;

use clap::Parser;
use cli::{Cli, Commands};
use models::{Finding, Severity};
use rules::RuleContext;
use schema::SchemaTable;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Check {
            repo_root,
            bundle,
            output,
            allow_roots,
        } => {
            let eff =
                config::resolve_effective(repo_root.as_deref(), output.as_deref(), &allow_roots);
            if config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No reflint.toml found; using defaults."
                );
            }
            let bundle = load_or_exit(&eff.repo_root.join(&bundle));
            let schemas = SchemaTable::builtin();
            let ctx = RuleContext {
                bundle: &bundle,
                allow_roots: &eff.allow_roots,
                thresholds: eff.thresholds,
                schemas: &schemas,
            };
            let findings: Vec<Finding> = rules::run_rules(&ctx)
                .into_iter()
                // Below-actionable findings are not worth surfacing.
                .filter(|f| eff.thresholds.is_actionable(f.confidence))
                .collect();
            output::print_findings(&findings, &eff.output);
            if findings.iter().any(|f| f.severity == Severity::High) {
                std::process::exit(1);
            }
        }
        Commands::Verify {
            repo_root,
            pre,
            post,
            patches,
            targets,
            output,
            allow_roots,
        } => {
            let eff =
                config::resolve_effective(repo_root.as_deref(), output.as_deref(), &allow_roots);
            let pre_bundle = load_or_exit(&eff.repo_root.join(&pre));
            let post_bundle = load_or_exit(&eff.repo_root.join(&post));
            let applied = match patches {
                Some(p) => match input::load_applied(&eff.repo_root.join(&p)) {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("{} {}", utils::error_prefix(), e);
                        std::process::exit(2);
                    }
                },
                None => input::AppliedPatches::default(),
            };
            let schemas = SchemaTable::builtin();
            let pre_ctx = RuleContext {
                bundle: &pre_bundle,
                allow_roots: &eff.allow_roots,
                thresholds: eff.thresholds,
                schemas: &schemas,
            };
            let post_ctx = RuleContext {
                bundle: &post_bundle,
                allow_roots: &eff.allow_roots,
                thresholds: eff.thresholds,
                schemas: &schemas,
            };
            let pre_findings = rules::run_rules(&pre_ctx);
            let post_findings = rules::run_rules(&post_ctx);
            let res = verify::verify_after_execute(
                &pre_findings,
                &post_findings,
                &targets,
                &applied,
                &eff.thresholds,
            );
            output::print_verify(&res, &eff.output);
            if !res.ok {
                std::process::exit(1);
            }
        }
    }
}

fn load_or_exit(path: &Path) -> input::ScanBundle {
    match input::load_bundle(path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}
