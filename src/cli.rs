//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "reflint",
    version,
    about = "Reference-graph integrity checks and repair verification",
    long_about = "Reflint — runs defect-detection rules over a scanner-produced reference\ngraph and verifies automated repairs by diffing pre/post findings.\n\nConfiguration precedence: CLI > reflint.toml > defaults.",
    after_help = "Examples:\n  reflint check --bundle scan.json\n  reflint check --bundle scan.json --allow-root docs --output json\n  reflint verify --pre before.json --post after.json --patches applied.json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for checking and verifying.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current reflint version.")]
    Version,
    /// Run the detection rules over a scan bundle
    #[command(
        about = "Run detection rules",
        long_about = "Load a scan bundle (edges, file inventory, parsed objects, proposals)\nand run all detection rules. Exits 1 when any HIGH finding remains.",
        after_help = "Examples:\n  reflint check --bundle scan.json\n  reflint check --bundle scan.json --output json"
    )]
    Check {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Path to the scan bundle (json|yaml)")]
        bundle: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long = "allow-root", help = "Allowed root for proposal scope checks (repeatable)")]
        allow_roots: Vec<String>,
    },
    /// Verify an automated repair by diffing pre/post scans
    #[command(
        about = "Verify a repair",
        long_about = "Run the rules over the pre- and post-repair scan bundles and decide\nwhether the repair qualified. Exits 1 when verification rejects it.",
        after_help = "Examples:\n  reflint verify --pre before.json --post after.json\n  reflint verify --pre before.json --post after.json --patches applied.json --target dangling_reference:docs/a.md:3"
    )]
    Verify {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Scan bundle taken before the repair (json|yaml)")]
        pre: String,
        #[arg(long, help = "Scan bundle taken after the repair (json|yaml)")]
        post: String,
        #[arg(long, help = "Applied-patch summary (json|yaml)")]
        patches: Option<String>,
        #[arg(long = "target", help = "Identity key the repair targeted (repeatable)")]
        targets: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long = "allow-root", help = "Allowed root for proposal scope checks (repeatable)")]
        allow_roots: Vec<String>,
    },
}
