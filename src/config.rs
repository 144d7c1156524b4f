//! Configuration discovery and effective settings resolution.
//!
//! Reflint reads `reflint.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags. Defaults:
//! - `output`: `human`
//! - `allow_roots`: empty (every touched path counts as out of scope)
//! - `thresholds.high_confidence`: 0.7
//! - `thresholds.actionable`: 0.3
//! - `thresholds.regression_severity`: `high`
//!
//! Overrides precedence: CLI > config file > defaults. The threshold
//! defaults mirror the values the detection rules shipped with originally,
//! so an empty config reproduces historical behavior.

use crate::models::Severity;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
/// Tunable cutoffs used across rules and verification.
pub struct Thresholds {
    /// Findings at or above this confidence are high-confidence.
    pub high_confidence: f64,
    /// Minimum confidence for a finding to be worth surfacing at all.
    /// Always at or below `high_confidence`: actionability is a strict
    /// superset of high-confidence.
    pub actionable: f64,
    /// New post-repair findings at or above this severity are regressions.
    pub regression_severity: Severity,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            high_confidence: 0.7,
            actionable: 0.3,
            regression_severity: Severity::High,
        }
    }
}

impl Thresholds {
    pub fn is_high_confidence(&self, c: f64) -> bool {
        c >= self.high_confidence
    }

    pub fn is_actionable(&self, c: f64) -> bool {
        c >= self.actionable
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[thresholds]` section of the config file.
pub struct ThresholdsCfg {
    #[serde(rename = "highConfidence")]
    pub high_confidence: Option<f64>,
    pub actionable: Option<f64>,
    #[serde(rename = "regressionSeverity")]
    pub regression_severity: Option<Severity>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `reflint.toml|yaml`.
pub struct ReflintConfig {
    pub output: Option<String>,
    #[serde(default, rename = "allowRoots")]
    pub allow_roots: Option<Vec<String>>,
    #[serde(default)]
    pub thresholds: Option<ThresholdsCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub allow_roots: Vec<String>,
    pub thresholds: Thresholds,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `reflint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("reflint.toml").exists()
            || cur.join("reflint.yaml").exists()
            || cur.join("reflint.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ReflintConfig` from `reflint.toml` or `reflint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<ReflintConfig> {
    let toml_path = root.join("reflint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: ReflintConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["reflint.yaml", "reflint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: ReflintConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_allow_roots: &[String],
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let allow_roots = if cli_allow_roots.is_empty() {
        cfg.allow_roots.unwrap_or_default()
    } else {
        cli_allow_roots.to_vec()
    };

    let tc = cfg.thresholds.unwrap_or_default();
    let defaults = Thresholds::default();
    let thresholds = Thresholds {
        high_confidence: tc.high_confidence.unwrap_or(defaults.high_confidence),
        actionable: tc.actionable.unwrap_or(defaults.actionable),
        regression_severity: tc
            .regression_severity
            .unwrap_or(defaults.regression_severity),
    };

    Effective {
        repo_root,
        output,
        allow_roots,
        thresholds,
    }
}
