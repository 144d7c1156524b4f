//! Confidence scoring for inferred references.
//!
//! A reference starts from a base weight fixed by how it was detected and
//! is degraded by three independent corroboration signals. Penalties are
//! multiplicative and compose; the result is clamped to [0, 1] and rounded
//! to 2 decimal places. Scoring is pure: identical inputs always produce
//! the identical value, which reproducible verification relies on.

use crate::models::edge::ReferenceType;

/// Base weight used when a scanner supplies an edge kind the classifier
/// does not know.
pub const FALLBACK_BASE: f64 = 0.5;

/// Multiplier when the referenced target does not exist.
pub const MISSING_TARGET_PENALTY: f64 = 0.3;
/// Multiplier when the reference matches a file only case-insensitively.
pub const CASE_MISMATCH_PENALTY: f64 = 0.7;
/// Multiplier when the reference's extension differs from the target's.
pub const EXTENSION_MISMATCH_PENALTY: f64 = 0.8;

/// Fixed base confidence per detection type.
pub fn base_confidence(ref_type: ReferenceType) -> f64 {
    match ref_type {
        ReferenceType::SchemaField => 1.0,
        ReferenceType::ImportStatement => 0.9,
        ReferenceType::MarkdownLink => 0.8,
        ReferenceType::PathLiteral => 0.7,
        ReferenceType::RegexMatch => 0.4,
        ReferenceType::Heuristic => 0.1,
    }
}

/// Base confidence for a raw scanner kind string; unknown kinds score 0.5.
pub fn base_confidence_for(kind: &str) -> f64 {
    ReferenceType::parse(kind)
        .map(base_confidence)
        .unwrap_or(FALLBACK_BASE)
}

/// Score one inferred reference from its detection type and corroboration
/// signals. All three penalties may apply simultaneously.
pub fn calculate_confidence(
    ref_type: ReferenceType,
    target_exists: bool,
    case_match: bool,
    extension_match: bool,
) -> f64 {
    score_with_base(base_confidence(ref_type), target_exists, case_match, extension_match)
}

/// Variant taking a raw scanner kind string; unknown kinds score from the
/// fallback base.
pub fn score_edge_kind(
    kind: &str,
    target_exists: bool,
    case_match: bool,
    extension_match: bool,
) -> f64 {
    score_with_base(base_confidence_for(kind), target_exists, case_match, extension_match)
}

fn score_with_base(base: f64, target_exists: bool, case_match: bool, extension_match: bool) -> f64 {
    let mut c = base;
    if !target_exists {
        c *= MISSING_TARGET_PENALTY;
    }
    if !case_match {
        c *= CASE_MISMATCH_PENALTY;
    }
    if !extension_match {
        c *= EXTENSION_MISMATCH_PENALTY;
    }
    round2(c.clamp(0.0, 1.0))
}

/// Round to 2 decimals, the precision every stored confidence carries.
pub fn round2(c: f64) -> f64 {
    (c * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [ReferenceType; 6] = [
        ReferenceType::SchemaField,
        ReferenceType::MarkdownLink,
        ReferenceType::ImportStatement,
        ReferenceType::PathLiteral,
        ReferenceType::RegexMatch,
        ReferenceType::Heuristic,
    ];

    #[test]
    fn test_base_table() {
        assert_eq!(base_confidence(ReferenceType::SchemaField), 1.0);
        assert_eq!(base_confidence(ReferenceType::ImportStatement), 0.9);
        assert_eq!(base_confidence(ReferenceType::MarkdownLink), 0.8);
        assert_eq!(base_confidence(ReferenceType::PathLiteral), 0.7);
        assert_eq!(base_confidence(ReferenceType::RegexMatch), 0.4);
        assert_eq!(base_confidence(ReferenceType::Heuristic), 0.1);
        assert_eq!(base_confidence_for("some_future_kind"), FALLBACK_BASE);
    }

    #[test]
    fn test_penalties_compose() {
        // 1.0 * 0.3 * 0.7 * 0.8 = 0.168 -> 0.17
        assert_eq!(
            calculate_confidence(ReferenceType::SchemaField, false, false, false),
            0.17
        );
        // 0.9 * 0.3 = 0.27
        assert_eq!(
            calculate_confidence(ReferenceType::ImportStatement, false, true, true),
            0.27
        );
    }

    #[test]
    fn test_unknown_kind_scores_from_fallback() {
        // 0.5 * 0.7 = 0.35
        assert_eq!(score_edge_kind("symlink", true, false, true), 0.35);
        assert_eq!(
            score_edge_kind("markdown_link", true, true, true),
            base_confidence(ReferenceType::MarkdownLink)
        );
    }

    #[test]
    fn test_monotone_in_each_penalty() {
        for rt in ALL_TYPES {
            for case in [true, false] {
                for ext in [true, false] {
                    assert!(
                        calculate_confidence(rt, false, case, ext)
                            <= calculate_confidence(rt, true, case, ext)
                    );
                    assert!(
                        calculate_confidence(rt, true, false, ext)
                            <= calculate_confidence(rt, true, true, ext)
                    );
                }
            }
        }
    }

    #[test]
    fn test_output_in_unit_interval_and_deterministic() {
        for rt in ALL_TYPES {
            for exists in [true, false] {
                for case in [true, false] {
                    for ext in [true, false] {
                        let a = calculate_confidence(rt, exists, case, ext);
                        let b = calculate_confidence(rt, exists, case, ext);
                        assert!((0.0..=1.0).contains(&a));
                        assert_eq!(a, b);
                    }
                }
            }
        }
    }
}
