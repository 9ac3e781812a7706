// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deterministic title similarity for confidence recalculation.
//!
//! The model's self-reported mapping confidence proved unreliable, so a
//! maintenance pass rescores every mapping from pure string similarity and
//! overwrites stored values that drift too far. Running the pass twice in a
//! row writes nothing the second time: once corrected, the stored value
//! sits within tolerance of the recomputation.

use std::collections::HashSet;

/// Similarity never reports full certainty; 0.95 is the ceiling.
pub const MAX_SIMILARITY: f64 = 0.95;

/// Stored confidence is rewritten only when it drifts more than this many
/// points from the recomputed value.
pub const CONFIDENCE_DRIFT_TOLERANCE: i32 = 5;

/// Generic role words that signal two titles describe the same kind of job.
const ROLE_KEYWORDS: [&str; 12] = [
    "manager",
    "engineer",
    "specialist",
    "analyst",
    "officer",
    "coordinator",
    "supervisor",
    "director",
    "technician",
    "architect",
    "consultant",
    "executive",
];

/// Computes a similarity score in `[0, 0.95]` between two role titles.
///
/// Normalized (trimmed, lowercased) equality scores the full 0.95.
/// Otherwise the score is the whitespace-token overlap ratio
/// (`common / max(len_a, len_b)`), plus 0.25 if either normalized title
/// contains the other, plus 0.1 if both titles share a generic role
/// keyword, capped at 0.95. Blank input on either side scores zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn title_similarity(original: &str, standardized: &str) -> f64 {
    let a = original.trim().to_lowercase();
    let b = standardized.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return MAX_SIMILARITY;
    }

    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    let common = tokens_a.intersection(&tokens_b).count();
    // Both sides are non-empty here, so the denominator is at least 1.
    let denominator = tokens_a.len().max(tokens_b.len());
    let mut score = common as f64 / denominator as f64;

    if a.contains(&b) || b.contains(&a) {
        score += 0.25;
    }

    if ROLE_KEYWORDS
        .iter()
        .any(|keyword| a.contains(keyword) && b.contains(keyword))
    {
        score += 0.1;
    }

    score.min(MAX_SIMILARITY)
}

/// Recomputes a mapping's confidence as a 0-100 integer.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn similarity_confidence(original: &str, standardized: &str) -> i32 {
    // Rounded and bounded by MAX_SIMILARITY, so the cast cannot truncate.
    (title_similarity(original, standardized) * 100.0).round() as i32
}

/// Returns whether a stored confidence has drifted far enough from the
/// recomputed value to be overwritten.
#[must_use]
pub const fn exceeds_drift_tolerance(stored: i32, recomputed: i32) -> bool {
    (stored - recomputed).abs() > CONFIDENCE_DRIFT_TOLERANCE
}
