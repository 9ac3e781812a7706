// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deterministic weighted-overlap scoring for role assignment.
//!
//! The matcher never learns and never calls out: given an employee profile
//! and the active standard roles, it computes a score per candidate and
//! picks the strict best. Scoring is a pure function of current state so a
//! rerun over the same rows always picks the same roles.

use serde::{Deserialize, Serialize};

/// Weight for a bidirectional title/position substring match.
const TITLE_WEIGHT: f64 = 0.4;
/// Weight granted per matching skill token.
const SKILL_WEIGHT: f64 = 0.1;
/// At most three skill tokens count toward the score.
const MAX_SKILL_MATCHES: u8 = 3;
/// Weight for an exact department match.
const DEPARTMENT_WEIGHT: f64 = 0.2;
/// Weight when the role's job family contains the employee's department.
const JOB_FAMILY_WEIGHT: f64 = 0.1;

/// The employee fields the matcher scores against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee's current position title.
    pub current_position: String,
    /// The employee's current department.
    pub current_department: String,
    /// The employee's skill list.
    pub skills: Vec<String>,
}

/// One candidate standard role, in first-seen (insertion) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCandidate {
    /// The persisted standard role id.
    pub id: i64,
    /// The canonical role title.
    pub role_title: String,
    /// The role's department.
    pub department: String,
    /// The role's job family.
    pub job_family: String,
}

/// The matcher's decision for one employee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    /// The selected standard role id.
    pub role_id: i64,
    /// The winning score in `[0, 1]`. Zero when `fallback` is set.
    pub score: f64,
    /// True when no candidate produced any match signal and the first
    /// candidate was assigned deterministically instead.
    pub fallback: bool,
}

/// Scores one (employee, candidate role) pair.
///
/// The score is the sum of four independent signals:
/// - +0.4 if the role title and the current position are substrings of one
///   another, case-insensitively, in either direction.
/// - +0.1 per employee skill that appears in the role title or the role's
///   department, capped at three skills.
/// - +0.2 if the role department equals the employee department
///   (case-insensitive exact match).
/// - +0.1 if the role's job family contains the employee department.
///
/// Blank fields never match: an employee with no position cannot collect
/// the title weight.
#[must_use]
pub fn score_candidate(employee: &EmployeeProfile, candidate: &RoleCandidate) -> f64 {
    let position = employee.current_position.trim().to_lowercase();
    let employee_department = employee.current_department.trim().to_lowercase();
    let title = candidate.role_title.trim().to_lowercase();
    let department = candidate.department.trim().to_lowercase();
    let job_family = candidate.job_family.trim().to_lowercase();

    let mut score = 0.0;

    if !position.is_empty()
        && !title.is_empty()
        && (title.contains(&position) || position.contains(&title))
    {
        score += TITLE_WEIGHT;
    }

    let mut skill_matches: u8 = 0;
    for skill in &employee.skills {
        if skill_matches >= MAX_SKILL_MATCHES {
            break;
        }
        let skill = skill.trim().to_lowercase();
        if skill.is_empty() {
            continue;
        }
        if title.contains(&skill) || department.contains(&skill) {
            skill_matches += 1;
            score += SKILL_WEIGHT;
        }
    }

    if !department.is_empty() && department == employee_department {
        score += DEPARTMENT_WEIGHT;
    }

    if !employee_department.is_empty() && job_family.contains(&employee_department) {
        score += JOB_FAMILY_WEIGHT;
    }

    score
}

/// Selects the best-fitting candidate for one employee.
///
/// The strictly highest score wins; ties keep the first-seen candidate.
/// When no candidate scores above zero, the first candidate is returned
/// with the `fallback` flag set so the employee is never left unassigned.
/// Returns `None` only when the candidate list is empty.
#[must_use]
pub fn select_best_candidate(
    employee: &EmployeeProfile,
    candidates: &[RoleCandidate],
) -> Option<MatchOutcome> {
    let first = candidates.first()?;

    let mut best_id = first.id;
    let mut best_score = score_candidate(employee, first);
    for candidate in candidates.iter().skip(1) {
        let score = score_candidate(employee, candidate);
        if score > best_score {
            best_score = score;
            best_id = candidate.id;
        }
    }

    if best_score > 0.0 {
        Some(MatchOutcome {
            role_id: best_id,
            score: best_score,
            fallback: false,
        })
    } else {
        Some(MatchOutcome {
            role_id: first.id,
            score: 0.0,
            fallback: true,
        })
    }
}
