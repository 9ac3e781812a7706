// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standardization prompt construction and AI-reply parsing.
//!
//! The prompt embeds the captured catalog (file names, headers, sample
//! rows) and instructs the model to answer with strictly one JSON
//! object `{"standardRoles": [...], "mappings": [...]}`. The reply
//! parser is schema-validated: fenced or non-JSON text, a missing
//! top-level key, or an empty role set each fail the whole call with a
//! descriptive reason so nothing partial is ever committed.

use rolemap_domain::{ParsedFile, clamp_confidence};
use rolemap_llm::ChatMessage;
use rolemap_persistence::{NewRoleMapping, NewStandardRole};
use serde::Deserialize;

/// Sample rows embedded in the prompt per file.
pub const MAX_SAMPLE_ROWS_PER_FILE: usize = 20;

const SYSTEM_PROMPT: &str = "You are an HR role-standardization assistant for a \
telecommunications company. You consolidate messy role catalogs into a canonical \
set of standard roles and map every original row onto one of them.";

/// Builds the chat messages for one standardization run.
#[must_use]
pub fn build_standardization_prompt(files: &[ParsedFile]) -> Vec<ChatMessage> {
    let mut catalog: String = String::new();
    for file in files {
        catalog.push_str(&format!("\n### File: {}\n", file.file_name));
        catalog.push_str(&format!("Headers: {}\n", file.headers.join(" | ")));
        let sample: &[Vec<String>] =
            &file.rows[..file.rows.len().min(MAX_SAMPLE_ROWS_PER_FILE)];
        catalog.push_str(&format!(
            "Rows ({} of {}):\n",
            sample.len(),
            file.rows.len()
        ));
        for row in sample {
            catalog.push_str(&format!("- {}\n", row.join(" | ")));
        }
    }

    let user_prompt: String = format!(
        "Below is a role catalog extracted from uploaded spreadsheets.\n\
         {catalog}\n\
         Consolidate these into roughly 5-15 standard roles and map every \
         original row to one of them.\n\n\
         Reply with STRICTLY one JSON object and nothing else, in this shape:\n\
         {{\n\
           \"standardRoles\": [\n\
             {{\"roleTitle\": \"...\", \"jobFamily\": \"...\", \"roleLevel\": \"...\",\n\
              \"roleCategory\": \"...\", \"department\": \"...\", \"description\": \"...\",\n\
              \"requiredSkills\": [\"...\"], \"experienceMinYears\": 0, \"experienceMaxYears\": 0}}\n\
           ],\n\
           \"mappings\": [\n\
             {{\"originalTitle\": \"...\", \"originalDepartment\": \"...\", \"originalLevel\": \"...\",\n\
              \"standardizedTitle\": \"...\", \"standardizedDepartment\": \"...\",\n\
              \"standardizedLevel\": \"...\", \"jobFamily\": \"...\", \"confidence\": 0}}\n\
           ]\n\
         }}\n\n\
         Every mapping's standardizedTitle must exactly match the roleTitle of \
         one of your standardRoles. Confidence is an integer 0-100."
    );

    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(&user_prompt),
    ]
}

/// One consolidated role proposed by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRole {
    /// The canonical role title.
    pub role_title: String,
    #[serde(default)]
    pub job_family: String,
    #[serde(default)]
    pub role_level: String,
    #[serde(default)]
    pub role_category: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub experience_min_years: i32,
    #[serde(default)]
    pub experience_max_years: i32,
}

/// One original-row-to-standard-role mapping proposed by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMapping {
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub original_department: String,
    #[serde(default)]
    pub original_level: String,
    /// Must match the `role_title` of one of the reply's roles.
    pub standardized_title: String,
    #[serde(default)]
    pub standardized_department: String,
    #[serde(default)]
    pub standardized_level: String,
    #[serde(default)]
    pub job_family: String,
    #[serde(default)]
    pub confidence: f64,
}

/// A fully parsed standardization reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardizationReply {
    /// The consolidated role set.
    pub standard_roles: Vec<ReplyRole>,
    /// One mapping per original catalog row.
    pub mappings: Vec<ReplyMapping>,
}

/// Reasons an AI reply is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyParseError {
    /// The reply was not a JSON object.
    NotJson {
        /// The underlying parse failure.
        reason: String,
    },
    /// A required top-level key was absent.
    MissingField {
        /// The absent key.
        field: String,
    },
    /// The reply shape did not match the schema.
    SchemaMismatch {
        /// The underlying deserialization failure.
        reason: String,
    },
    /// The reply contained no standard roles.
    EmptyRoleSet,
    /// A mapping references a role title not present in the role set.
    UnresolvedMapping {
        /// The dangling standardized title.
        title: String,
    },
}

impl std::fmt::Display for ReplyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotJson { reason } => {
                write!(f, "AI reply is not a JSON object: {reason}")
            }
            Self::MissingField { field } => {
                write!(f, "AI reply is missing the '{field}' field")
            }
            Self::SchemaMismatch { reason } => {
                write!(f, "AI reply does not match the expected schema: {reason}")
            }
            Self::EmptyRoleSet => {
                write!(f, "AI reply contains no standard roles")
            }
            Self::UnresolvedMapping { title } => {
                write!(
                    f,
                    "Mapping references standardized title '{title}' which is not in the role set"
                )
            }
        }
    }
}

impl std::error::Error for ReplyParseError {}

/// Strips an optional markdown code fence wrapping the reply.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed: &str = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line.
    let rest: &str = rest
        .split_once('\n')
        .map_or(rest, |(_, remainder)| remainder);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses an AI reply into a validated [`StandardizationReply`].
///
/// # Errors
///
/// Returns a [`ReplyParseError`] naming the reason: non-JSON text,
/// a missing `standardRoles` or `mappings` key, a shape mismatch, or
/// an empty role set. Mapping confidences are clamped to 0..=100 by
/// the conversion step, not here.
pub fn parse_standardization_reply(reply: &str) -> Result<StandardizationReply, ReplyParseError> {
    let body: &str = strip_code_fence(reply);

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ReplyParseError::NotJson {
            reason: e.to_string(),
        })?;

    let Some(object) = value.as_object() else {
        return Err(ReplyParseError::NotJson {
            reason: String::from("top-level value is not an object"),
        });
    };
    for field in ["standardRoles", "mappings"] {
        if !object.contains_key(field) {
            return Err(ReplyParseError::MissingField {
                field: String::from(field),
            });
        }
    }

    let reply: StandardizationReply =
        serde_json::from_value(value).map_err(|e| ReplyParseError::SchemaMismatch {
            reason: e.to_string(),
        })?;

    if reply.standard_roles.is_empty() {
        return Err(ReplyParseError::EmptyRoleSet);
    }

    Ok(reply)
}

/// Converts a parsed reply into persistence insert rows.
///
/// Each mapping's `standardized_title` is resolved (case-insensitive)
/// to the index of the matching role in the reply's role set; the
/// persistence layer turns that index into the freshly inserted row id
/// inside its transaction. Confidences are clamped to 0..=100 here.
///
/// # Errors
///
/// Returns `ReplyParseError::UnresolvedMapping` when a mapping names a
/// title absent from the role set.
pub fn reply_to_inserts(
    reply: &StandardizationReply,
    created_by: &str,
) -> Result<(Vec<NewStandardRole>, Vec<NewRoleMapping>), ReplyParseError> {
    let roles: Vec<NewStandardRole> = reply
        .standard_roles
        .iter()
        .map(|role| NewStandardRole {
            role_title: role.role_title.clone(),
            job_family: role.job_family.clone(),
            role_level: role.role_level.clone(),
            role_category: role.role_category.clone(),
            department: role.department.clone(),
            description: role.description.clone(),
            required_skills: role.required_skills.clone(),
            experience_min_years: role.experience_min_years,
            experience_max_years: role.experience_max_years,
            created_by: String::from(created_by),
        })
        .collect();

    let mut mappings: Vec<NewRoleMapping> = Vec::with_capacity(reply.mappings.len());
    for mapping in &reply.mappings {
        let role_index: usize = reply
            .standard_roles
            .iter()
            .position(|role| {
                role.role_title
                    .eq_ignore_ascii_case(&mapping.standardized_title)
            })
            .ok_or_else(|| ReplyParseError::UnresolvedMapping {
                title: mapping.standardized_title.clone(),
            })?;

        mappings.push(NewRoleMapping {
            role_index,
            original_title: mapping.original_title.clone(),
            original_department: mapping.original_department.clone(),
            original_level: mapping.original_level.clone(),
            standardized_title: mapping.standardized_title.clone(),
            standardized_department: mapping.standardized_department.clone(),
            standardized_level: mapping.standardized_level.clone(),
            job_family: mapping.job_family.clone(),
            confidence: clamp_confidence(mapping.confidence),
        });
    }

    Ok((roles, mappings))
}
