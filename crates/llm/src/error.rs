// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while talking to the text-generation backend.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// No API key is configured. This is checked before any network call.
    #[error("Text-generation API key is not configured")]
    MissingApiKey,

    /// Authentication was rejected (HTTP 401/403).
    #[error("Text-generation auth failed: {0}")]
    Auth(String),

    /// The backend asked us to slow down (HTTP 429).
    #[error("Text-generation rate limited: {0}")]
    RateLimited(String),

    /// The backend rejected the request as malformed (other 4xx).
    #[error("Text-generation request invalid: {0}")]
    InvalidRequest(String),

    /// The backend failed (5xx or unexpected status).
    #[error("Text-generation API error: {0}")]
    Api(String),

    /// The request never completed (connection, DNS, timeout).
    #[error("Text-generation network error: {0}")]
    Network(String),

    /// A 2xx reply that did not match the expected response shape.
    #[error("Text-generation response unparseable: {0}")]
    Parsing(String),

    /// A well-formed reply that carried no choices.
    #[error("Text-generation backend returned no choices")]
    EmptyReply,
}
