// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::LlmError;
use crate::generator::TextGenerator;
use crate::types::ChatMessage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A canned [`TextGenerator`] for tests.
///
/// Replies are served in order; once exhausted, the last reply repeats so a
/// retry in a test never panics. Each reply may be a success or an error,
/// which is how tests drive the failure paths without a network.
pub struct MockGenerator {
    replies: Vec<Result<String, LlmError>>,
    cursor: AtomicUsize,
}

impl MockGenerator {
    /// Creates a mock that always returns the given reply text.
    #[must_use]
    pub fn with_reply(content: &str) -> Self {
        Self {
            replies: vec![Ok(content.to_string())],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that serves the given replies in order.
    #[must_use]
    pub fn with_replies(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that always fails with the given error.
    #[must_use]
    pub fn failing(error: LlmError) -> Self {
        Self {
            replies: vec![Err(error)],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Returns how many completions have been requested.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        let call = self.cursor.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.replies.len().saturating_sub(1));
        match self.replies.get(index) {
            Some(reply) => reply.clone(),
            None => Err(LlmError::EmptyReply),
        }
    }
}
