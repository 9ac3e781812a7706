// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::LlmError;
use crate::types::ChatMessage;
use async_trait::async_trait;

/// A backend that turns a chat prompt into one text completion.
///
/// Object-safe so the server can hold an `Arc<dyn TextGenerator>` and tests
/// can substitute [`crate::MockGenerator`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the messages and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] for configuration, network, HTTP, or
    /// response-shape failures.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
