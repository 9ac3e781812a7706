// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client for the OpenAI-compatible text-generation backend.
//!
//! The standardization engine talks to the backend exclusively through the
//! [`TextGenerator`] trait so handlers receive an injected client object
//! rather than reaching for ambient configuration. [`OpenAiGenerator`] is
//! the production implementation; [`MockGenerator`] serves tests.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod error;
mod generator;
mod mock;
mod openai;
mod types;

pub use config::AiConfig;
pub use error::LlmError;
pub use generator::TextGenerator;
pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;
pub use types::{ChatMessage, MessageRole};
