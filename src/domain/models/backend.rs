#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use thiserror::Error;

/// Fixed persona prepended by the gemini backend. The relay backend leaves
/// persona handling to its server side.
pub const PERSONA_PREAMBLE: &str =
    "You are a helpful finance assistant for an app called Finbot. Answer briefly and clearly.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BackendName {
    Finbot,
    Gemini,
}

impl BackendName {
    pub fn parse(text: &str) -> Result<BackendName> {
        for name in BackendName::iter() {
            if name.to_string() == text {
                return Ok(name);
            }
        }

        bail!(format!("{text} is not a valid backend name"))
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("prompt text is empty")]
    EmptyInput,
    #[error("failed to reach the completion service: {0}")]
    Transport(String),
    #[error("completion service returned an error: {0}")]
    Upstream(String),
}

pub struct CompletionPrompt {
    pub text: String,
}

impl CompletionPrompt {
    pub fn new(text: String) -> CompletionPrompt {
        return CompletionPrompt { text };
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify the backend is reachable and configured
    /// before the first prompt is sent.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single completion for the prompt. One attempt per call, no
    /// retries. The full reply text is returned at once; the UI is
    /// responsible for any progressive reveal.
    async fn complete(&self, prompt: CompletionPrompt) -> Result<String, CompletionError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
