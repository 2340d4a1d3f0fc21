#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::PERSONA_PREAMBLE;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Talks to the Google generative-language API directly, prepending the
/// Finbot persona to every prompt.
pub struct Gemini {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            timeout: Config::get(ConfigKey::CompletionTimeout),
        };
    }
}

impl Gemini {
    fn timeout_duration(&self) -> Duration {
        let millis = self.timeout.parse::<u64>().unwrap_or(10000);
        return Duration::from_millis(millis);
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/{model}?key={key}",
            url = self.url,
            model = Config::get(ConfigKey::Model),
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(self.timeout_duration())
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, prompt: CompletionPrompt) -> Result<String, CompletionError> {
        if prompt.text.trim().is_empty() {
            return Err(CompletionError::EmptyInput);
        }

        let req = CompletionRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    ContentPart {
                        text: PERSONA_PREAMBLE.to_string(),
                    },
                    ContentPart {
                        text: format!("User question: {}", prompt.text),
                    },
                ],
            }],
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/{model}:generateContent?key={key}",
                url = self.url,
                model = Config::get(ConfigKey::Model),
                key = self.token,
            ))
            .timeout(self.timeout_duration())
            .json(&req)
            .send()
            .await
            .map_err(|err| return CompletionError::Transport(err.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            return Err(CompletionError::Upstream(format!("status {status}")));
        }

        let payload = res
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| return CompletionError::Upstream(err.to_string()))?;

        // The first textual part of the first candidate is the completion.
        for candidate in payload.candidates {
            for part in candidate.content.parts {
                if !part.text.is_empty() {
                    return Ok(part.text);
                }
            }
        }

        return Err(CompletionError::Upstream(
            "no completion in response".to_string(),
        ));
    }
}
