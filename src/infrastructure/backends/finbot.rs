#[cfg(test)]
#[path = "finbot_test.rs"]
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

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionReply {
    reply: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionFailure {
    error: Option<String>,
}

/// The default backend. Talks to a Finbot relay server which holds the API
/// key and prepends the persona prompt on its side; the wire contract is
/// message in, reply out.
pub struct Finbot {
    url: String,
    timeout: String,
}

impl Default for Finbot {
    fn default() -> Finbot {
        return Finbot {
            url: Config::get(ConfigKey::FinbotURL),
            timeout: Config::get(ConfigKey::CompletionTimeout),
        };
    }
}

impl Finbot {
    fn timeout_duration(&self) -> Duration {
        let millis = self.timeout.parse::<u64>().unwrap_or(10000);
        return Duration::from_millis(millis);
    }
}

#[async_trait]
impl Backend for Finbot {
    fn name(&self) -> BackendName {
        return BackendName::Finbot;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Finbot relay URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/api/gemini", url = self.url))
            .timeout(self.timeout_duration())
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Finbot relay is not reachable");
            bail!("Finbot relay is not reachable");
        }

        // The chat route only accepts POST; any response below 500 means the
        // relay itself is up.
        let status = res.unwrap().status().as_u16();
        if status >= 500 {
            tracing::error!(status = status, "Finbot relay health check failed");
            bail!("Finbot relay health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, prompt: CompletionPrompt) -> Result<String, CompletionError> {
        if prompt.text.trim().is_empty() {
            return Err(CompletionError::EmptyInput);
        }

        let req = CompletionRequest {
            message: prompt.text,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/gemini", url = self.url))
            .timeout(self.timeout_duration())
            .json(&req)
            .send()
            .await
            .map_err(|err| return CompletionError::Transport(err.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let failure = res.json::<CompletionFailure>().await.unwrap_or_default();
            let detail = failure.error.unwrap_or_else(|| return "unknown".to_string());
            return Err(CompletionError::Upstream(format!(
                "status {status}: {detail}"
            )));
        }

        let reply = res
            .json::<CompletionReply>()
            .await
            .map_err(|err| return CompletionError::Upstream(err.to_string()))?;

        match reply.reply {
            Some(text) => return Ok(text),
            None => return Err(CompletionError::Upstream("response had no reply".to_string())),
        }
    }
}
