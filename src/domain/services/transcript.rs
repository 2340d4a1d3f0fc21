#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use chrono::Local;
use chrono::SecondsFormat;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Message;
use crate::domain::models::Transcript;
use crate::domain::models::TRANSCRIPT_SCHEMA;

/// Persists the conversation as a single full-snapshot JSON file. Every save
/// overwrites the previous snapshot; the most recent write wins.
pub struct TranscriptStore {
    pub file_path: path::PathBuf,
}

impl Default for TranscriptStore {
    fn default() -> TranscriptStore {
        return TranscriptStore::new(path::PathBuf::from(Config::get(ConfigKey::TranscriptFile)));
    }
}

impl TranscriptStore {
    pub fn new(file_path: path::PathBuf) -> TranscriptStore {
        return TranscriptStore { file_path };
    }

    /// Restores the saved message sequence. Missing, unreadable, malformed,
    /// or schema-mismatched snapshots all read as absent so the caller keeps
    /// its in-memory defaults. Transcript loss is never fatal.
    pub async fn load(&self) -> Option<Vec<Message>> {
        if !self.file_path.exists() {
            return None;
        }

        let payload = match fs::read_to_string(&self.file_path).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(err = ?err, "failed to read transcript snapshot");
                return None;
            }
        };

        let transcript: Transcript = match serde_json::from_str(&payload) {
            Ok(transcript) => transcript,
            Err(err) => {
                tracing::warn!(err = ?err, "discarding malformed transcript snapshot");
                return None;
            }
        };

        if transcript.schema != TRANSCRIPT_SCHEMA {
            tracing::warn!(
                schema = transcript.schema,
                expected = TRANSCRIPT_SCHEMA,
                "discarding transcript snapshot with unknown schema"
            );
            return None;
        }

        return Some(transcript.messages);
    }

    pub async fn save(&self, messages: &[Message]) -> Result<()> {
        let transcript = Transcript {
            schema: TRANSCRIPT_SCHEMA,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            saved_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            messages: messages.to_vec(),
        };

        let payload = serde_json::to_string(&transcript)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path).await?;
        return Ok(());
    }
}
