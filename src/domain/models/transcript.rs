use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

/// Bumped whenever the snapshot shape changes. Mismatched snapshots are
/// discarded on load rather than migrated.
pub const TRANSCRIPT_SCHEMA: u32 = 1;

#[derive(Serialize, Deserialize)]
pub struct Transcript {
    pub schema: u32,
    pub app_version: String,
    pub saved_at: String,
    pub messages: Vec<Message>,
}
