use anyhow::Result;
use tempfile::tempdir;

use super::TranscriptStore;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

fn store_in(dir: &tempfile::TempDir) -> TranscriptStore {
    return TranscriptStore::new(dir.path().join("transcript.json"));
}

#[tokio::test]
async fn it_round_trips_messages() -> Result<()> {
    let dir = tempdir()?;
    let store = store_in(&dir);

    let messages = vec![
        Message::new(Author::Finbot, "Hi, I'm Finbot."),
        Message::new(Author::User, "Should I invest now?"),
        Message::new_with_type(Author::Finbot, MessageType::Error, "It broke!"),
    ];

    store.save(&messages).await?;
    let restored = store.load().await.unwrap();

    assert_eq!(restored.len(), messages.len());
    for (restored_msg, msg) in restored.iter().zip(messages.iter()) {
        assert_eq!(restored_msg.author, msg.author);
        assert_eq!(restored_msg.text, msg.text);
        assert_eq!(restored_msg.timestamp, msg.timestamp);
        assert_eq!(restored_msg.message_type(), msg.message_type());
    }

    return Ok(());
}

#[tokio::test]
async fn it_loads_absent_for_missing_file() -> Result<()> {
    let dir = tempdir()?;
    let store = store_in(&dir);
    assert!(store.load().await.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_loads_absent_for_malformed_snapshot() -> Result<()> {
    let dir = tempdir()?;
    let store = store_in(&dir);
    tokio::fs::write(&store.file_path, "{not valid json").await?;

    assert!(store.load().await.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_loads_absent_for_unknown_schema() -> Result<()> {
    let dir = tempdir()?;
    let store = store_in(&dir);
    tokio::fs::write(
        &store.file_path,
        r#"{"schema":999,"app_version":"0.0.0","saved_at":"2026-01-01T00:00:00+00:00","messages":[]}"#,
    )
    .await?;

    assert!(store.load().await.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_overwrites_previous_snapshots() -> Result<()> {
    let dir = tempdir()?;
    let store = store_in(&dir);

    store
        .save(&[Message::new(Author::User, "first")])
        .await?;
    store
        .save(&[Message::new(Author::User, "second")])
        .await?;

    let restored = store.load().await.unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].text, "second");
    return Ok(());
}

#[tokio::test]
async fn it_clears_the_snapshot() -> Result<()> {
    let dir = tempdir()?;
    let store = store_in(&dir);

    store.save(&[Message::new(Author::User, "hello")]).await?;
    store.clear().await?;

    assert!(store.load().await.is_none());
    // Clearing twice is fine.
    store.clear().await?;
    return Ok(());
}
