use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::infrastructure::backends::BackendManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear (/c) - Clears the conversation and deletes the saved transcript.
- /quit /exit (/q) - Exit Finbot.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- ALT+1 to ALT+4 - Send one of the suggested follow-up prompts.
- CTRL+C - Interrupt waiting for a reply if in progress, otherwise exit.
        "#;

    return text.trim().to_string();
}

pub struct ActionsService {}

impl ActionsService {
    /// Background worker loop. Each completion request runs in its own
    /// spawned task so an abort can drop it without touching the loop.
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match action.unwrap() {
                Action::AbortRequest() => {
                    worker.abort();
                }
                Action::CompletionRequest(prompt) => {
                    worker = tokio::spawn(async move {
                        let backend_name = BackendName::parse(&Config::get(ConfigKey::Backend))?;
                        let backend = BackendManager::get(backend_name)?;

                        match backend.complete(prompt).await {
                            Ok(text) => {
                                worker_tx.send(Event::CompletionResponse(text))?;
                            }
                            Err(err) => {
                                tracing::error!(err = %err, backend = %backend_name, "completion failed");
                                worker_tx.send(Event::CompletionFailed(err))?;
                            }
                        }

                        return Ok(());
                    });
                }
            }
        }
    }
}
