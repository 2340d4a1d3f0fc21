#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::suggestions::suggest;
use super::BubbleList;
use super::Scroll;
use super::Typewriter;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

pub const GREETING: &str =
    "Hi, I'm Finbot's AI assistant. Ask me anything about investing, savings, or your portfolio.";

pub const COMPLETION_FALLBACK: &str =
    "Error talking to Finbot AI. Please check your connection or try again later.";

pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I couldn't generate a response. Please try again.";

/// One turn at a time. A new submission is only accepted while `Idle`;
/// `AwaitingReply` covers the in-flight completion request and `Animating`
/// the typewriter reveal of the reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply,
    Animating,
}

pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub scroll: Scroll,
    pub messages: Vec<Message>,
    pub suggestions: Vec<String>,
    pub turn: TurnState,
    pub last_known_width: u16,
    pub last_known_height: u16,
    typewriter: Option<Typewriter>,
    dirty: bool,
}

impl<'a> AppState<'a> {
    pub fn new(restored: Option<Vec<Message>>) -> AppState<'a> {
        let messages = match restored {
            Some(messages) if !messages.is_empty() => messages,
            _ => vec![Message::new(Author::Finbot, GREETING)],
        };

        let suggestions = suggest(&messages);

        return AppState {
            bubble_list: BubbleList::new(),
            scroll: Scroll::default(),
            messages,
            suggestions,
            turn: TurnState::Idle,
            last_known_width: 0,
            last_known_height: 0,
            typewriter: None,
            dirty: false,
        };
    }

    /// Accepts a user utterance and kicks off a completion request. Returns
    /// false without any state change when the trimmed input is empty or a
    /// turn is already in flight.
    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.turn != TurnState::Idle {
            return Ok(false);
        }

        self.add_message(Message::new(Author::User, trimmed));
        self.turn = TurnState::AwaitingReply;
        tx.send(Action::CompletionRequest(CompletionPrompt::new(
            trimmed.to_string(),
        )))?;

        return Ok(true);
    }

    /// A completed reply arrives from the worker. Non-empty replies are
    /// revealed by the typewriter; empty ones fall straight through to the
    /// fixed apology message.
    pub fn handle_completion(&mut self, text: String) {
        if self.turn != TurnState::AwaitingReply {
            return;
        }

        if text.trim().is_empty() {
            self.add_message(Message::new(Author::Finbot, EMPTY_REPLY_FALLBACK));
            self.turn = TurnState::Idle;
            return;
        }

        self.add_message(Message::new(Author::Finbot, ""));
        self.typewriter = Some(Typewriter::new(self.messages.len() - 1, &text));
        self.turn = TurnState::Animating;
    }

    /// All completion failures collapse into one fallback bot message; no
    /// error leaves the session.
    pub fn handle_completion_failure(&mut self, err: &CompletionError) {
        if self.turn != TurnState::AwaitingReply {
            return;
        }

        tracing::error!(err = %err, "completion request failed");
        self.add_message(Message::new_with_type(
            Author::Finbot,
            MessageType::Error,
            COMPLETION_FALLBACK,
        ));
        self.turn = TurnState::Idle;
    }

    /// Advances the typewriter by one chunk on each UI tick.
    pub fn on_tick(&mut self) {
        if self.turn != TurnState::Animating {
            return;
        }

        if let Some(typewriter) = self.typewriter.as_mut() {
            let revealed = typewriter.tick();
            let target = typewriter.target();
            let done = typewriter.is_done();

            self.messages[target].text = revealed;
            self.dirty = true;
            self.sync_dependants();

            if done {
                self.typewriter = None;
                self.turn = TurnState::Idle;
            }
        }
    }

    /// CTRL+C mid-turn: an in-flight request is dropped, a running
    /// animation skips to the full reply.
    pub fn cancel_turn(&mut self) {
        match self.turn {
            TurnState::AwaitingReply => {
                self.turn = TurnState::Idle;
            }
            TurnState::Animating => {
                if let Some(typewriter) = self.typewriter.as_mut() {
                    let revealed = typewriter.finish();
                    let target = typewriter.target();
                    self.messages[target].text = revealed;
                    self.dirty = true;
                    self.sync_dependants();
                }
                self.typewriter = None;
                self.turn = TurnState::Idle;
            }
            TurnState::Idle => {}
        }
    }

    /// Drops the conversation back to the greeting, as for `/clear`.
    pub fn reset(&mut self) {
        self.messages = vec![Message::new(Author::Finbot, GREETING)];
        self.suggestions = suggest(&self.messages);
        self.typewriter = None;
        self.turn = TurnState::Idle;
        self.dirty = true;
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.suggestions = suggest(&self.messages);
        self.dirty = true;
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// True once per transcript mutation; the UI loop flushes dirty state to
    /// the snapshot store.
    pub fn take_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        return was_dirty;
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.turn != TurnState::Idle {
            self.scroll.last();
        }
    }
}
