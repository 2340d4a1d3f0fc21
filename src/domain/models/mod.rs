mod action;
mod backend;
mod event;
mod loading;
mod message;
mod slash_commands;
mod textarea;
mod transcript;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use slash_commands::*;
pub use textarea::*;
pub use transcript::*;
