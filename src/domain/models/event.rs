use tui_textarea::Input;

use super::CompletionError;

pub enum Event {
    CompletionResponse(String),
    CompletionFailed(CompletionError),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    SuggestionPick(usize),
    UITick(),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
}
