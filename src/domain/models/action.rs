use super::CompletionPrompt;

pub enum Action {
    AbortRequest(),
    CompletionRequest(CompletionPrompt),
}
