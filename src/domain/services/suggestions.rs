#[cfg(test)]
#[path = "suggestions_test.rs"]
mod tests;

use crate::domain::models::Author;
use crate::domain::models::Message;

pub const MAX_SUGGESTIONS: usize = 4;

/// Offered when there is no user message yet, or nothing matched.
const DEFAULT_SUGGESTIONS: [&str; 4] = [
    "How should a beginner start investing?",
    "What is SIP?",
    "How do I pick my first stock?",
    "How much should I save each month?",
];

/// Keyword groups tested in priority order against the latest user message.
/// Within a group, prompts are offered in declaration order.
const KEYWORD_GROUPS: [(&[&str], &[&str]); 5] = [
    (
        &["beginner", "new investor", "start investing", "getting started", "first time"],
        &[
            "How should a beginner start investing?",
            "Build a beginner portfolio",
            "Explain SIP vs Lump Sum",
        ],
    ),
    (
        &["sip", "mutual fund", "systematic"],
        &[
            "Explain SIP vs Lump Sum",
            "Best mutual funds for SIP",
            "How much should I invest monthly?",
        ],
    ),
    (
        &["stock", "share", "market", "equity"],
        &[
            "How do I analyze a stock?",
            "What is a good P/E ratio?",
            "Long term vs short term investing",
        ],
    ),
    (
        &["saving", "savings", "emergency fund", "deposit"],
        &[
            "How big should an emergency fund be?",
            "Savings account vs liquid fund",
            "Should I invest or keep savings?",
        ],
    ),
    (
        &["risk", "diversif", "volatile"],
        &[
            "How do I measure my risk tolerance?",
            "What is diversification?",
            "Stocks vs bonds for safety",
        ],
    ),
];

fn defaults() -> Vec<String> {
    return DEFAULT_SUGGESTIONS
        .iter()
        .map(|e| return e.to_string())
        .collect();
}

/// Derives up to four follow-up prompts from the latest user message. Pure
/// and deterministic, recomputed after every transcript change.
pub fn suggest(messages: &[Message]) -> Vec<String> {
    let last_user = messages
        .iter()
        .rev()
        .find(|message| return message.author == Author::User);

    let text = match last_user {
        Some(message) => message.text.to_lowercase(),
        None => return defaults(),
    };

    let mut suggestions: Vec<String> = vec![];
    for (keywords, prompts) in KEYWORD_GROUPS {
        if !keywords.iter().any(|keyword| return text.contains(keyword)) {
            continue;
        }

        for prompt in prompts {
            if suggestions.len() >= MAX_SUGGESTIONS {
                return suggestions;
            }
            if suggestions.iter().any(|existing| return existing == prompt) {
                continue;
            }
            suggestions.push(prompt.to_string());
        }
    }

    if suggestions.is_empty() {
        return defaults();
    }

    return suggestions;
}
