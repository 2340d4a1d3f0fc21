use super::suggest;
use super::MAX_SUGGESTIONS;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_returns_defaults_for_empty_history() {
    let res = suggest(&[]);
    assert_eq!(
        res,
        vec![
            "How should a beginner start investing?",
            "What is SIP?",
            "How do I pick my first stock?",
            "How much should I save each month?",
        ]
    );
}

#[test]
fn it_returns_defaults_for_bot_only_history() {
    let messages = vec![
        Message::new(Author::Finbot, "Hi, I'm Finbot."),
        Message::new(Author::Finbot, "Ask me anything."),
    ];
    assert_eq!(suggest(&messages), suggest(&[]));
}

#[test]
fn it_suggests_beginner_prompts() {
    let messages = vec![Message::new(Author::User, "I'm a beginner")];
    let res = suggest(&messages);

    assert_eq!(
        res,
        vec![
            "How should a beginner start investing?",
            "Build a beginner portfolio",
            "Explain SIP vs Lump Sum",
        ]
    );
}

#[test]
fn it_deduplicates_across_groups_and_caps_at_four() {
    let messages = vec![Message::new(
        Author::User,
        "As a beginner, should I start a SIP in mutual funds?",
    )];
    let res = suggest(&messages);

    assert_eq!(res.len(), MAX_SUGGESTIONS);
    assert_eq!(
        res,
        vec![
            "How should a beginner start investing?",
            "Build a beginner portfolio",
            "Explain SIP vs Lump Sum",
            "Best mutual funds for SIP",
        ]
    );
}

#[test]
fn it_uses_the_latest_user_message_only() {
    let messages = vec![
        Message::new(Author::User, "I'm a beginner"),
        Message::new(Author::Finbot, "Welcome!"),
        Message::new(Author::User, "How is the stock market doing?"),
    ];
    let res = suggest(&messages);

    assert_eq!(res[0], "How do I analyze a stock?");
}

#[test]
fn it_falls_back_to_defaults_when_nothing_matches() {
    let messages = vec![Message::new(Author::User, "what's the weather like?")];
    assert_eq!(suggest(&messages), suggest(&[]));
}

#[test]
fn it_matches_case_insensitively() {
    let messages = vec![Message::new(Author::User, "Tell me about SAVINGS")];
    let res = suggest(&messages);
    assert_eq!(res[0], "How big should an emergency fund be?");
}
