use super::SlashCommand;

#[test]
fn it_parses_quit() {
    for cmd in ["/q", "/quit", "/exit"] {
        let parsed = SlashCommand::parse(cmd).unwrap();
        assert!(parsed.is_quit());
        assert!(!parsed.is_clear());
        assert!(!parsed.is_help());
    }
}

#[test]
fn it_parses_clear() {
    let parsed = SlashCommand::parse("/clear").unwrap();
    assert!(parsed.is_clear());
}

#[test]
fn it_parses_help() {
    let parsed = SlashCommand::parse("  /help  ").unwrap();
    assert!(parsed.is_help());
}

#[test]
fn it_ignores_plain_text() {
    assert!(SlashCommand::parse("should I invest now?").is_none());
    assert!(SlashCommand::parse("/model gpt").is_none());
    assert!(SlashCommand::parse("").is_none());
}
