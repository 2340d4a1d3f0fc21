use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_renders_borders_around_the_text() {
    let message = Message::new(Author::Finbot, "Hello there");
    let lines = Bubble::new(&message, BubbleAlignment::Left, 100).as_lines();

    // Top bar, one content line, bottom bar.
    assert_eq!(lines.len(), 3);

    let top = lines[0]
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
    assert!(top.starts_with("╭Finbot"));
    assert!(top.contains('╮'));

    let content = lines[1]
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
    assert!(content.contains("Hello there"));
}

#[test]
fn it_puts_the_timestamp_in_the_bottom_bar() {
    let mut message = Message::new(Author::Finbot, "Hello");
    message.timestamp = Some("12:01".to_string());
    let lines = Bubble::new(&message, BubbleAlignment::Left, 100).as_lines();

    let bottom = lines
        .last()
        .unwrap()
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
    assert!(bottom.contains("12:01╯"));
}

#[test]
fn it_wraps_long_lines() {
    let text = "word ".repeat(60);
    let message = Message::new(Author::Finbot, text.trim());
    let lines = Bubble::new(&message, BubbleAlignment::Left, 40).as_lines();

    // More than one content line once wrapped.
    assert!(lines.len() > 3);
}

#[test]
fn it_right_aligns_user_bubbles() {
    let message = Message::new(Author::User, "hi");
    let lines = Bubble::new(&message, BubbleAlignment::Right, 80).as_lines();

    let top = lines[0]
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
    assert!(top.starts_with(' '));
    assert!(top.trim_end().ends_with('╮'));
}
