use super::Author;
use super::Message;
use super::MessageType;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Finbot, "Hi there!");
    assert_eq!(msg.author, Author::Finbot);
    assert_eq!(msg.author.to_string(), "Finbot");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert!(msg.timestamp.is_some());
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Finbot, "\t\tHi there!");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Author::Finbot, MessageType::Error, "It broke!");
    assert_eq!(msg.author, Author::Finbot);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_deserializes_without_timestamp() {
    let payload = r#"{"author":"User","text":"hello","mtype":"Normal"}"#;
    let msg: Message = serde_json::from_str(payload).unwrap();
    assert_eq!(msg.author, Author::User);
    assert_eq!(msg.text, "hello");
    assert!(msg.timestamp.is_none());
}
