//! Host-level tests for Bluetooth message assembly.

use picogo_kit::bluetooth::{BtMessage, MESSAGE_CAPACITY, MessageAssembler};

/// Feed a byte string, returning the last completed message, if any.
fn feed(assembler: &mut MessageAssembler, bytes: &[u8]) -> Option<BtMessage> {
    let mut completed = None;
    for &byte in bytes {
        if let Some(message) = assembler.push_byte(byte) {
            completed = Some(message);
        }
    }
    completed
}

#[test]
fn semicolon_terminates_a_message() {
    let mut assembler = MessageAssembler::new();
    let message = feed(&mut assembler, b"MoveF50;").expect("terminator must complete the message");
    assert_eq!(message.as_slice(), b"MoveF50");
}

#[test]
fn newline_terminates_and_carriage_return_is_skipped() {
    let mut assembler = MessageAssembler::new();
    let message = feed(&mut assembler, b"stop\r\n").expect("newline must complete the message");
    assert_eq!(message.as_slice(), b"stop");
}

#[test]
fn partial_message_survives_an_interrupted_read() {
    let mut assembler = MessageAssembler::new();
    // First read gets only half the command before it is abandoned.
    assert!(feed(&mut assembler, b"Move").is_none());
    // The next read picks up mid-message and still yields the whole command.
    let message = feed(&mut assembler, b"F50;").expect("resumed read must complete the message");
    assert_eq!(message.as_slice(), b"MoveF50");
}

#[test]
fn oversized_message_is_delivered_truncated() {
    let mut assembler = MessageAssembler::new();
    let long = [b'a'; MESSAGE_CAPACITY + 16];
    assert!(feed(&mut assembler, &long).is_none());
    let message = assembler.push_byte(b';').expect("terminator must complete the message");
    assert_eq!(message.len(), MESSAGE_CAPACITY);
    assert!(message.iter().all(|&byte| byte == b'a'));
}

#[test]
fn terminator_alone_yields_an_empty_message() {
    let mut assembler = MessageAssembler::new();
    let message = assembler.push_byte(b';').expect("terminator must complete the message");
    assert!(message.is_empty());
}
