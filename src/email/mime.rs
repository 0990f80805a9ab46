//! Minimal RFC 5322 / MIME rendering for single-part HTML messages.

use super::OutgoingEmail;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

const BODY_LINE_WIDTH: usize = 76;

/// Drops CR and LF so a value cannot start a new header.
fn header_value(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

/// RFC 2047 encoded-word for non-ASCII header text.
fn encode_header_text(value: &str) -> String {
    let value = header_value(value);
    if value.is_ascii() {
        value
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value.as_bytes()))
    }
}

fn mailbox(display_name: &str, address: &str) -> String {
    format!("{} <{}>", encode_header_text(display_name), header_value(address))
}

/// Renders `email` as a complete message with a base64 HTML body and CRLF
/// line endings.
pub fn render_message(from_name: &str, from_address: &str, email: &OutgoingEmail) -> String {
    let body = STANDARD.encode(email.html.as_bytes());
    let wrapped: Vec<&str> = body
        .as_bytes()
        .chunks(BODY_LINE_WIDTH)
        // base64 output is ASCII, so every chunk is valid UTF-8.
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();

    let lines = [
        format!("From: {}", mailbox(from_name, from_address)),
        format!("To: {}", header_value(&email.to)),
        format!("Subject: {}", encode_header_text(&email.subject)),
        "MIME-Version: 1.0".to_string(),
        "Content-Type: text/html; charset=\"UTF-8\"".to_string(),
        "Content-Transfer-Encoding: base64".to_string(),
        String::new(),
        wrapped.join("\r\n"),
    ];
    lines.join("\r\n")
}

/// The `raw` payload the Gmail send API expects: base64url without padding.
pub fn encode_raw(message: &str) -> String {
    URL_SAFE_NO_PAD.encode(message.as_bytes())
}
