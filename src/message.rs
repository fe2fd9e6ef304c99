// ── Alert text formatting ─────────────────────────────────────────────────────
//
// Pure string handling for `display_message`.  No `unsafe`, no AppKit.

/// Delimiter between the first sentence and the rest of a message.
const SENTENCE_BREAK: &str = ". ";

/// The two text slots of a native alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertText {
    /// Bold headline.  Ends with the `.` of the first sentence when the
    /// message was split.
    pub primary: String,
    /// Smaller informative text, present only when the message was split.
    pub secondary: Option<String>,
}

/// Break `message` into a headline and an informative line.
///
/// Everything up to and including the first `". "`'s period becomes the
/// primary line, with line feeds flattened to spaces; everything after the
/// space becomes the secondary line.  A message without the delimiter is
/// returned whole as the primary line.
pub fn split_message(message: &str) -> AlertText {
    match message.find(SENTENCE_BREAK) {
        Some(pos) => AlertText {
            primary: message[..=pos].replace('\n', " "),
            secondary: Some(message[pos + SENTENCE_BREAK.len()..].to_owned()),
        },
        None => AlertText {
            primary: message.to_owned(),
            secondary: None,
        },
    }
}
