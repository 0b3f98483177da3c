//! Typed replies to the unlock confirmation prompt.

/// Classified reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptReply {
    Confirm,
    Cancel,
    Unclear,
}

pub struct ConfirmationReply;

impl ConfirmationReply {
    /// Replies that confirm an unlock
    const CONFIRM_WORDS: &'static [&'static str] = &["yes", "y", "confirm", "unlock", "proceed"];

    /// Replies that cancel an unlock
    const CANCEL_WORDS: &'static [&'static str] = &["no", "n", "cancel", "abort", "back"];

    pub fn classify(reply: &str) -> PromptReply {
        let lower = reply.trim().to_lowercase();
        if Self::CANCEL_WORDS.contains(&lower.as_str()) {
            PromptReply::Cancel
        } else if Self::CONFIRM_WORDS.contains(&lower.as_str()) {
            PromptReply::Confirm
        } else {
            PromptReply::Unclear
        }
    }
}
