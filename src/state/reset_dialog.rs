//! Reset-password dialog state and reply handling

use crate::auth::{AuthError, ServerReply};

/// Shown when submit is pressed with an empty email
pub const MSG_EMPTY_EMAIL: &str = "Please enter your email address.";
/// Fallback when the server rejects the request without a usable body
pub const MSG_SEND_FAILED: &str = "Failed to send reset email";
/// Fallback when the server accepts the request without a usable body
pub const MSG_SENT_DEFAULT: &str = "Password reset link sent. Check your email.";
/// Shown for any transport-level failure
pub const MSG_TRANSPORT_FAILED: &str = "An error occurred. Please try again.";

/// Everything needed to perform one reset request off the UI loop.
///
/// The `instance` ties the eventual reply back to the dialog that asked for
/// it; a reply whose instance no longer matches the open dialog is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub instance: u64,
    pub email: String,
}

/// Transient state for one opening of the reset-password dialog.
///
/// Created when the dialog opens, dropped when it closes. The email is kept
/// raw as typed; trimming happens only at submit time.
#[derive(Debug, Clone)]
pub struct ResetDialogState {
    /// Dialog-instance id, used as a liveness token for in-flight replies
    pub instance: u64,
    pub email: String,
    pub message: String,
    pub is_error: bool,
    pub is_loading: bool,
    pub is_sent: bool,
}

impl ResetDialogState {
    pub fn new(instance: u64) -> Self {
        Self {
            instance,
            email: String::new(),
            message: String::new(),
            is_error: false,
            is_loading: false,
            is_sent: false,
        }
    }

    /// Append a character to the email input
    pub fn input_char(&mut self, c: char) {
        self.email.push(c);
    }

    /// Remove the last character from the email input
    pub fn backspace(&mut self) {
        self.email.pop();
    }

    /// Validate the email and move into the loading state.
    ///
    /// Returns `None` without touching the loading flag when the trimmed
    /// email is empty; the validation message is shown inline and no request
    /// may be issued. Otherwise clears previous feedback, sets `is_loading`,
    /// and returns the ticket for the single outbound request.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        let trimmed = self.email.trim();
        if trimmed.is_empty() {
            self.message = MSG_EMPTY_EMAIL.to_string();
            self.is_error = true;
            return None;
        }

        self.is_loading = true;
        self.message.clear();
        self.is_error = false;

        Some(SubmitTicket {
            instance: self.instance,
            email: trimmed.to_string(),
        })
    }

    /// Fold the outcome of the request back into feedback state.
    ///
    /// `is_loading` is cleared on every path, so a completed request never
    /// leaves the dialog both loading and sent.
    pub fn apply_reply(&mut self, reply: Result<ServerReply, AuthError>) {
        match reply {
            Ok(reply) if reply.accepted => {
                self.message = reply
                    .message
                    .unwrap_or_else(|| MSG_SENT_DEFAULT.to_string());
                self.is_error = false;
                self.is_sent = true;
            }
            Ok(reply) => {
                self.message = reply
                    .message
                    .or(reply.error)
                    .unwrap_or_else(|| MSG_SEND_FAILED.to_string());
                self.is_error = true;
            }
            Err(_) => {
                self.message = MSG_TRANSPORT_FAILED.to_string();
                self.is_error = true;
            }
        }
        self.is_loading = false;
    }
}
