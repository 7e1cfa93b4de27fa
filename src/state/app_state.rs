//! Application state definitions

use crate::state::ResetDialogState;

/// Main application state
#[derive(Default)]
pub struct AppState {
    /// The reset-password dialog, present only while the overlay is open
    pub reset_dialog: Option<ResetDialogState>,
    /// Count of dialogs opened so far; doubles as the instance id source
    opened_dialogs: u64,
}

impl AppState {
    /// Open a fresh reset-password dialog.
    ///
    /// Each opening gets a new instance id so replies from a previously
    /// closed dialog can never touch the new one.
    pub fn open_reset_dialog(&mut self) {
        self.opened_dialogs += 1;
        self.reset_dialog = Some(ResetDialogState::new(self.opened_dialogs));
    }

    /// Close the dialog and discard all of its state
    pub fn close_reset_dialog(&mut self) {
        self.reset_dialog = None;
    }

    /// Whether the reset dialog overlay is currently shown
    pub fn reset_dialog_open(&self) -> bool {
        self.reset_dialog.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_has_no_dialog() {
        let state = AppState::default();
        assert!(!state.reset_dialog_open());
    }

    #[test]
    fn test_open_creates_fresh_dialog() {
        let mut state = AppState::default();
        state.open_reset_dialog();

        let dialog = state.reset_dialog.as_ref().unwrap();
        assert_eq!(dialog.email, "");
        assert_eq!(dialog.message, "");
        assert!(!dialog.is_error);
        assert!(!dialog.is_loading);
        assert!(!dialog.is_sent);
    }

    #[test]
    fn test_close_discards_dialog_state() {
        let mut state = AppState::default();
        state.open_reset_dialog();
        state.reset_dialog.as_mut().unwrap().input_char('a');
        state.close_reset_dialog();

        assert!(!state.reset_dialog_open());
    }

    #[test]
    fn test_reopen_resets_to_initial_values() {
        let mut state = AppState::default();
        state.open_reset_dialog();
        {
            let dialog = state.reset_dialog.as_mut().unwrap();
            dialog.input_char('x');
            dialog.message = "stale".to_string();
            dialog.is_error = true;
            dialog.is_sent = true;
        }
        state.close_reset_dialog();
        state.open_reset_dialog();

        let dialog = state.reset_dialog.as_ref().unwrap();
        assert_eq!(dialog.email, "");
        assert_eq!(dialog.message, "");
        assert!(!dialog.is_error);
        assert!(!dialog.is_sent);
    }

    #[test]
    fn test_each_opening_gets_a_new_instance_id() {
        let mut state = AppState::default();
        state.open_reset_dialog();
        let first = state.reset_dialog.as_ref().unwrap().instance;
        state.close_reset_dialog();
        state.open_reset_dialog();
        let second = state.reset_dialog.as_ref().unwrap().instance;

        assert!(second > first);
    }
}
