//! Application state and core logic

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::auth::{AuthClientTrait, AuthError, ServerReply};
use crate::state::{AppState, SubmitTicket};

/// A finished reset request, tagged with the dialog instance that issued it
pub struct ResetOutcome {
    pub instance: u64,
    pub reply: Result<ServerReply, AuthError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Auth client for talking to the Passport service
    auth: Arc<dyn AuthClientTrait>,
    /// Whether the app should quit
    quit: bool,
    /// Reset-request results flowing back from spawned tasks
    reset_tx: mpsc::UnboundedSender<ResetOutcome>,
    reset_rx: mpsc::UnboundedReceiver<ResetOutcome>,
}

impl App {
    /// Create a new App instance
    pub fn new(auth: Arc<dyn AuthClientTrait>) -> Self {
        let (reset_tx, reset_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::default(),
            auth,
            quit: false,
            reset_tx,
            reset_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state.reset_dialog_open() {
            self.handle_reset_dialog_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('f') => self.state.open_reset_dialog(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys while the reset dialog is open
    fn handle_reset_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.state.reset_dialog.as_mut() else {
            return;
        };

        // All dialog controls are disabled while a request is in flight,
        // which keeps at most one request outstanding per instance.
        if dialog.is_loading {
            return;
        }

        match key.code {
            KeyCode::Esc => self.state.close_reset_dialog(),
            // Once the link is sent the primary action is "back to login"
            KeyCode::Enter if dialog.is_sent => self.state.close_reset_dialog(),
            KeyCode::Enter => self.submit_reset(),
            KeyCode::Char(c) if !dialog.is_sent => dialog.input_char(c),
            KeyCode::Backspace if !dialog.is_sent => dialog.backspace(),
            _ => {}
        }
    }

    /// Validate the dialog input and spawn the reset request
    fn submit_reset(&mut self) {
        let Some(dialog) = self.state.reset_dialog.as_mut() else {
            return;
        };
        let Some(ticket) = dialog.begin_submit() else {
            return;
        };

        let auth = self.auth.clone();
        let tx = self.reset_tx.clone();
        tokio::spawn(run_reset_request(auth, ticket, tx));
    }

    /// Apply any finished reset requests.
    ///
    /// Called once per event-loop iteration. A reply whose instance does not
    /// match the open dialog belongs to a closed one and is dropped.
    pub fn drain_reset_outcomes(&mut self) {
        while let Ok(outcome) = self.reset_rx.try_recv() {
            match self.state.reset_dialog.as_mut() {
                Some(dialog) if dialog.instance == outcome.instance => {
                    dialog.apply_reply(outcome.reply);
                }
                _ => {
                    tracing::debug!(
                        instance = outcome.instance,
                        "discarding reply for a closed reset dialog"
                    );
                }
            }
        }
    }
}

/// Perform one reset request and deliver the tagged result.
///
/// Runs on a spawned task so the UI keeps drawing while the request is in
/// flight. A send failure means the app is shutting down; the result is moot.
async fn run_reset_request(
    auth: Arc<dyn AuthClientTrait>,
    ticket: SubmitTicket,
    tx: mpsc::UnboundedSender<ResetOutcome>,
) {
    let reply = auth.request_password_reset(&ticket.email).await;
    let _ = tx.send(ResetOutcome {
        instance: ticket.instance,
        reply,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthClientTrait;
    use crate::state::{MSG_EMPTY_EMAIL, MSG_TRANSPORT_FAILED};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_mock(mock: MockAuthClientTrait) -> App {
        App::new(Arc::new(mock))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn accepted_reply(message: &str) -> Result<ServerReply, AuthError> {
        Ok(ServerReply {
            accepted: true,
            message: Some(message.to_string()),
            error: None,
        })
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_f_opens_dialog_and_esc_closes_it() {
            let mut app = app_with_mock(MockAuthClientTrait::new());

            app.handle_key(key(KeyCode::Char('f')));
            assert!(app.state.reset_dialog_open());

            app.handle_key(key(KeyCode::Esc));
            assert!(!app.state.reset_dialog_open());
        }

        #[test]
        fn test_q_quits_from_account_screen() {
            let mut app = app_with_mock(MockAuthClientTrait::new());
            assert!(!app.should_quit());

            app.handle_key(key(KeyCode::Char('q')));
            assert!(app.should_quit());
        }

        #[test]
        fn test_q_types_into_the_dialog_instead_of_quitting() {
            let mut app = app_with_mock(MockAuthClientTrait::new());
            app.handle_key(key(KeyCode::Char('f')));

            app.handle_key(key(KeyCode::Char('q')));
            assert!(!app.should_quit());
            assert_eq!(app.state.reset_dialog.as_ref().unwrap().email, "q");
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_and_backspace_edit_email() {
            let mut app = app_with_mock(MockAuthClientTrait::new());
            app.state.open_reset_dialog();

            type_str(&mut app, "user@");
            app.handle_key(key(KeyCode::Backspace));

            assert_eq!(app.state.reset_dialog.as_ref().unwrap().email, "user");
        }

        #[test]
        fn test_input_is_hidden_after_success() {
            let mut app = app_with_mock(MockAuthClientTrait::new());
            app.state.open_reset_dialog();
            app.state.reset_dialog.as_mut().unwrap().is_sent = true;

            type_str(&mut app, "x");
            assert_eq!(app.state.reset_dialog.as_ref().unwrap().email, "");
        }

        #[test]
        fn test_all_keys_ignored_while_loading() {
            let mut app = app_with_mock(MockAuthClientTrait::new());
            app.state.open_reset_dialog();
            type_str(&mut app, "user@example.com");
            app.state
                .reset_dialog
                .as_mut()
                .unwrap()
                .begin_submit()
                .unwrap();

            type_str(&mut app, "x");
            app.handle_key(key(KeyCode::Esc));

            let dialog = app.state.reset_dialog.as_ref().unwrap();
            assert!(dialog.is_loading);
            assert_eq!(dialog.email, "user@example.com");
            assert!(app.state.reset_dialog_open());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_email_never_issues_a_request() {
            // The mock has no expectations; any call would panic
            let mut app = app_with_mock(MockAuthClientTrait::new());
            app.state.open_reset_dialog();

            app.handle_key(key(KeyCode::Enter));

            let dialog = app.state.reset_dialog.as_ref().unwrap();
            assert_eq!(dialog.message, MSG_EMPTY_EMAIL);
            assert!(dialog.is_error);
            assert!(!dialog.is_loading);
        }

        #[tokio::test]
        async fn test_submit_flow_applies_success_reply() {
            let mut mock = MockAuthClientTrait::new();
            mock.expect_request_password_reset()
                .withf(|email| email == "user@example.com")
                .times(1)
                .returning(|_| accepted_reply("Reset link sent"));
            let mut app = app_with_mock(mock);
            app.state.open_reset_dialog();
            type_str(&mut app, "user@example.com");

            let ticket = app
                .state
                .reset_dialog
                .as_mut()
                .unwrap()
                .begin_submit()
                .unwrap();
            assert!(app.state.reset_dialog.as_ref().unwrap().is_loading);

            run_reset_request(app.auth.clone(), ticket, app.reset_tx.clone()).await;
            app.drain_reset_outcomes();

            let dialog = app.state.reset_dialog.as_ref().unwrap();
            assert_eq!(dialog.message, "Reset link sent");
            assert!(dialog.is_sent);
            assert!(!dialog.is_error);
            assert!(!dialog.is_loading);
        }

        #[tokio::test]
        async fn test_submit_flow_applies_transport_failure() {
            let mut mock = MockAuthClientTrait::new();
            mock.expect_request_password_reset()
                .times(1)
                .returning(|_| Err(AuthError::Timeout));
            let mut app = app_with_mock(mock);
            app.state.open_reset_dialog();
            type_str(&mut app, "user@example.com");

            let ticket = app
                .state
                .reset_dialog
                .as_mut()
                .unwrap()
                .begin_submit()
                .unwrap();
            run_reset_request(app.auth.clone(), ticket, app.reset_tx.clone()).await;
            app.drain_reset_outcomes();

            let dialog = app.state.reset_dialog.as_ref().unwrap();
            assert_eq!(dialog.message, MSG_TRANSPORT_FAILED);
            assert!(dialog.is_error);
            assert!(!dialog.is_sent);
            assert!(!dialog.is_loading);
        }

        #[tokio::test]
        async fn test_enter_submits_and_delivers_reply() {
            let mut mock = MockAuthClientTrait::new();
            mock.expect_request_password_reset()
                .times(1)
                .returning(|_| accepted_reply("Reset link sent"));
            let mut app = app_with_mock(mock);
            app.state.open_reset_dialog();
            type_str(&mut app, "user@example.com");

            app.handle_key(key(KeyCode::Enter));
            assert!(app.state.reset_dialog.as_ref().unwrap().is_loading);

            let mut settled = false;
            for _ in 0..200 {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                app.drain_reset_outcomes();
                if !app.state.reset_dialog.as_ref().unwrap().is_loading {
                    settled = true;
                    break;
                }
            }

            assert!(settled);
            assert!(app.state.reset_dialog.as_ref().unwrap().is_sent);
        }

        #[tokio::test]
        async fn test_stale_reply_is_discarded_after_close() {
            let mut mock = MockAuthClientTrait::new();
            mock.expect_request_password_reset()
                .times(1)
                .returning(|_| accepted_reply("Reset link sent"));
            let mut app = app_with_mock(mock);
            app.state.open_reset_dialog();
            type_str(&mut app, "user@example.com");
            let ticket = app
                .state
                .reset_dialog
                .as_mut()
                .unwrap()
                .begin_submit()
                .unwrap();

            // The user closes the dialog and opens a fresh one while the
            // request is still in flight
            app.state.close_reset_dialog();
            app.state.open_reset_dialog();

            run_reset_request(app.auth.clone(), ticket, app.reset_tx.clone()).await;
            app.drain_reset_outcomes();

            let dialog = app.state.reset_dialog.as_ref().unwrap();
            assert_eq!(dialog.message, "");
            assert!(!dialog.is_sent);
            assert!(!dialog.is_error);
        }

        #[test]
        fn test_enter_after_success_returns_to_account_screen() {
            let mut app = app_with_mock(MockAuthClientTrait::new());
            app.state.open_reset_dialog();
            app.state.reset_dialog.as_mut().unwrap().is_sent = true;

            app.handle_key(key(KeyCode::Enter));
            assert!(!app.state.reset_dialog_open());
        }
    }
}
