//! UI module for rendering the TUI

mod account;
mod components;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the account screen
    account::draw(frame, area, app);

    // The reset dialog renders as a modal overlay on top of it
    if let Some(dialog) = &app.state.reset_dialog {
        components::dialog::render_reset_dialog(frame, dialog);
    }
}
