//! Forgot-password dialog component

use super::base::{render_dialog, wrap_text, DialogChrome};
use crate::state::ResetDialogState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const MAX_WIDTH: u16 = 56;
const SUBTITLE: &str = "Enter your email and we'll send you a link to reset your password.";
const EMAIL_PLACEHOLDER: &str = "yourname@example.com";

/// Render the forgot-password dialog overlay
pub fn render_reset_dialog(frame: &mut Frame, dialog: &ResetDialogState) {
    let wrap_width = (MAX_WIDTH - 6) as usize;
    let mut body: Vec<Line> = Vec::new();

    for line in wrap_text(SUBTITLE, wrap_width) {
        body.push(Line::from(Span::styled(
            line,
            Style::default().fg(Color::DarkGray),
        )));
    }
    body.push(Line::from(""));

    // The input row disappears once the link is on its way
    if !dialog.is_sent {
        body.push(email_line(dialog));
        body.push(Line::from(""));
    }

    if !dialog.message.is_empty() {
        let color = if dialog.is_error {
            Color::Red
        } else {
            Color::Green
        };
        for line in wrap_text(&dialog.message, wrap_width) {
            body.push(Line::from(Span::styled(line, Style::default().fg(color))));
        }
        body.push(Line::from(""));
    }

    body.push(hint_line(dialog));

    render_dialog(
        frame,
        DialogChrome {
            title: "Reset Password",
            title_color: Color::White,
            border_color: Color::Cyan,
            max_width: MAX_WIDTH,
        },
        body,
    );
}

/// Email input row with a cursor while editable
fn email_line(dialog: &ResetDialogState) -> Line<'_> {
    let mut spans = vec![Span::styled("Email: ", Style::default().fg(Color::DarkGray))];

    if dialog.email.is_empty() {
        spans.push(Span::styled(
            EMAIL_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ));
    } else {
        spans.push(Span::styled(
            dialog.email.as_str(),
            Style::default().fg(Color::White),
        ));
    }

    if !dialog.is_loading {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    Line::from(spans)
}

/// Bottom hint row matching the current dialog phase
fn hint_line(dialog: &ResetDialogState) -> Line<'_> {
    if dialog.is_loading {
        return Line::from(Span::styled(
            "Sending reset link...",
            Style::default().fg(Color::Yellow),
        ));
    }

    if dialog.is_sent {
        return Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" back to login", Style::default().fg(Color::DarkGray)),
        ]);
    }

    Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" send reset link  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ])
}
