//! Main UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{AppState, LinkState};
use super::widgets::MessageList;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Messages
            Constraint::Length(3), // Input
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_messages(frame, app, chunks[1]);
    render_input(frame, app, chunks[2]);
    render_hints(frame, app, chunks[3]);

    if app.show_help {
        render_help(frame, app, frame.area());
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = &app.theme;
    let link_color = match app.link {
        LinkState::Connecting => theme.warning,
        LinkState::Open => theme.success,
        LinkState::Closed | LinkState::Failed(_) => theme.error,
    };

    let mut spans = vec![
        Span::styled(
            "Trade Console",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(theme.border)),
        Span::styled(app.endpoint.as_str(), Style::default().fg(theme.text_muted)),
        Span::styled(" │ ", Style::default().fg(theme.border)),
        Span::styled(format!("● {}", app.link.label()), Style::default().fg(link_color)),
    ];
    if let Some(reason) = app.link.detail() {
        spans.push(Span::styled(
            format!(" ({reason})"),
            Style::default().fg(theme.text_muted),
        ));
    }

    let header = Paragraph::new(Line::from(spans));

    frame.render_widget(header, area);
}

fn render_messages(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let messages = app.session.transcript().messages();

    if messages.is_empty() {
        let muted = Style::default().fg(app.theme.text_muted);
        let welcome = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Trade Console",
                Style::default()
                    .fg(app.theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Chat with your trading agent", muted)),
            Line::from(""),
            Line::from(Span::styled("Type a command below and press Enter", muted)),
            Line::from(Span::styled(
                "Press F1 for keyboard shortcuts",
                muted.add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center);

        frame.render_widget(welcome, area);
        return;
    }

    let message_list = MessageList::new(messages, &app.theme);
    frame.render_stateful_widget(message_list, area, &mut app.message_list_state);
}

fn render_input(frame: &mut Frame, app: &mut AppState, area: Rect) {
    app.input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent))
            .title(" Command "),
    );

    frame.render_widget(&app.input, area);
}

fn render_hints(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut hint = String::from(" Enter send · ↑/↓ scroll · F1 help · Ctrl+C quit");
    if !app.message_list_state.is_following() {
        hint.push_str(" · scrolled");
    }

    let hints = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(app.theme.text_muted),
    )));
    frame.render_widget(hints, area);
}

fn render_help(frame: &mut Frame, app: &AppState, area: Rect) {
    let key_style = Style::default().fg(app.theme.user_label);
    let entry = |keys: &'static str, action: &'static str| {
        Line::from(vec![Span::styled(keys, key_style), Span::raw(action)])
    };

    let help_lines = vec![
        Line::from(vec![Span::styled(
            " Keyboard Shortcuts ",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        entry(" Enter       ", "Send command"),
        entry(" Ctrl+C      ", "Quit"),
        entry(" Ctrl+Q      ", "Quit"),
        entry(" ↑/↓         ", "Scroll messages"),
        entry(" PgUp/PgDn   ", "Scroll a page"),
        entry(" Mouse wheel ", "Scroll messages"),
        entry(" Esc         ", "Close help"),
        entry(" F1          ", "Toggle this help"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.warning))
        .title(" Help ");

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .alignment(Alignment::Left);

    let area = centered_rect(60, 50, area);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
