//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::event::{AppEvent, EventHandler};
use super::theme::Theme;
use super::ui;
use super::widgets::{CommandInput, MessageListState};
use crate::chat::ChatSession;
use crate::connection::{self, Connection, ConnectionEvent};

/// Connection lifecycle as shown in the header bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Connecting,
    Open,
    Closed,
    Failed(String),
}

impl LinkState {
    pub fn label(&self) -> &'static str {
        match self {
            LinkState::Connecting => "connecting",
            LinkState::Open => "connected",
            LinkState::Closed => "disconnected",
            LinkState::Failed(_) => "unreachable",
        }
    }

    /// Failure reason, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            LinkState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Everything the UI renders and mutates, kept apart from the terminal
/// handle so it can be driven without one.
pub struct AppState {
    /// Color theme
    pub theme: Theme,
    /// Service endpoint shown in the header
    pub endpoint: String,
    /// Connection lifecycle
    pub link: LinkState,
    /// Transcript and outbound connection
    pub session: ChatSession,
    /// Command input form
    pub input: CommandInput,
    /// Message list scroll state
    pub message_list_state: MessageListState,
    /// Show help overlay
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>, connection: Connection) -> Self {
        let theme = Theme::dark();
        let input = CommandInput::new(&theme);
        Self {
            theme,
            endpoint: endpoint.into(),
            link: LinkState::Connecting,
            session: ChatSession::new(connection),
            input,
            message_list_state: MessageListState::default(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::ScrollUp => self.message_list_state.scroll_up(3),
            AppEvent::ScrollDown => self.message_list_state.scroll_down(3),
            AppEvent::Paste(text) => self.input.paste(&text),
            // Redrawn on the next loop iteration
            AppEvent::Resize(width, height) => {
                tracing::trace!(width, height, "Terminal resized");
            }
            AppEvent::Tick => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => {
                self.should_quit = true;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = !self.show_help;
            }
            (_, KeyCode::Esc) => {
                self.show_help = false;
            }
            (_, KeyCode::Up) => self.message_list_state.scroll_up(1),
            (_, KeyCode::Down) => self.message_list_state.scroll_down(1),
            (_, KeyCode::PageUp) => self.message_list_state.page_up(),
            (_, KeyCode::PageDown) => self.message_list_state.page_down(),
            _ => {
                if let Some(command) = self.input.handle_key(key) {
                    self.submit(command);
                }
            }
        }
    }

    fn submit(&mut self, command: String) {
        tracing::debug!(len = command.len(), "Submitting command");
        self.session.submit(command);
        self.message_list_state.scroll_to_bottom();
    }

    pub fn handle_connection_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened => self.link = LinkState::Open,
            ConnectionEvent::Payload(raw) => {
                // Replies only pull the view down if the reader hasn't scrolled away
                if self.session.receive(&raw) && self.message_list_state.is_following() {
                    self.message_list_state.scroll_to_bottom();
                }
            }
            ConnectionEvent::Closed => self.link = LinkState::Closed,
            ConnectionEvent::Failed(reason) => self.link = LinkState::Failed(reason),
        }
    }
}

/// Main TUI application
pub struct TuiApp {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Terminal event source
    events: EventHandler,
    /// Events from the connection task
    connection_events: mpsc::UnboundedReceiver<ConnectionEvent>,
    /// UI state
    state: AppState,
}

impl TuiApp {
    /// Set up the terminal and open the connection to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal(&mut io::stdout());
                return Err(e.into());
            }
        };

        let (events_tx, connection_events) = mpsc::unbounded_channel();
        let connection = connection::spawn(endpoint, events_tx);

        Ok(Self {
            terminal,
            events: EventHandler::new(Duration::from_millis(100)),
            connection_events,
            state: AppState::new(endpoint, connection),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.terminal
                .draw(|frame| ui::render(frame, &mut self.state))?;

            tokio::select! {
                biased; // Prefer connection events over UI events

                Some(event) = self.connection_events.recv() => {
                    tracing::debug!("CONNECTION EVENT: {:?}", std::mem::discriminant(&event));
                    self.state.handle_connection_event(event);
                }
                maybe_event = self.events.next() => {
                    match maybe_event {
                        Some(event) => self.state.handle_event(event),
                        None => {
                            tracing::warn!("Terminal event source stopped");
                            self.state.should_quit = true;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}

fn restore_terminal(out: &mut impl io::Write) {
    let _ = disable_raw_mode();
    let _ = execute!(
        out,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatMessage, MessageRole};
    use ratatui::backend::TestBackend;

    fn state() -> (AppState, mpsc::UnboundedReceiver<String>) {
        let (connection, outbound) = Connection::channel();
        (
            AppState::new(connection::DEFAULT_ENDPOINT, connection),
            outbound,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_and_submit(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        state.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_typed_command_is_recorded_and_sent() {
        let (mut state, mut outbound) = state();
        type_and_submit(&mut state, "buy AAPL");

        assert_eq!(
            state.session.transcript().messages(),
            &[ChatMessage::user("buy AAPL")]
        );
        assert_eq!(state.input.draft(), "");
        assert_eq!(outbound.try_recv().unwrap(), "buy AAPL");
    }

    #[test]
    fn test_conversation_flow() {
        let (mut state, mut outbound) = state();
        state.handle_connection_event(ConnectionEvent::Opened);
        assert_eq!(state.link, LinkState::Open);

        type_and_submit(&mut state, "a");
        state.handle_connection_event(ConnectionEvent::Payload(r#"{"message":"b"}"#.into()));
        type_and_submit(&mut state, "c");

        let roles: Vec<(MessageRole, &str)> = state
            .session
            .transcript()
            .iter()
            .map(|m| (m.role(), m.content()))
            .collect();
        assert_eq!(
            roles,
            vec![
                (MessageRole::User, "a"),
                (MessageRole::Assistant, "b"),
                (MessageRole::User, "c"),
            ]
        );
        assert_eq!(outbound.try_recv().unwrap(), "a");
        assert_eq!(outbound.try_recv().unwrap(), "c");
    }

    #[test]
    fn test_bad_payload_and_disconnect_are_silent() {
        let (mut state, _outbound) = state();
        state.handle_connection_event(ConnectionEvent::Payload("not json".into()));
        state.handle_connection_event(ConnectionEvent::Closed);

        assert!(state.session.transcript().is_empty());
        assert_eq!(state.link, LinkState::Closed);
        assert_eq!(state.link.label(), "disconnected");
    }

    #[test]
    fn test_failed_link() {
        let (mut state, _outbound) = state();
        state.handle_connection_event(ConnectionEvent::Failed("refused".into()));
        assert_eq!(state.link, LinkState::Failed("refused".into()));
        assert_eq!(state.link.label(), "unreachable");
        assert_eq!(state.link.detail(), Some("refused"));
    }

    #[test]
    fn test_global_keys_do_not_reach_input() {
        let (mut state, mut outbound) = state();

        state.handle_key(key(KeyCode::F(1)));
        assert!(state.show_help);
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.show_help);

        state.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
        assert!(state.session.transcript().is_empty());
        assert!(outbound.try_recv().is_err());
    }

    fn redraw(terminal: &mut Terminal<TestBackend>, state: &mut AppState) {
        terminal.draw(|frame| ui::render(frame, state)).unwrap();
    }

    #[test]
    fn test_reply_keeps_scrolled_back_view() {
        let (mut state, _outbound) = state();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        for i in 0..20 {
            state.handle_connection_event(ConnectionEvent::Payload(format!(
                r#"{{"message":"fill {i}"}}"#
            )));
        }
        redraw(&mut terminal, &mut state);
        assert!(state.message_list_state.is_following());

        state.handle_key(key(KeyCode::PageUp));
        redraw(&mut terminal, &mut state);
        let offset = state.message_list_state.offset;
        assert!(!state.message_list_state.is_following());

        state.handle_connection_event(ConnectionEvent::Payload(r#"{"message":"late"}"#.into()));
        redraw(&mut terminal, &mut state);

        assert_eq!(state.message_list_state.offset, offset);
        assert!(!state.message_list_state.is_following());
        assert_eq!(
            state.session.transcript().messages().last(),
            Some(&ChatMessage::assistant("late"))
        );
    }

    #[test]
    fn test_reply_followed_when_at_bottom() {
        let (mut state, _outbound) = state();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        for i in 0..20 {
            state.handle_connection_event(ConnectionEvent::Payload(format!(
                r#"{{"message":"fill {i}"}}"#
            )));
        }
        redraw(&mut terminal, &mut state);
        let offset = state.message_list_state.offset;

        state.handle_connection_event(ConnectionEvent::Payload(r#"{"message":"late"}"#.into()));
        redraw(&mut terminal, &mut state);

        assert!(state.message_list_state.is_following());
        assert!(state.message_list_state.offset > offset);
    }

    #[test]
    fn test_own_submit_returns_to_bottom() {
        let (mut state, _outbound) = state();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        for i in 0..20 {
            state.handle_connection_event(ConnectionEvent::Payload(format!(
                r#"{{"message":"fill {i}"}}"#
            )));
        }
        redraw(&mut terminal, &mut state);
        state.handle_key(key(KeyCode::PageUp));
        redraw(&mut terminal, &mut state);
        assert!(!state.message_list_state.is_following());

        type_and_submit(&mut state, "buy AAPL");
        assert!(state.message_list_state.is_following());
    }

    #[test]
    fn test_paste_then_submit() {
        let (mut state, _outbound) = state();
        state.handle_event(AppEvent::Paste("sell\n10 MSFT".into()));
        state.handle_key(key(KeyCode::Enter));

        assert_eq!(
            state.session.transcript().messages().last(),
            Some(&ChatMessage::user("sell10 MSFT"))
        );
    }
}
